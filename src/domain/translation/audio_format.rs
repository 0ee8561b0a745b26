/// Container formats a synthesized clip may arrive in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Wav,
}

impl AudioFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "audio/mpeg",
            AudioFormat::Wav => "audio/wav",
        }
    }
}

/// Identify audio by its leading bytes: an ID3 tag or MPEG frame sync for
/// MP3, a RIFF/WAVE header for WAV.
pub fn sniff_audio_format(bytes: &[u8]) -> Option<AudioFormat> {
    match bytes {
        [b'I', b'D', b'3', ..] => Some(AudioFormat::Mp3),
        [0xFF, second, ..] if second & 0xE0 == 0xE0 => Some(AudioFormat::Mp3),
        [b'R', b'I', b'F', b'F', _, _, _, _, b'W', b'A', b'V', b'E', ..] => Some(AudioFormat::Wav),
        _ => None,
    }
}
