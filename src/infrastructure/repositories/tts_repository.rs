use async_trait::async_trait;

/// Repository for speech synthesis.
/// Abstracts the underlying TTS provider (Google Translate TTS, OpenAI, ...)
///
/// Implementations are responsible for:
/// - Handling provider-specific text length limitations
/// - Splitting text into batches if needed
/// - Merging audio chunks into a single MP3 stream
/// - Provider-specific voice selection for the spoken language
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize text to speech in the given spoken language
    ///
    /// Returns merged audio data ready for playback (MP3 format)
    ///
    /// # Arguments
    /// * `text` - Translated text to speak
    /// * `language` - Spoken-language code, e.g. `ta`
    ///
    /// # Errors
    /// Returns error if synthesis fails or provider is unavailable
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String>;
}
