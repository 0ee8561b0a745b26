use super::text_batching::split_into_batches;
use super::tts_repository::TtsRepository;
use async_trait::async_trait;

/// The translate_tts endpoint rejects requests longer than 100 characters
const MAX_BATCH_SIZE: usize = 100;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
    (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Google Translate TTS implementation of TTS repository
pub struct GoogleTtsRepository {
    client: reqwest::Client,
    endpoint: String,
}

impl GoogleTtsRepository {
    pub fn new(client: reqwest::Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    /// Fetch the MP3 for a single batch
    async fn call_google(
        &self,
        text: &str,
        language: &str,
        index: usize,
        total: usize,
    ) -> Result<Vec<u8>, String> {
        let text_len = text.chars().count().to_string();
        let index = index.to_string();
        let total = total.to_string();

        tracing::debug!(
            language = language,
            batch_index = %index,
            text_length = %text_len,
            "Calling Google Translate TTS"
        );

        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", text),
                ("total", total.as_str()),
                ("idx", index.as_str()),
                ("textlen", text_len.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, language = language, "Google TTS request failed");
                format!("Google TTS error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            tracing::error!(
                status = status.as_u16(),
                language = language,
                "Google TTS returned an error status"
            );
            return Err(format!("Google TTS error: HTTP {}", status.as_u16()));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read Google TTS audio: {}", e))?
            .to_vec();

        if audio_bytes.is_empty() {
            return Err("Google TTS returned no audio".to_string());
        }

        Ok(audio_bytes)
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        let batches = split_into_batches(text, MAX_BATCH_SIZE);
        if batches.is_empty() {
            return Err("No text to synthesize".to_string());
        }

        tracing::info!(
            language = language,
            batch_count = batches.len(),
            text_length = text.chars().count(),
            "Starting Google TTS synthesis"
        );

        let mut merged_audio = Vec::new();
        for (index, batch) in batches.iter().enumerate() {
            let audio_data = self
                .call_google(batch, language, index, batches.len())
                .await?;
            merged_audio.extend(audio_data);
        }

        tracing::info!(
            provider = "google",
            language = language,
            latency_ms = start_time.elapsed().as_millis(),
            batch_count = batches.len(),
            audio_size_bytes = merged_audio.len(),
            "TTS synthesis completed"
        );

        Ok(merged_audio)
    }
}
