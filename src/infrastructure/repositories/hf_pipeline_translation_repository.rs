use super::translation_repository::TranslationRepository;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct PipelineRequest<'a> {
    inputs: &'a str,
    parameters: PipelineParameters<'a>,
    options: PipelineOptions,
}

#[derive(Debug, Serialize)]
struct PipelineParameters<'a> {
    src_lang: &'a str,
    tgt_lang: &'a str,
    max_length: usize,
}

#[derive(Debug, Serialize)]
struct PipelineOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PipelineResponse {
    Translations(Vec<TranslationOutput>),
    Error { error: String },
}

#[derive(Debug, Deserialize)]
struct TranslationOutput {
    translation_text: String,
}

/// Translation pipeline hosted on the Hugging Face inference API.
///
/// Built once and bound to a single model, a default source language and
/// the target language; each call supplies only the text and, optionally, a
/// different source tag.
pub struct HfPipelineTranslationRepository {
    client: reqwest::Client,
    endpoint: String,
    api_token: Option<String>,
    default_source_tag: String,
    target_tag: String,
    max_length: usize,
}

impl HfPipelineTranslationRepository {
    pub fn new(
        client: reqwest::Client,
        api_url: &str,
        model: &str,
        api_token: Option<String>,
        default_source_tag: &str,
        target_tag: &str,
        max_length: usize,
    ) -> Self {
        Self {
            client,
            endpoint: format!("{}/{}", api_url.trim_end_matches('/'), model),
            api_token,
            default_source_tag: default_source_tag.to_string(),
            target_tag: target_tag.to_string(),
            max_length,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TranslationRepository for HfPipelineTranslationRepository {
    async fn translate(&self, text: &str, source_tag: &str) -> Result<String, String> {
        let start_time = std::time::Instant::now();
        let src_lang = if source_tag.is_empty() {
            self.default_source_tag.as_str()
        } else {
            source_tag
        };

        tracing::info!(
            endpoint = %self.endpoint,
            src_lang = src_lang,
            tgt_lang = %self.target_tag,
            max_length = self.max_length,
            text_length = text.chars().count(),
            "Calling translation pipeline"
        );

        let body = PipelineRequest {
            inputs: text,
            parameters: PipelineParameters {
                src_lang,
                tgt_lang: &self.target_tag,
                max_length: self.max_length,
            },
            options: PipelineOptions {
                wait_for_model: true,
            },
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.api_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::error!(error = %e, endpoint = %self.endpoint, "Translation pipeline request failed");
            format!("Translation pipeline error: {}", e)
        })?;

        let status = response.status();
        let parsed: PipelineResponse = response.json().await.map_err(|e| {
            format!(
                "Translation pipeline returned an unreadable response (HTTP {}): {}",
                status.as_u16(),
                e
            )
        })?;

        let translated = match parsed {
            PipelineResponse::Error { error } => {
                tracing::error!(
                    status = status.as_u16(),
                    error = %error,
                    "Translation pipeline reported an error"
                );
                return Err(format!("Translation pipeline error: {}", error));
            }
            PipelineResponse::Translations(outputs) => outputs
                .into_iter()
                .next()
                .map(|o| o.translation_text)
                .ok_or_else(|| "Translation pipeline returned no translations".to_string())?,
        };

        if !status.is_success() {
            return Err(format!(
                "Translation pipeline error: HTTP {}",
                status.as_u16()
            ));
        }

        tracing::info!(
            strategy = "pipeline",
            src_lang = src_lang,
            latency_ms = start_time.elapsed().as_millis(),
            output_length = translated.chars().count(),
            "Translation completed"
        );

        Ok(translated)
    }
}
