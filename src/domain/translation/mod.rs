pub mod audio_format;
pub mod error;
pub mod service;

pub use audio_format::{sniff_audio_format, AudioFormat};
pub use error::TranslationServiceError;
pub use service::{
    TranslationResult, TranslationService, TranslationServiceApi, EMPTY_INPUT_WARNING,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::language::TARGET_TAG;

/// Request for POST /api/translate
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

/// Response for POST /api/translate
#[derive(Debug, Serialize, Deserialize)]
pub struct TranslationResponse {
    pub id: Uuid,
    pub detected_language: String,
    pub source_tag: String,
    pub target_tag: String,
    pub translated_text: String,
    pub audio_url: String,
    pub download_url: String,
    pub created_at: DateTime<Utc>,
}

/// Path of the audio endpoint for an artifact
pub fn audio_url(id: Uuid) -> String {
    format!("/api/translations/{}/audio", id)
}

/// Path of the text download endpoint for an artifact
pub fn download_url(id: Uuid) -> String {
    format!("/api/translations/{}/text", id)
}

impl From<TranslationResult> for TranslationResponse {
    fn from(result: TranslationResult) -> Self {
        Self {
            id: result.artifact_id,
            detected_language: result.detected.code,
            source_tag: result.detected.tag.to_string(),
            target_tag: TARGET_TAG.to_string(),
            translated_text: result.translated_text,
            audio_url: audio_url(result.artifact_id),
            download_url: download_url(result.artifact_id),
            created_at: result.created_at,
        }
    }
}
