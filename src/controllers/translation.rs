use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::{
        language::{supported_languages, SupportedLanguage, TARGET_SPEECH_LANGUAGE, TARGET_TAG},
        translation::{
            sniff_audio_format, AudioFormat, TranslateRequest, TranslationResponse,
            TranslationService, TranslationServiceApi,
        },
    },
    error::{AppError, AppResult},
    infrastructure::repositories::AudioStore,
};

/// File name offered for the translated text download
pub const DOWNLOAD_FILE_NAME: &str = "tamil_translation.txt";

#[derive(Debug, Serialize)]
pub struct LanguagesResponse {
    pub target_tag: &'static str,
    pub target_speech_language: &'static str,
    pub languages: Vec<SupportedLanguage>,
}

pub struct TranslationController {
    translation_service: Arc<TranslationService>,
    audio_store: Arc<AudioStore>,
}

impl TranslationController {
    pub fn new(translation_service: Arc<TranslationService>, audio_store: Arc<AudioStore>) -> Self {
        Self {
            translation_service,
            audio_store,
        }
    }

    /// POST /api/translate - Detect, translate to Tamil and synthesize speech
    pub async fn translate(
        State(controller): State<Arc<TranslationController>>,
        Json(request): Json<TranslateRequest>,
    ) -> AppResult<Json<TranslationResponse>> {
        let result = controller
            .translation_service
            .translate(request.text)
            .await
            .map_err(AppError::from)?;

        Ok(Json(TranslationResponse::from(result)))
    }

    /// GET /api/translations/:id/audio - Synthesized speech for a translation
    pub async fn get_audio(
        State(controller): State<Arc<TranslationController>>,
        Path(id): Path<Uuid>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let audio = controller
            .audio_store
            .read_audio(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No audio for translation {}", id)))?;

        let format = sniff_audio_format(&audio).unwrap_or(AudioFormat::Mp3);

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(format.mime_type()),
        );
        headers.insert(
            "x-speech-language",
            HeaderValue::from_static(TARGET_SPEECH_LANGUAGE),
        );

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }

    /// GET /api/translations/:id/text - Translated text as a file download
    pub async fn download_text(
        State(controller): State<Arc<TranslationController>>,
        Path(id): Path<Uuid>,
    ) -> AppResult<(StatusCode, HeaderMap, String)> {
        let artifact = controller
            .audio_store
            .get(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("No text for translation {}", id)))?;

        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        let disposition = format!("attachment; filename=\"{}\"", DOWNLOAD_FILE_NAME);
        headers.insert(
            header::CONTENT_DISPOSITION,
            HeaderValue::from_str(&disposition).map_err(|e| AppError::Internal(e.to_string()))?,
        );

        Ok((StatusCode::OK, headers, artifact.text))
    }

    /// GET /api/languages - Source languages with a model tag, and the fixed target
    pub async fn list_languages() -> Json<LanguagesResponse> {
        Json(LanguagesResponse {
            target_tag: TARGET_TAG,
            target_speech_language: TARGET_SPEECH_LANGUAGE,
            languages: supported_languages(),
        })
    }
}
