use super::audio_format::{sniff_audio_format, AudioFormat};
use super::error::TranslationServiceError;
use crate::domain::language::{
    is_tamil_script, tamil_script_ratio, DetectedLanguage, LanguageDetector,
    TARGET_SPEECH_LANGUAGE,
};
use crate::infrastructure::repositories::{AudioStore, TranslationRepository, TtsRepository};
use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Shown when the submitted text is empty or whitespace
pub const EMPTY_INPUT_WARNING: &str = "Please enter some text";

#[derive(Debug, Clone)]
pub struct TranslationResult {
    pub artifact_id: Uuid,
    pub detected: DetectedLanguage,
    pub translated_text: String,
    pub audio_format: AudioFormat,
    pub audio_size: usize,
    pub created_at: DateTime<Utc>,
}

pub struct TranslationService {
    detector: Arc<LanguageDetector>,
    translator: Arc<dyn TranslationRepository>,
    tts_repo: Arc<dyn TtsRepository>,
    audio_store: Arc<AudioStore>,
}

impl TranslationService {
    pub fn new(
        detector: Arc<LanguageDetector>,
        translator: Arc<dyn TranslationRepository>,
        tts_repo: Arc<dyn TtsRepository>,
        audio_store: Arc<AudioStore>,
    ) -> Self {
        Self {
            detector,
            translator,
            tts_repo,
            audio_store,
        }
    }
}

#[async_trait]
pub trait TranslationServiceApi: Send + Sync {
    /// Translate free text into Tamil and synthesize it
    ///
    /// This operation:
    /// - Rejects empty input before any other work
    /// - Detects the source language (never fails, falls back to English)
    /// - Translates to Tamil
    /// - Synthesizes Tamil speech and stores text + audio as an artifact
    async fn translate(&self, text: String) -> Result<TranslationResult, TranslationServiceError>;
}

#[async_trait]
impl TranslationServiceApi for TranslationService {
    async fn translate(&self, text: String) -> Result<TranslationResult, TranslationServiceError> {
        // 1. Empty input short-circuits
        if text.trim().is_empty() {
            return Err(TranslationServiceError::Invalid(
                EMPTY_INPUT_WARNING.to_string(),
            ));
        }

        tracing::info!(text_length = text.chars().count(), "Translation request");

        // 2. Detect source language
        let detected = self.detector.detect(&text);
        tracing::info!(
            language_detected = %detected.code,
            source_tag = detected.tag,
            mapped = detected.mapped,
            "Language detected"
        );

        // 3. Translate
        let translated_text = self.translate_text(&text, &detected).await?;

        // 4. Synthesize speech
        let audio = self.synthesize(&translated_text).await?;
        let audio_format = sniff_audio_format(&audio).ok_or_else(|| {
            TranslationServiceError::Dependency(
                "Speech synthesis returned unrecognized audio".to_string(),
            )
        })?;

        // 5. Store artifact
        let artifact = self
            .audio_store
            .save(&translated_text, &audio)
            .await
            .context("Failed to store synthesized audio")?;

        tracing::info!(
            artifact_id = %artifact.id,
            language_detected = %detected.code,
            output_length = translated_text.chars().count(),
            audio_size = audio.len(),
            "Translation completed"
        );

        Ok(TranslationResult {
            artifact_id: artifact.id,
            detected,
            translated_text,
            audio_format,
            audio_size: audio.len(),
            created_at: artifact.created_at,
        })
    }
}

impl TranslationService {
    async fn translate_text(
        &self,
        text: &str,
        detected: &DetectedLanguage,
    ) -> Result<String, TranslationServiceError> {
        let translated = self
            .translator
            .translate(text, detected.tag)
            .await
            .map_err(TranslationServiceError::Dependency)?;

        let translated = translated.trim().to_string();
        if translated.is_empty() {
            return Err(TranslationServiceError::Dependency(
                "Translation produced no text".to_string(),
            ));
        }

        if !is_tamil_script(&translated) {
            tracing::warn!(
                tamil_ratio = tamil_script_ratio(&translated),
                source_tag = detected.tag,
                "Translation is mostly not in Tamil script"
            );
        }

        Ok(translated)
    }

    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, TranslationServiceError> {
        self.tts_repo
            .synthesize(text, TARGET_SPEECH_LANGUAGE)
            .await
            .map_err(TranslationServiceError::Dependency)
    }
}
