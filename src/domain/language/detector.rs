use lingua::{Language, LanguageDetector as LinguaDetector, LanguageDetectorBuilder};
use serde::Serialize;

use super::tags::{lookup_tag, DEFAULT_SOURCE_CODE, DEFAULT_SOURCE_TAG};

/// Languages the detector can recognise. Only some of them have an NLLB
/// tag in the table; the rest exercise the default-tag fallback.
const DETECTABLE_LANGUAGES: [Language; 14] = [
    Language::English,
    Language::French,
    Language::Hindi,
    Language::Tamil,
    Language::German,
    Language::Spanish,
    Language::Italian,
    Language::Portuguese,
    Language::Russian,
    Language::Arabic,
    Language::Japanese,
    Language::Chinese,
    Language::Bengali,
    Language::Telugu,
];

/// Outcome of source-language detection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetectedLanguage {
    /// ISO 639-1 code, `en` when detection failed
    pub code: String,
    /// NLLB tag passed to the translator
    pub tag: &'static str,
    /// False when the code had no table entry and the default tag was used
    pub mapped: bool,
}

impl DetectedLanguage {
    pub fn from_code(code: impl Into<String>) -> Self {
        let code = code.into();
        match lookup_tag(&code) {
            Some(tag) => Self {
                code,
                tag,
                mapped: true,
            },
            None => Self {
                code,
                tag: DEFAULT_SOURCE_TAG,
                mapped: false,
            },
        }
    }

    pub fn fallback() -> Self {
        Self::from_code(DEFAULT_SOURCE_CODE)
    }
}

/// Best-effort source language detection. Never fails.
pub struct LanguageDetector {
    inner: LinguaDetector,
}

impl LanguageDetector {
    pub fn new() -> Self {
        let inner = LanguageDetectorBuilder::from_languages(&DETECTABLE_LANGUAGES).build();
        Self { inner }
    }

    pub fn detect(&self, text: &str) -> DetectedLanguage {
        match self.inner.detect_language_of(text) {
            Some(language) => {
                let detected = DetectedLanguage::from_code(language.iso_code_639_1().to_string());
                if !detected.mapped {
                    tracing::info!(
                        code = %detected.code,
                        fallback_tag = detected.tag,
                        "Detected language has no model tag, using default"
                    );
                }
                detected
            }
            None => {
                tracing::warn!(
                    text_length = text.chars().count(),
                    fallback_code = DEFAULT_SOURCE_CODE,
                    "Could not detect language, falling back to default"
                );
                DetectedLanguage::fallback()
            }
        }
    }
}

impl Default for LanguageDetector {
    fn default() -> Self {
        Self::new()
    }
}
