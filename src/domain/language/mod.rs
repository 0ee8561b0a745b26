pub mod detector;
pub mod script;
pub mod tags;

pub use detector::{DetectedLanguage, LanguageDetector};
pub use script::{is_tamil_script, tamil_script_ratio};
pub use tags::{
    nllb_tag_for, supported_languages, SupportedLanguage, DEFAULT_SOURCE_TAG, TARGET_SPEECH_LANGUAGE,
    TARGET_TAG,
};
