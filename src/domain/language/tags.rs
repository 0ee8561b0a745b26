use serde::Serialize;

/// NLLB tag used whenever the detected code has no entry in the table
pub const DEFAULT_SOURCE_TAG: &str = "eng_Latn";

/// Code substituted when detection yields nothing
pub const DEFAULT_SOURCE_CODE: &str = "en";

/// Every translation targets Tamil in Tamil script
pub const TARGET_TAG: &str = "tam_Taml";

/// Spoken-language code handed to the speech synthesizer
pub const TARGET_SPEECH_LANGUAGE: &str = "ta";

/// ISO 639-1 code to NLLB language tag
const LANGUAGE_TABLE: &[(&str, &str)] = &[
    ("en", "eng_Latn"),
    ("fr", "fra_Latn"),
    ("hi", "hin_Deva"),
    ("ta", "tam_Taml"),
    ("de", "deu_Latn"),
    ("es", "spa_Latn"),
    ("it", "ita_Latn"),
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SupportedLanguage {
    pub code: &'static str,
    pub tag: &'static str,
}

/// Look up the NLLB tag for an ISO 639-1 code
pub fn lookup_tag(code: &str) -> Option<&'static str> {
    LANGUAGE_TABLE
        .iter()
        .find(|(c, _)| c.eq_ignore_ascii_case(code))
        .map(|(_, tag)| *tag)
}

/// Map a code to its NLLB tag, falling back to English for unknown codes
pub fn nllb_tag_for(code: &str) -> &'static str {
    lookup_tag(code).unwrap_or(DEFAULT_SOURCE_TAG)
}

pub fn supported_languages() -> Vec<SupportedLanguage> {
    LANGUAGE_TABLE
        .iter()
        .map(|(code, tag)| SupportedLanguage { code, tag })
        .collect()
}
