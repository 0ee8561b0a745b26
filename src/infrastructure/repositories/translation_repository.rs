use async_trait::async_trait;

/// Repository for machine translation into the fixed target language.
///
/// Two strategies implement it: a hosted pipeline bound to one model and a
/// local tokenizer + encoder/decoder pair. Both are interchangeable.
#[async_trait]
pub trait TranslationRepository: Send + Sync {
    /// Translate `text` written in `source_tag` (an NLLB tag such as
    /// `eng_Latn`) into Tamil
    ///
    /// # Errors
    /// Returns error if the model is unavailable or inference fails
    async fn translate(&self, text: &str, source_tag: &str) -> Result<String, String>;
}
