pub mod audio_store;
pub mod google_tts_repository;
pub mod hf_pipeline_translation_repository;
#[cfg(feature = "onnx")]
pub mod nllb_direct_translation_repository;
pub mod nllb_generation;
pub mod openai_tts_repository;
pub mod text_batching;
pub mod translation_repository;
pub mod tts_repository;

pub use audio_store::{AudioStore, StoredArtifact};
pub use google_tts_repository::GoogleTtsRepository;
pub use hf_pipeline_translation_repository::HfPipelineTranslationRepository;
#[cfg(feature = "onnx")]
pub use nllb_direct_translation_repository::NllbDirectTranslationRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use translation_repository::TranslationRepository;
pub use tts_repository::TtsRepository;
