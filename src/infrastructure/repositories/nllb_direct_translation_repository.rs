use super::nllb_generation::{build_source_ids, greedy_generate, GenerationParams};
use super::translation_repository::TranslationRepository;
use async_trait::async_trait;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Tensor;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokenizers::Tokenizer;
use tokio::sync::OnceCell;

const TOKENIZER_FILE: &str = "tokenizer.json";
const ENCODER_FILE: &str = "encoder_model.onnx";
const DECODER_FILE: &str = "decoder_model.onnx";
const EOS_TOKEN: &str = "</s>";

/// Tokenizer + encoder/decoder pair for an ONNX export of NLLB-200
struct NllbModel {
    tokenizer: Tokenizer,
    encoder: Session,
    decoder: Session,
    eos_token_id: u32,
    target_token_id: u32,
}

struct EncoderOutput {
    hidden: Vec<f32>,
    seq_len: usize,
    hidden_size: usize,
    attention_mask: Vec<i64>,
}

fn ort_err(e: ort::Error) -> String {
    format!("ONNX runtime error: {}", e)
}

fn load_session(path: &Path) -> Result<Session, String> {
    Session::builder()
        .and_then(|b| b.with_optimization_level(GraphOptimizationLevel::Level3))
        .and_then(|b| b.commit_from_file(path))
        .map_err(|e| format!("Failed to load {}: {}", path.display(), e))
}

impl NllbModel {
    fn load(dir: &Path, target_tag: &str) -> Result<Self, String> {
        let tokenizer = Tokenizer::from_file(dir.join(TOKENIZER_FILE))
            .map_err(|e| format!("Failed to load tokenizer: {}", e))?;
        let encoder = load_session(&dir.join(ENCODER_FILE))?;
        let decoder = load_session(&dir.join(DECODER_FILE))?;

        let eos_token_id = tokenizer
            .token_to_id(EOS_TOKEN)
            .ok_or_else(|| "Tokenizer has no </s> token".to_string())?;
        let target_token_id = tokenizer
            .token_to_id(target_tag)
            .ok_or_else(|| format!("Tokenizer has no token for {}", target_tag))?;

        Ok(Self {
            tokenizer,
            encoder,
            decoder,
            eos_token_id,
            target_token_id,
        })
    }

    fn translate(
        &self,
        text: &str,
        source_tag: &str,
        max_length: usize,
        max_input_tokens: usize,
    ) -> Result<String, String> {
        let source_tag_id = self
            .tokenizer
            .token_to_id(source_tag)
            .ok_or_else(|| format!("Tokenizer has no token for {}", source_tag))?;

        let encoding = self
            .tokenizer
            .encode(text, false)
            .map_err(|e| format!("Tokenization failed: {}", e))?;

        let body = encoding.get_ids();
        let source_ids = build_source_ids(source_tag_id, body, self.eos_token_id, max_input_tokens);
        if source_ids.len() - 2 < body.len() {
            tracing::warn!(
                input_tokens = body.len(),
                kept_tokens = source_ids.len() - 2,
                "Input truncated to the model's token budget"
            );
        }

        let encoder_output = self.encode(&source_ids)?;

        let params = GenerationParams {
            decoder_start_token_id: self.eos_token_id,
            forced_bos_token_id: self.target_token_id,
            eos_token_id: self.eos_token_id,
            max_length,
        };
        let output_ids = greedy_generate(&params, |prefix| self.next_logits(&encoder_output, prefix))?;

        self.tokenizer
            .decode(&output_ids, true)
            .map_err(|e| format!("Detokenization failed: {}", e))
    }

    fn encode(&self, source_ids: &[u32]) -> Result<EncoderOutput, String> {
        let seq_len = source_ids.len();
        let ids: Vec<i64> = source_ids.iter().map(|&id| i64::from(id)).collect();
        let attention_mask = vec![1i64; seq_len];

        let input_ids = Tensor::from_array(([1usize, seq_len], ids)).map_err(ort_err)?;
        let mask = Tensor::from_array(([1usize, seq_len], attention_mask.clone())).map_err(ort_err)?;

        let outputs = self
            .encoder
            .run(ort::inputs!["input_ids" => input_ids, "attention_mask" => mask].map_err(ort_err)?)
            .map_err(ort_err)?;
        let (shape, hidden) = outputs["last_hidden_state"]
            .try_extract_raw_tensor::<f32>()
            .map_err(ort_err)?;

        let hidden_size = shape
            .last()
            .map(|&d| d as usize)
            .ok_or_else(|| "Encoder returned a scalar".to_string())?;

        Ok(EncoderOutput {
            hidden: hidden.to_vec(),
            seq_len,
            hidden_size,
            attention_mask,
        })
    }

    fn next_logits(&self, encoder: &EncoderOutput, prefix: &[u32]) -> Result<Vec<f32>, String> {
        let len = prefix.len();
        let ids: Vec<i64> = prefix.iter().map(|&id| i64::from(id)).collect();

        let input_ids = Tensor::from_array(([1usize, len], ids)).map_err(ort_err)?;
        let hidden = Tensor::from_array((
            [1usize, encoder.seq_len, encoder.hidden_size],
            encoder.hidden.clone(),
        ))
        .map_err(ort_err)?;
        let mask = Tensor::from_array(([1usize, encoder.seq_len], encoder.attention_mask.clone()))
            .map_err(ort_err)?;

        let outputs = self
            .decoder
            .run(
                ort::inputs![
                    "input_ids" => input_ids,
                    "encoder_hidden_states" => hidden,
                    "encoder_attention_mask" => mask,
                ]
                .map_err(ort_err)?,
            )
            .map_err(ort_err)?;
        let (shape, logits) = outputs["logits"]
            .try_extract_raw_tensor::<f32>()
            .map_err(ort_err)?;

        let vocab = shape
            .last()
            .map(|&d| d as usize)
            .filter(|&v| v > 0 && v <= logits.len())
            .ok_or_else(|| "Decoder returned malformed logits".to_string())?;

        Ok(logits[logits.len() - vocab..].to_vec())
    }
}

/// Direct strategy: tokenizer and model run in-process. The model is loaded
/// on first use and shared read-only afterwards.
pub struct NllbDirectTranslationRepository {
    model_dir: PathBuf,
    target_tag: String,
    max_length: usize,
    max_input_tokens: usize,
    model: OnceCell<Arc<NllbModel>>,
}

impl NllbDirectTranslationRepository {
    pub fn new(
        model_dir: PathBuf,
        target_tag: &str,
        max_length: usize,
        max_input_tokens: usize,
    ) -> Self {
        Self {
            model_dir,
            target_tag: target_tag.to_string(),
            max_length,
            max_input_tokens,
            model: OnceCell::new(),
        }
    }

    async fn model(&self) -> Result<Arc<NllbModel>, String> {
        self.model
            .get_or_try_init(|| async {
                let dir = self.model_dir.clone();
                let target_tag = self.target_tag.clone();
                let start_time = std::time::Instant::now();

                tracing::info!(model_dir = %dir.display(), "Loading NLLB model");
                let model = tokio::task::spawn_blocking(move || NllbModel::load(&dir, &target_tag))
                    .await
                    .map_err(|e| format!("Model loading task failed: {}", e))??;
                tracing::info!(
                    latency_ms = start_time.elapsed().as_millis(),
                    "NLLB model loaded"
                );

                Ok::<_, String>(Arc::new(model))
            })
            .await
            .cloned()
    }
}

#[async_trait]
impl TranslationRepository for NllbDirectTranslationRepository {
    async fn translate(&self, text: &str, source_tag: &str) -> Result<String, String> {
        let model = self.model().await?;
        let start_time = std::time::Instant::now();

        let text_owned = text.to_string();
        let source_owned = source_tag.to_string();
        let max_length = self.max_length;
        let max_input_tokens = self.max_input_tokens;

        let translated = tokio::task::spawn_blocking(move || {
            model.translate(&text_owned, &source_owned, max_length, max_input_tokens)
        })
        .await
        .map_err(|e| format!("Inference task failed: {}", e))??;

        tracing::info!(
            strategy = "direct",
            src_lang = source_tag,
            latency_ms = start_time.elapsed().as_millis(),
            output_length = translated.chars().count(),
            "Translation completed"
        );

        Ok(translated)
    }
}
