use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Longest idle lifetime accepted for stored artifacts (one week)
pub const MAX_ARTIFACT_TTL_MINUTES: u64 = 7 * 24 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Translation
    pub translator_strategy: TranslatorStrategy,
    pub translation_model: String,
    pub hf_api_url: String,
    pub hf_api_token: Option<String>,
    pub nllb_model_dir: PathBuf,
    pub max_output_tokens: usize,
    pub max_input_tokens: usize,
    // Speech synthesis
    pub tts_provider: TtsProvider,
    pub google_tts_url: String,
    pub openai_tts_model: String,
    pub openai_tts_voice: String,
    // Artifacts
    pub artifact_ttl_minutes: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TranslatorStrategy {
    /// Hosted translation pipeline bound to one model
    Pipeline,
    /// Local tokenizer + encoder/decoder pair
    Direct,
}

impl TranslatorStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslatorStrategy::Pipeline => "pipeline",
            TranslatorStrategy::Direct => "direct",
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsProvider {
    Google,
    OpenAi,
}

impl TtsProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TtsProvider::Google => "google",
            TtsProvider::OpenAi => "openai",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
    #[error("TRANSLATOR_STRATEGY=direct requires building with the `onnx` feature")]
    DirectStrategyUnavailable,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_var("PORT", "8080")?,
            environment: match var_or("ENVIRONMENT", "development").as_str() {
                "production" => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match var_or("LOG_FORMAT", "pretty").as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            translator_strategy: match var_or("TRANSLATOR_STRATEGY", "pipeline")
                .to_lowercase()
                .as_str()
            {
                "pipeline" => TranslatorStrategy::Pipeline,
                "direct" => TranslatorStrategy::Direct,
                other => {
                    return Err(ConfigError::InvalidValue {
                        name: "TRANSLATOR_STRATEGY",
                        value: other.to_string(),
                    })
                }
            },
            translation_model: var_or("TRANSLATION_MODEL", "facebook/nllb-200-distilled-600M"),
            hf_api_url: var_or("HF_API_URL", "https://api-inference.huggingface.co/models"),
            hf_api_token: env::var("HF_API_TOKEN").ok().filter(|t| !t.is_empty()),
            nllb_model_dir: PathBuf::from(var_or(
                "NLLB_MODEL_DIR",
                "./models/nllb-200-distilled-600M",
            )),
            max_output_tokens: parse_var("MAX_OUTPUT_TOKENS", "200")?,
            max_input_tokens: parse_var("MAX_INPUT_TOKENS", "1024")?,
            tts_provider: match var_or("TTS_PROVIDER", "google").to_lowercase().as_str() {
                "google" => TtsProvider::Google,
                "openai" => TtsProvider::OpenAi,
                other => {
                    return Err(ConfigError::InvalidValue {
                        name: "TTS_PROVIDER",
                        value: other.to_string(),
                    })
                }
            },
            google_tts_url: var_or(
                "GOOGLE_TTS_URL",
                "https://translate.google.com/translate_tts",
            ),
            openai_tts_model: var_or("OPENAI_TTS_MODEL", "tts-1"),
            openai_tts_voice: var_or("OPENAI_TTS_VOICE", "nova"),
            artifact_ttl_minutes: parse_var("ARTIFACT_TTL_MINUTES", "30")?,
        };

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.translator_strategy == TranslatorStrategy::Direct && !cfg!(feature = "onnx") {
            return Err(ConfigError::DirectStrategyUnavailable);
        }
        if self.max_output_tokens < 2 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_OUTPUT_TOKENS",
                value: self.max_output_tokens.to_string(),
            });
        }
        if self.max_input_tokens < 3 {
            return Err(ConfigError::InvalidValue {
                name: "MAX_INPUT_TOKENS",
                value: self.max_input_tokens.to_string(),
            });
        }
        if !(1..=MAX_ARTIFACT_TTL_MINUTES).contains(&self.artifact_ttl_minutes) {
            return Err(ConfigError::InvalidValue {
                name: "ARTIFACT_TTL_MINUTES",
                value: self.artifact_ttl_minutes.to_string(),
            });
        }
        Ok(())
    }

    /// Idle time after which a stored artifact is evicted
    pub fn artifact_ttl(&self) -> Result<Duration, ConfigError> {
        self.artifact_ttl_minutes
            .checked_mul(60)
            .map(Duration::from_secs)
            .ok_or_else(|| ConfigError::InvalidValue {
                name: "ARTIFACT_TTL_MINUTES",
                value: self.artifact_ttl_minutes.to_string(),
            })
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: &str) -> Result<T, ConfigError> {
    let value = var_or(name, default);
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { name, value })
}
