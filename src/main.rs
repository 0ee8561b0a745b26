use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tamil_translate::controllers::{
    health::HealthStatus, page::PageController, translation::TranslationController,
};
use tamil_translate::domain::language::{LanguageDetector, DEFAULT_SOURCE_TAG, TARGET_TAG};
use tamil_translate::domain::translation::TranslationService;
use tamil_translate::infrastructure::config::{Config, LogFormat, TranslatorStrategy, TtsProvider};
use tamil_translate::infrastructure::http::{build_router, start_http_server};
use tamil_translate::infrastructure::repositories::{
    AudioStore, GoogleTtsRepository, HfPipelineTranslationRepository, OpenAiTtsRepository,
    TranslationRepository, TtsRepository,
};

const UPSTREAM_TIMEOUT: Duration = Duration::from_secs(120);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = if config.is_development() { "development" } else { "production" },
        "Starting Tamil translation service on {}:{}",
        config.host,
        config.port
    );

    let config = Arc::new(config);
    let http_client = reqwest::Client::builder()
        .timeout(UPSTREAM_TIMEOUT)
        .build()?;

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate repositories
    tracing::info!("Instantiating repositories...");
    let translator = build_translator(&config, http_client.clone())?;
    let tts_repo = build_tts(&config, http_client);
    let audio_store = Arc::new(AudioStore::new(config.artifact_ttl()?)?);
    tracing::info!(
        ttl_minutes = config.artifact_ttl_minutes,
        "Artifacts expire after idle time"
    );

    // 2. Instantiate services
    tracing::info!("Instantiating services...");
    let detector = Arc::new(LanguageDetector::new());
    let translation_service = Arc::new(TranslationService::new(
        detector,
        translator,
        tts_repo,
        audio_store.clone(),
    ));

    // 3. Instantiate controllers
    tracing::info!("Instantiating controllers...");
    let translation_controller = Arc::new(TranslationController::new(
        translation_service.clone(),
        audio_store,
    ));
    let page_controller = Arc::new(PageController::new(translation_service));
    let health_status = Arc::new(HealthStatus {
        translator: config.translator_strategy.as_str(),
        tts: config.tts_provider.as_str(),
    });

    // Start HTTP server with all routes
    let app = build_router(translation_controller, page_controller, health_status);
    start_http_server(config, app).await?;

    Ok(())
}

fn build_translator(
    config: &Config,
    http_client: reqwest::Client,
) -> Result<Arc<dyn TranslationRepository>, Box<dyn std::error::Error>> {
    match config.translator_strategy {
        TranslatorStrategy::Pipeline => {
            let repo = HfPipelineTranslationRepository::new(
                http_client,
                &config.hf_api_url,
                &config.translation_model,
                config.hf_api_token.clone(),
                DEFAULT_SOURCE_TAG,
                TARGET_TAG,
                config.max_output_tokens,
            );
            tracing::info!(
                endpoint = repo.endpoint(),
                has_token = config.hf_api_token.is_some(),
                "Using hosted translation pipeline"
            );
            Ok(Arc::new(repo))
        }
        #[cfg(feature = "onnx")]
        TranslatorStrategy::Direct => {
            tracing::info!(
                model_dir = %config.nllb_model_dir.display(),
                "Using local NLLB model, loaded on first request"
            );
            Ok(Arc::new(
                tamil_translate::infrastructure::repositories::NllbDirectTranslationRepository::new(
                    config.nllb_model_dir.clone(),
                    TARGET_TAG,
                    config.max_output_tokens,
                    config.max_input_tokens,
                ),
            ))
        }
        #[cfg(not(feature = "onnx"))]
        TranslatorStrategy::Direct => Err(Box::new(
            tamil_translate::infrastructure::config::ConfigError::DirectStrategyUnavailable,
        )),
    }
}

fn build_tts(config: &Config, http_client: reqwest::Client) -> Arc<dyn TtsRepository> {
    match config.tts_provider {
        TtsProvider::Google => {
            tracing::info!(endpoint = %config.google_tts_url, "Using Google TTS");
            Arc::new(GoogleTtsRepository::new(
                http_client,
                config.google_tts_url.clone(),
            ))
        }
        TtsProvider::OpenAi => {
            tracing::info!(
                model = %config.openai_tts_model,
                voice = %config.openai_tts_voice,
                "Using OpenAI TTS"
            );
            let has_api_key = std::env::var("OPENAI_API_KEY").is_ok();
            if !has_api_key {
                tracing::warn!("OPENAI_API_KEY not set; speech synthesis requests will fail");
            }
            Arc::new(OpenAiTtsRepository::new(
                Arc::new(async_openai::Client::new()),
                config.openai_tts_model.clone(),
                config.openai_tts_voice.clone(),
            ))
        }
    }
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tamil_translate=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
