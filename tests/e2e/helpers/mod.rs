use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tamil_translate::{
    controllers::{health::HealthStatus, page::PageController, translation::TranslationController},
    domain::{language::LanguageDetector, translation::TranslationService},
    infrastructure::{
        http::build_router,
        repositories::{AudioStore, TranslationRepository, TtsRepository},
    },
};
use once_cell::sync::Lazy;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

pub mod api_client;
pub mod assertions;

use api_client::TestClient;
use fixtures::{FakeTranslator, FakeTts};

// Building the detector loads language models, share one across tests
static DETECTOR: Lazy<Arc<LanguageDetector>> = Lazy::new(|| Arc::new(LanguageDetector::new()));

pub struct TestContext {
    pub client: TestClient,
    pub translator: Arc<FakeTranslator>,
    pub tts: Arc<FakeTts>,
    pub audio_store: Arc<AudioStore>,
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            let translator = Arc::new(FakeTranslator::tamil());
            let tts = Arc::new(FakeTts::mp3());
            TestContext::with_fakes(translator, tts).await
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // The audio store removes its temp directory on drop
        }
    }
}

impl TestContext {
    /// Start the app on an ephemeral port with the given fake backends
    pub async fn with_fakes(translator: Arc<FakeTranslator>, tts: Arc<FakeTts>) -> Self {
        let (client, audio_store) = spawn_app(translator.clone(), tts.clone()).await;

        Self {
            client,
            translator,
            tts,
            audio_store,
        }
    }
}

/// Serve the full router on 127.0.0.1 with any translator and speech backend
pub async fn spawn_app(
    translator: Arc<dyn TranslationRepository>,
    tts: Arc<dyn TtsRepository>,
) -> (TestClient, Arc<AudioStore>) {
    let audio_store = Arc::new(
        AudioStore::new(Duration::from_secs(300)).expect("Failed to create audio store"),
    );
    let app = create_app(translator, tts, audio_store.clone());

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Wait for server to be ready
    tokio::time::sleep(Duration::from_millis(50)).await;

    (TestClient::new(&base_url), audio_store)
}

fn create_app(
    translator: Arc<dyn TranslationRepository>,
    tts: Arc<dyn TtsRepository>,
    audio_store: Arc<AudioStore>,
) -> Router {
    let translation_service = Arc::new(TranslationService::new(
        DETECTOR.clone(),
        translator,
        tts,
        audio_store.clone(),
    ));

    let translation_controller = Arc::new(TranslationController::new(
        translation_service.clone(),
        audio_store,
    ));
    let page_controller = Arc::new(PageController::new(translation_service));
    let health_status = Arc::new(HealthStatus {
        translator: "fake",
        tts: "fake",
    });

    build_router(translation_controller, page_controller, health_status)
}
