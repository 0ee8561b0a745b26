use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::Config;
use crate::{
    controllers::{
        health::{self, HealthStatus},
        page::PageController,
        translation::TranslationController,
    },
    infrastructure::middleware::request_id_middleware,
};

/// Assemble every route with its state and the shared layers
pub fn build_router(
    translation_controller: Arc<TranslationController>,
    page_controller: Arc<PageController>,
    health_status: Arc<HealthStatus>,
) -> Router {
    // Browser form
    let page_routes = Router::new()
        .route(
            "/",
            get(PageController::index).post(PageController::submit),
        )
        .with_state(page_controller);

    // JSON API and artifact downloads
    let api_routes = Router::new()
        .route("/api/translate", post(TranslationController::translate))
        .route(
            "/api/translations/:id/audio",
            get(TranslationController::get_audio),
        )
        .route(
            "/api/translations/:id/text",
            get(TranslationController::download_text),
        )
        .route("/api/languages", get(TranslationController::list_languages))
        .with_state(translation_controller);

    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(health_status)
        .merge(page_routes)
        .merge(api_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}

/// Start the HTTP server and serve until ctrl-c or SIGTERM
pub async fn start_http_server(
    config: Arc<Config>,
    app: Router,
) -> Result<(), Box<dyn std::error::Error>> {
    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
