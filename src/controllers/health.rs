use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

/// Which backends this process was wired with
#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub translator: &'static str,
    pub tts: &'static str,
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

pub async fn health_ready(State(status): State<Arc<HealthStatus>>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ready",
            "translator": status.translator,
            "tts": status.tts,
        })),
    )
}
