use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Instant;

static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Record the application start time. Call once during startup.
pub fn record_start_time() {
    START_TIME.get_or_init(Instant::now);
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    /// `http` when proxying to the REST backend, `demo` when serving from memory.
    pub backend: String,
    pub uptime_seconds: u64,
    pub version: String,
}

impl HealthResponse {
    pub fn current(backend_mode: &str) -> Self {
        let uptime = START_TIME.get().map(|t| t.elapsed().as_secs()).unwrap_or(0);
        Self {
            status: "ok".to_string(),
            backend: backend_mode.to_string(),
            uptime_seconds: uptime,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health check handler.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::current(crate::backend::backend().mode()))
}

/// Router exposing `GET /health`.
pub fn health_router() -> Router {
    Router::new().route("/health", get(health_check))
}
