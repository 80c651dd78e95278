//! GET /health

use axum::{extract::State, http::StatusCode, response::Response};
use serde::{Deserialize, Serialize};

use crate::{response::render, AppState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"healthy"` or `"unhealthy"`
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Answers 200 when the store responds to a ping, 503 otherwise.
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.store.ping().await {
        Ok(()) => render(StatusCode::OK, HealthResponse::new("healthy")),
        Err(err) => {
            tracing::warn!(error = %err, "health check failed");
            render(
                StatusCode::SERVICE_UNAVAILABLE,
                HealthResponse::new("unhealthy"),
            )
        }
    }
}
