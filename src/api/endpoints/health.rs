//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::AppContext;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub backend_url: String,
    pub backend_reachable: bool,
    pub active_sessions: usize,
}

/// `GET /api/health`: front end status plus a probe of the prediction service.
pub async fn check(State(ctx): State<AppContext>) -> Json<HealthResponse> {
    let backend_reachable = match ctx.backend().health().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Prediction service health probe failed");
            false
        }
    };

    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        backend_url: ctx.backend_url().to_string(),
        backend_reachable,
        active_sessions: ctx.sessions.len().await,
    })
}
