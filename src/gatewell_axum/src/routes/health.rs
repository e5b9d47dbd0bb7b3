use axum::{Json, response::IntoResponse};

use super::MessageResponse;

/// Liveness probe.
pub async fn health() -> impl IntoResponse {
    Json(MessageResponse::new("ok"))
}
