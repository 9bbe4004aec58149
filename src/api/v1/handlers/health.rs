/*
 * Responsibility
 * - GET /api/v1/health (liveness)
 * - Still behind the gate: plain-HTTP health checks get the 403
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
