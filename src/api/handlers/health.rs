/*
 * Responsibility
 * - GET /health (疎通用)
 * - repo には触らない (process が応答できるかだけ)
 */
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde_json::json;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}
