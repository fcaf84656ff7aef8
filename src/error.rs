/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - RepoError / JSON body の reject / validation error を統一的に変換
 * - 500 の詳細は body に出さず、tracing で server 側にだけ残す
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::RepoError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            // 404 は body なし
            AppError::NotFound { .. } => return StatusCode::NOT_FOUND.into_response(),
            AppError::PayloadTooLarge(message) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", message)
            }
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        // The request span carries the request id, so this line is the correlation point.
        tracing::error!(error = %e, "repository operation failed");
        AppError::Internal
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        // body limit を超えた場合は 413 のまま返す
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return AppError::PayloadTooLarge(rejection.body_text());
        }
        AppError::bad_request("INVALID_REQUEST_BODY", rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(res: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn bad_request_carries_code_and_message() {
        let res = AppError::bad_request("VALIDATION_FAILED", "title is required").into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let body = body_json(res).await;
        assert_eq!(body["error"]["code"], "VALIDATION_FAILED");
        assert_eq!(body["error"]["message"], "title is required");
    }

    #[tokio::test]
    async fn not_found_has_empty_body() {
        let res = AppError::not_found("post").into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn payload_too_large_keeps_its_status() {
        let res = AppError::PayloadTooLarge("length limit exceeded".into()).into_response();
        assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);

        let body = body_json(res).await;
        assert_eq!(body["error"]["code"], "PAYLOAD_TOO_LARGE");
    }

    #[tokio::test]
    async fn repo_error_becomes_opaque_internal() {
        let err: AppError = RepoError::Corrupt("secret detail".into()).into();
        let res = err.into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(res).await;
        assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
        assert!(!body.to_string().contains("secret detail"));
    }
}
