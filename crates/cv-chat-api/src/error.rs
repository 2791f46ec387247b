//! Unified API error type with Axum `IntoResponse` support.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cv_protocol::chat::Source;
use serde_json::json;

/// Shown to the user when chat handling fails unexpectedly.
pub const CHAT_APOLOGY: &str = "Sorry, I'm having trouble processing your request. Please try again or contact our support team.";

/// API error type that converts to proper HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("internal error: {0}")]
    Internal(String),

    /// Unexpected failure in the chat path. Body carries `source: "error"`.
    #[error("chat failure: {0}")]
    Chat(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": msg })),
            ApiError::Chat(detail) => {
                tracing::error!(detail = %detail, "chat request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": CHAT_APOLOGY, "source": Source::Error }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Convenience alias.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn bad_request_response() {
        let response = ApiError::BadRequest("Message is required".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Message is required");
        assert!(json.get("source").is_none());
    }

    #[tokio::test]
    async fn internal_error_response() {
        let response = ApiError::Internal("Failed to read theme data".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["error"], "Failed to read theme data");
    }

    #[tokio::test]
    async fn chat_error_hides_detail() {
        let response = ApiError::Chat("task panicked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        assert_eq!(json["source"], "error");
        assert_eq!(json["error"], CHAT_APOLOGY);
    }
}
