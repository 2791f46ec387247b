//! Chat endpoint.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use cv_protocol::chat::{ChatRequest, ResponseEnvelope, UtteranceError};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// POST /api/chat — answer a visitor message.
///
/// Provider failures never surface here; only invalid input (400) and
/// unexpected internal faults (500) leave the 200 path.
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> ApiResult<Json<ResponseEnvelope>> {
    let Json(request) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected chat body");
        ApiError::BadRequest(UtteranceError::EmptyText.to_string())
    })?;

    let utterance = request
        .into_utterance()
        .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    // Resolve on its own task so a panic becomes a 500 rather than a dropped connection.
    let resolver = state.resolver.clone();
    let session_id = utterance.session_id().to_string();
    let envelope = tokio::spawn(async move { resolver.resolve(&utterance).await })
        .await
        .map_err(|e| ApiError::Chat(e.to_string()))?;

    tracing::info!(
        session_id = %session_id,
        source = ?envelope.source,
        intent = envelope.intent.as_deref().unwrap_or("-"),
        "chat resolved"
    );

    Ok(Json(envelope))
}
