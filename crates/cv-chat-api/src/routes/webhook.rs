//! Dialogflow fulfillment webhook.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use cv_protocol::webhook::{
    WEBHOOK_ERROR_SOURCE, WEBHOOK_SOURCE, WEBHOOK_UNAVAILABLE_SOURCE, WebhookRequest,
    WebhookResponse,
};

use crate::intent::fulfillment::fulfillment_text;
use crate::state::AppState;

const UNAVAILABLE_TEXT: &str = "Chatbot service is currently unavailable. Please contact our support team at hello@conversofy.com.";
const ERROR_TEXT: &str = "Sorry, I encountered an error. Please try again or contact our support team at hello@conversofy.com.";

/// POST /api/dialogflow-webhook — fixed replies keyed by intent name.
pub async fn dialogflow_webhook(
    State(state): State<AppState>,
    payload: Result<Json<WebhookRequest>, JsonRejection>,
) -> (StatusCode, Json<WebhookResponse>) {
    if !state.resolver.provider().is_configured() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(WebhookResponse::new(
                UNAVAILABLE_TEXT,
                WEBHOOK_UNAVAILABLE_SOURCE,
            )),
        );
    }

    let request = match payload {
        Ok(Json(request)) => request,
        Err(e) => {
            tracing::warn!(error = %e, "webhook body rejected");
            return error_reply();
        }
    };

    if request.intent().is_none() {
        tracing::warn!("webhook request without intent");
        return error_reply();
    }

    // An intent without a display name falls through to the generic reply.
    let intent = request.intent_name().unwrap_or_default();
    tracing::info!(intent = %intent, "webhook fulfilled");
    let text = fulfillment_text(intent, &request);
    (
        StatusCode::OK,
        Json(WebhookResponse::new(text, WEBHOOK_SOURCE)),
    )
}

fn error_reply() -> (StatusCode, Json<WebhookResponse>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(WebhookResponse::new(ERROR_TEXT, WEBHOOK_ERROR_SOURCE)),
    )
}
