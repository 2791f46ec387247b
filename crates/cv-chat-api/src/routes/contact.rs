//! Contact form relay.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use cv_protocol::contact::{ContactRecord, ContactSubmission};
use serde_json::{Value, json};

use crate::state::AppState;

/// POST /api/contact — accept a contact form submission.
pub async fn submit_contact(
    State(state): State<AppState>,
    payload: Result<Json<ContactSubmission>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    let submission = match payload {
        Ok(Json(submission)) => submission,
        Err(e) => {
            tracing::debug!(error = %e, "rejected contact body");
            return missing_fields();
        }
    };

    let record = match ContactRecord::from_submission(submission) {
        Ok(record) => record,
        Err(e) => {
            tracing::debug!(error = %e, "incomplete contact submission");
            return missing_fields();
        }
    };

    tracing::info!(
        contact_id = %record.id,
        email = %record.email,
        company = %record.company,
        "contact form submission"
    );
    state.contacts.push(record).await;

    (
        StatusCode::OK,
        Json(json!({
            "success": true,
            "message": "Thank you for your message! We will get back to you soon.",
        })),
    )
}

fn missing_fields() -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({
            "success": false,
            "message": "Missing required fields",
        })),
    )
}
