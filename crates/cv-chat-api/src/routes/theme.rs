//! Theme endpoints.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use cv_protocol::theme::Theme;
use serde_json::{Value, json};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// GET /api/theme — current theme file contents.
pub async fn get_theme(State(state): State<AppState>) -> ApiResult<Json<Theme>> {
    let theme = state.themes.load().await.map_err(|e| {
        tracing::error!(error = %e, path = %state.themes.path().display(), "error reading theme file");
        ApiError::Internal("Failed to read theme data".into())
    })?;
    Ok(Json(theme))
}

/// POST /api/theme — validate and overwrite the theme file.
pub async fn update_theme(
    State(state): State<AppState>,
    payload: Result<Json<Theme>, JsonRejection>,
) -> ApiResult<Json<Value>> {
    let invalid = || ApiError::BadRequest("Invalid theme data".into());

    let Json(theme) = payload.map_err(|e| {
        tracing::debug!(error = %e, "rejected theme body");
        invalid()
    })?;
    theme.validate().map_err(|_| invalid())?;

    state.themes.save(&theme).await.map_err(|e| {
        tracing::error!(error = %e, "error updating theme");
        ApiError::Internal("Failed to update theme".into())
    })?;

    tracing::info!(primary = %theme.primary, variant = ?theme.variant, "theme updated");
    Ok(Json(json!({
        "success": true,
        "message": "Theme updated successfully",
    })))
}
