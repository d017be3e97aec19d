// handlers/public/auth/check_user.rs - GET /auth/check-user/:username handler

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde_json::{json, Value};

use crate::app::AppState;
use crate::error::ApiError;

/// GET /auth/check-user/:username - Username availability probe
///
/// Only reflects registered accounts; the configured emergency admin
/// identity is not reported.
pub async fn check_user_get(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let exists = state.auth.username_exists(&username).await?;
    Ok(Json(json!({ "exists": exists })))
}
