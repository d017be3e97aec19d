// handlers/admin/reject.rs - POST /auth/reject-user/:id handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::error::ApiError;

/// POST /auth/reject-user/:id - Reject a pending account
///
/// Rejection deletes the record outright; the username and email become
/// available for registration again. 404 when the id does not exist.
pub async fn reject_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    state.auth.reject(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
