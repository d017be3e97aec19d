// handlers/admin/approve.rs - POST /auth/approve-user/:id handler

use axum::{
    extract::{Path, State},
    response::Json,
};
use uuid::Uuid;

use crate::app::AppState;
use crate::database::models::AccountView;
use crate::error::ApiError;

/// POST /auth/approve-user/:id - Approve a pending account
///
/// Idempotent: approving an already approved account succeeds without
/// changing anything. 404 when the id does not exist.
pub async fn approve_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountView>, ApiError> {
    let account = state.auth.approve(id).await?;
    Ok(Json(AccountView::from(&account)))
}
