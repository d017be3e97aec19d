// handlers/admin/pending.rs - GET /auth/pending-approvals handler

use axum::{extract::State, response::Json};

use crate::app::AppState;
use crate::database::models::AccountView;
use crate::error::ApiError;

/// GET /auth/pending-approvals - Accounts awaiting an approval decision
pub async fn pending_get(State(state): State<AppState>) -> Result<Json<Vec<AccountView>>, ApiError> {
    let pending = state.auth.pending_accounts().await?;
    Ok(Json(pending.iter().map(AccountView::from).collect()))
}
