// handlers/public/auth/login.rs - POST /auth/login handler

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::auth::{generate_jwt, AuthError, Claims};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "userName")]
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
}

/// POST /auth/login - Authenticate and receive a bearer token
///
/// Unknown username, wrong password and a not-yet-approved account all
/// produce the same 401 body, so callers cannot probe account state. The
/// distinct reasons are logged server-side.
pub async fn login_post(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let identity = state.auth.authenticate(&body.username, &body.password).await?;

    let claims = Claims::new(identity.subject, identity.role);
    let token = generate_jwt(&claims).map_err(AuthError::Token)?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer",
        expires_in: claims.expires_in(),
    }))
}
