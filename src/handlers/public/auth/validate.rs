// handlers/public/auth/validate.rs - GET /auth/validate handler

use axum::{http::HeaderMap, response::Json};
use serde_json::{json, Value};

use crate::auth::validate_jwt;
use crate::middleware::bearer_token;

/// GET /auth/validate - Structural token check
///
/// Reports whether the presented bearer token is well-formed, correctly
/// signed and unexpired. This is a client convenience only; it does not
/// consult the account store, so a valid-looking token for a deleted
/// account still reports `valid: true` here and is rejected by the
/// request guard on any protected route.
pub async fn validate_get(headers: HeaderMap) -> Json<Value> {
    let claims = bearer_token(&headers).and_then(|token| validate_jwt(&token).ok());

    match claims {
        Some(claims) => Json(json!({
            "valid": true,
            "subject": claims.sub,
            "role": claims.role,
            "expires_at": claims.exp,
        })),
        None => Json(json!({ "valid": false })),
    }
}
