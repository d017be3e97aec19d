use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::app::AppState;
use crate::auth::{policy, validate_jwt, Capability};
use crate::database::models::Role;
use crate::error::ApiError;

/// Authenticated caller context resolved for the current request
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub subject: String,
    pub role: Role,
}

/// Per-request access guard: looks up the route's required capability,
/// validates the bearer token, and re-resolves the subject's current
/// role through the resolver chain. The role claim inside the token is
/// never trusted, so a rejection or deletion locks the holder out on
/// their very next request.
pub async fn access_guard(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let required = policy::standard_table().required(&method, &path);

    if required == Capability::Public {
        // Anonymous is fine here; attach a context opportunistically so
        // public handlers can still see who is asking. Invalid tokens on
        // public routes are ignored, not rejected.
        if let Some(token) = bearer_token(request.headers()) {
            if let Ok(claims) = validate_jwt(&token) {
                if let Ok(Some(identity)) = state.auth.resolve_subject(&claims.sub).await {
                    request.extensions_mut().insert(AuthContext {
                        subject: identity.subject,
                        role: identity.role,
                    });
                }
            }
        }
        return Ok(next.run(request).await);
    }

    let token = bearer_token(request.headers())
        .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

    let claims = validate_jwt(&token).map_err(|e| {
        warn!(%method, path, "Rejected token: {}", e);
        ApiError::unauthorized("Invalid or expired token")
    })?;

    let identity = state
        .auth
        .resolve_subject(&claims.sub)
        .await?
        .ok_or_else(|| {
            warn!(subject = %claims.sub, "Token subject no longer resolves to an account");
            ApiError::unauthorized("Invalid or expired token")
        })?;

    if required == Capability::Admin && identity.role != Role::Admin {
        warn!(subject = %identity.subject, %method, path, "Insufficient role for admin route");
        return Err(ApiError::forbidden("Administrator access required"));
    }

    request.extensions_mut().insert(AuthContext {
        subject: identity.subject,
        role: identity.role,
    });
    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth_str = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))?
        .to_str()
        .ok()?;

    let token = auth_str.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
