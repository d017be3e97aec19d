use axum::http::{header, HeaderName, HeaderValue, Method};
use axum::{
    extract::State,
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::{AuthService, BootstrapAdminResolver};
use crate::config::{self, SecurityConfig};
use crate::database::AccountStore;
use crate::error::ApiError;
use crate::handlers::{admin, hotels, public::auth as public_auth};
use crate::middleware::access_guard;

#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub store: Arc<dyn AccountStore>,
    pub hotels: hotels::HotelDirectory,
}

impl AppState {
    pub fn new(store: Arc<dyn AccountStore>, sentinel: Option<BootstrapAdminResolver>) -> Self {
        Self {
            auth: Arc::new(AuthService::new(store.clone(), sentinel)),
            store,
            hotels: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

/// Assemble the full router. Every route, the fallback included, sits
/// behind the access guard; the policy table decides which ones tolerate
/// anonymous callers.
pub fn app(state: AppState) -> Router {
    let router = Router::new()
        // Public
        .route("/health", get(health))
        // Public auth routes
        .route("/auth/register", post(public_auth::register_post))
        .route("/auth/login", post(public_auth::login_post))
        .route("/auth/validate", get(public_auth::validate_get))
        .route("/auth/check-user/:username", get(public_auth::check_user_get))
        // Approval workflow (admin per policy)
        .route("/auth/pending-approvals", get(admin::pending_get))
        .route("/auth/approve-user/:id", post(admin::approve_post))
        .route("/auth/reject-user/:id", post(admin::reject_post))
        // Hotel directory (collaborator surface)
        .route("/hotels/all", get(hotels::all_get))
        .route("/hotels/add", post(hotels::add_post))
        .fallback(fallback_404)
        // Global middleware
        .layer(from_fn_with_state(state.clone(), access_guard));

    let security = &config::config().security;
    let router = if security.enable_cors {
        router.layer(cors_layer(security))
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Fixed method/header allow-list; the token travels back to browsers via
/// the exposed Authorization header.
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            header::ORIGIN,
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([header::AUTHORIZATION])
        .max_age(Duration::from_secs(3600));

    if security.cors_origins.iter().any(|o| o == "*") {
        layer.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

async fn health(State(state): State<AppState>) -> (axum::http::StatusCode, Json<Value>) {
    let now = chrono::Utc::now();

    match state.store.count().await {
        Ok(_) => (
            axum::http::StatusCode::OK,
            Json(json!({
                "status": "ok",
                "timestamp": now,
                "store": "ok"
            })),
        ),
        Err(e) => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "degraded",
                "timestamp": now,
                "store_error": e.to_string()
            })),
        ),
    }
}

async fn fallback_404() -> ApiError {
    ApiError::not_found("No such route")
}
