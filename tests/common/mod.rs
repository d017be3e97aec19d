#![allow(dead_code)]

use anyhow::Result;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use hotel_api_rust::app::{app, AppState};
use hotel_api_rust::auth::BootstrapAdminResolver;
use hotel_api_rust::database::MemoryAccountStore;

/// Fresh application over an empty in-memory store, no sentinel.
pub fn test_app() -> Router {
    app(AppState::new(Arc::new(MemoryAccountStore::new()), None))
}

/// Fresh application with the emergency admin identity enabled.
pub fn test_app_with_sentinel() -> Router {
    let sentinel = BootstrapAdminResolver::new("ADMIN1", "password").expect("sentinel credential");
    app(AppState::new(Arc::new(MemoryAccountStore::new()), Some(sentinel)))
}

/// Registration body in the client wire format.
pub fn registration_body(name: &str) -> Value {
    json!({
        "userName": name,
        "email": format!("{name}@example.com"),
        "password": "rightpw",
        "contactNumber": format!("c-{name}"),
        "mobileNumber": format!("m-{name}"),
        "companyName": "Acme Travel",
        "address": "1 Main St",
        "city": "Pune",
        "state": "MH",
        "concerningPersonName": "A Person"
    })
}

pub async fn request(
    app: &Router,
    method: Method,
    path: &str,
    body: Option<Value>,
    token: Option<&str>,
) -> Result<(StatusCode, Value)> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?,
        None => builder.body(Body::empty())?,
    };

    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok((status, value))
}

pub async fn post_json(
    app: &Router,
    path: &str,
    body: Value,
    token: Option<&str>,
) -> Result<(StatusCode, Value)> {
    request(app, Method::POST, path, Some(body), token).await
}

pub async fn get(app: &Router, path: &str, token: Option<&str>) -> Result<(StatusCode, Value)> {
    request(app, Method::GET, path, None, token).await
}

/// Register an account, asserting success. Returns the created account body.
pub async fn register(app: &Router, name: &str) -> Result<Value> {
    let (status, body) = post_json(app, "/auth/register", registration_body(name), None).await?;
    anyhow::ensure!(status == StatusCode::CREATED, "register {name} failed: {status} {body}");
    Ok(body)
}

/// Log in and return the bearer token, asserting success.
pub async fn login(app: &Router, username: &str, password: &str) -> Result<String> {
    let (status, body) = post_json(
        app,
        "/auth/login",
        json!({ "username": username, "password": password }),
        None,
    )
    .await?;
    anyhow::ensure!(status == StatusCode::OK, "login {username} failed: {status} {body}");
    Ok(body["token"].as_str().expect("token in login response").to_string())
}
