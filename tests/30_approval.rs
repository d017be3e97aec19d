mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

/// The full account lifecycle: bootstrap admin, pending user, approval,
/// login, wrong password.
#[tokio::test]
async fn approval_lifecycle_end_to_end() -> Result<()> {
    let app = common::test_app();

    let alice = common::register(&app, "alice").await?;
    assert_eq!(alice["role"], "ADMIN");
    assert_eq!(alice["approved"], true);

    let bob = common::register(&app, "bob").await?;
    assert_eq!(bob["role"], "USER");
    assert_eq!(bob["approved"], false);
    let bob_id = bob["id"].as_str().unwrap().to_string();

    // Pending bob cannot log in yet
    let (status, _) = common::post_json(
        &app,
        "/auth/login",
        json!({ "username": "bob", "password": "rightpw" }),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Admin sees bob in the queue
    let admin_token = common::login(&app, "alice", "rightpw").await?;
    let (status, pending) = common::get(&app, "/auth/pending-approvals", Some(&admin_token)).await?;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = pending
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["bob"]);

    // Approve, then approve again: idempotent
    let (status, approved) = common::post_json(
        &app,
        &format!("/auth/approve-user/{bob_id}"),
        json!({}),
        Some(&admin_token),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["approved"], true);

    let (status, approved) = common::post_json(
        &app,
        &format!("/auth/approve-user/{bob_id}"),
        json!({}),
        Some(&admin_token),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["approved"], true);

    // Bob can log in now, but only with the right password
    common::login(&app, "bob", "rightpw").await?;
    let (status, _) = common::post_json(
        &app,
        "/auth/login",
        json!({ "username": "bob", "password": "wrongpw" }),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn reject_deletes_the_account_for_good() -> Result<()> {
    let app = common::test_app();
    common::register(&app, "alice").await?;
    let carol = common::register(&app, "carol").await?;
    let carol_id = carol["id"].as_str().unwrap().to_string();

    let admin_token = common::login(&app, "alice", "rightpw").await?;

    let (status, _) = common::post_json(
        &app,
        &format!("/auth/reject-user/{carol_id}"),
        json!({}),
        Some(&admin_token),
    )
    .await?;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Gone from the queue, cannot log in, id no longer resolves
    let (_, pending) = common::get(&app, "/auth/pending-approvals", Some(&admin_token)).await?;
    assert!(pending.as_array().unwrap().is_empty());

    let (status, _) = common::post_json(
        &app,
        "/auth/login",
        json!({ "username": "carol", "password": "rightpw" }),
        None,
    )
    .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = common::post_json(
        &app,
        &format!("/auth/approve-user/{carol_id}"),
        json!({}),
        Some(&admin_token),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The username is free again
    common::register(&app, "carol").await?;

    Ok(())
}

#[tokio::test]
async fn admin_actions_on_unknown_ids_are_not_found() -> Result<()> {
    let app = common::test_app();
    common::register(&app, "alice").await?;
    let admin_token = common::login(&app, "alice", "rightpw").await?;

    let ghost = uuid_like();
    let (status, _) = common::post_json(
        &app,
        &format!("/auth/approve-user/{ghost}"),
        json!({}),
        Some(&admin_token),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::post_json(
        &app,
        &format!("/auth/reject-user/{ghost}"),
        json!({}),
        Some(&admin_token),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    Ok(())
}

fn uuid_like() -> &'static str {
    "00000000-0000-4000-8000-000000000000"
}
