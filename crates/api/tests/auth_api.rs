//! HTTP-level integration tests for authentication.

mod common;

use axum::http::StatusCode;
use common::{authed_get, body_json, post_json, seed_owner, TEST_PASSWORD};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_login_returns_tokens(pool: PgPool) {
    seed_owner(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "admin", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["user"]["username"], "admin");
    assert_eq!(json["user"]["role"], "admin");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_wrong_password_rejected(pool: PgPool) {
    seed_owner(&pool).await;
    let app = common::build_test_app(pool);

    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "admin", "password": "not-the-password" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_account_locks_after_failed_attempts(pool: PgPool) {
    seed_owner(&pool).await;

    // Five bad passwords trip the lock.
    for _ in 0..5 {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/auth/login",
            serde_json::json!({ "username": "admin", "password": "wrong" }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the correct password is refused while locked.
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "admin", "password": TEST_PASSWORD }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_refresh_rotates_tokens(pool: PgPool) {
    seed_owner(&pool).await;

    let app = common::build_test_app(pool.clone());
    let login_resp = post_json(
        app,
        "/api/v1/auth/login",
        serde_json::json!({ "username": "admin", "password": TEST_PASSWORD }),
    )
    .await;
    let login_json = body_json(login_resp).await;
    let refresh_token = login_json["refresh_token"].as_str().unwrap().to_string();

    // First refresh succeeds and hands out a different token.
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_ne!(json["refresh_token"].as_str().unwrap(), refresh_token);

    // Replaying the consumed token fails (rotation).
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/auth/refresh",
        serde_json::json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_me_requires_token(pool: PgPool) {
    seed_owner(&pool).await;

    let app = common::build_test_app(pool.clone());
    let response = common::get(app, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let app = common::build_test_app(pool.clone());
    let token = common::login(app, "admin").await;

    let app = common::build_test_app(pool);
    let response = authed_get(app, &token, "/api/v1/auth/me").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["username"], "admin");
    assert!(json.get("password_hash").is_none(), "hash must never leak");
}
