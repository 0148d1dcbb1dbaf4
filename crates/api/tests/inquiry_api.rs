//! HTTP-level integration tests for lead intake and conversion.

mod common;

use axum::http::StatusCode;
use common::{authed_get, authed_post_json, body_json, post_json, seed_owner};
use sqlx::PgPool;

/// Submit an inquiry through the public intake endpoint.
async fn submit_inquiry(pool: &PgPool) -> serde_json::Value {
    let response = post_json(
        common::build_test_app(pool.clone()),
        "/api/v1/inquiries",
        serde_json::json!({
            "client_name": "Dana Prospect",
            "client_email": "dana@prospect.example",
            "client_company": "Prospect GmbH",
            "message": "We need a new marketing site with a CMS.",
            "service_requested": "WEB_DEV",
            "budget_range": "MID_5K_10K",
            "timeline": "MONTH_ONE",
            "source": "REFERRAL",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_public_intake_scores_and_assigns(pool: PgPool) {
    let owner_id = seed_owner(&pool).await;
    let json = submit_inquiry(&pool).await;

    assert_eq!(json["status"], "NEW");
    assert_eq!(json["user_id"].as_i64().unwrap(), owner_id);
    // budget 20 + timeline 12 + source 20 + service 15
    assert_eq!(json["lead_score"], 67);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_intake_fails_without_owner_account(pool: PgPool) {
    // No user seeded: the configured owner does not exist.
    let response = post_json(
        common::build_test_app(pool),
        "/api/v1/inquiries",
        serde_json::json!({
            "client_name": "Nobody",
            "client_email": "n@example.com",
            "message": "hello",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_listing_requires_auth(pool: PgPool) {
    seed_owner(&pool).await;
    submit_inquiry(&pool).await;

    let response = common::get(common::build_test_app(pool.clone()), "/api/v1/inquiries").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let response = authed_get(common::build_test_app(pool), &token, "/api/v1/inquiries").await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_convert_to_client_marks_won(pool: PgPool) {
    seed_owner(&pool).await;
    let inquiry = submit_inquiry(&pool).await;
    let inquiry_id = inquiry["id"].as_i64().unwrap();

    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        &format!("/api/v1/inquiries/{inquiry_id}/convert-client"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let client = body_json(response).await;
    assert_eq!(client["name"], "Dana Prospect");
    assert_eq!(client["contact_email"], "dana@prospect.example");

    let response = authed_get(
        common::build_test_app(pool.clone()),
        &token,
        &format!("/api/v1/inquiries/{inquiry_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["status"], "WON");
    assert_eq!(json["converted_client_id"], client["id"]);

    // A second conversion is refused.
    let response = authed_post_json(
        common::build_test_app(pool),
        &token,
        &format!("/api/v1/inquiries/{inquiry_id}/convert-client"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_convert_to_project_seeds_defaults(pool: PgPool) {
    seed_owner(&pool).await;
    let inquiry = submit_inquiry(&pool).await;
    let inquiry_id = inquiry["id"].as_i64().unwrap();

    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let response = authed_post_json(
        common::build_test_app(pool),
        &token,
        &format!("/api/v1/inquiries/{inquiry_id}/convert-project"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = body_json(response).await;

    assert_eq!(project["title"], "Web Development Project");
    assert_eq!(project["status"], "PLANNING");
    assert_eq!(project["inquiry_id"].as_i64().unwrap(), inquiry_id);
    // MID_5K_10K midpoint.
    assert_eq!(project["budget"], "7500.00");
    // 80h baseline x 0.75 budget multiplier.
    assert_eq!(project["estimated_hours"], "60.00");
    assert_eq!(project["hourly_rate"], "50.00");
}
