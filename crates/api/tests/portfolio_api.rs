//! HTTP-level integration tests for the public portfolio surface.

mod common;

use axum::http::StatusCode;
use common::{authed_post_json, body_json, get, seed_owner};
use sqlx::PgPool;

/// Create a client and a portfolio-visible project, returning the slug.
async fn publish_project(pool: &PgPool, token: &str) -> String {
    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        token,
        "/api/v1/clients",
        serde_json::json!({ "name": "Showcase", "contact_email": "s@example.com" }),
    )
    .await;
    let client_id = body_json(response).await["id"].as_i64().unwrap();

    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        token,
        "/api/v1/projects",
        serde_json::json!({
            "client_id": client_id,
            "title": "Fintech Dashboard Redesign",
            "intro": "A ground-up rebuild of a trading dashboard.",
            "client_type": "Startup",
            "industry": "Fintech",
            "budget": "25000.00",
            "hourly_rate": "120.00",
            "technologies": ["React", "PostgreSQL"],
            "case_study": { "startingPoint": "Legacy spreadsheet workflow" },
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let project = body_json(response).await;
    project["slug"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_slug_derived_from_title(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let slug = publish_project(&pool, &token).await;
    assert_eq!(slug, "fintech-dashboard-redesign");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_portfolio_is_public_and_sanitized(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let slug = publish_project(&pool, &token).await;

    // Listing works without any credentials.
    let response = get(common::build_test_app(pool.clone()), "/api/v1/portfolio").await;
    assert_eq!(response.status(), StatusCode::OK);
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["slug"], slug.as_str());

    // Detail exposes the case study but none of the financials.
    let response = get(
        common::build_test_app(pool),
        &format!("/api/v1/portfolio/{slug}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["title"], "Fintech Dashboard Redesign");
    assert_eq!(json["case_study"]["startingPoint"], "Legacy spreadsheet workflow");
    assert!(json.get("budget").is_none(), "budget must not be public");
    assert!(
        json.get("hourly_rate").is_none(),
        "rates must not be public"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_slug_returns_404(pool: PgPool) {
    let response = get(common::build_test_app(pool), "/api/v1/portfolio/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_project_without_intro_stays_private(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;

    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        "/api/v1/clients",
        serde_json::json!({ "name": "Quiet", "contact_email": "q@example.com" }),
    )
    .await;
    let client_id = body_json(response).await["id"].as_i64().unwrap();

    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        "/api/v1/projects",
        serde_json::json!({ "client_id": client_id, "title": "Internal Tooling" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = get(common::build_test_app(pool), "/api/v1/portfolio").await;
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 0);
}
