//! HTTP-level integration tests for time tracking.

mod common;

use axum::http::StatusCode;
use common::{authed_get, authed_post_json, body_json, seed_owner};
use sqlx::PgPool;

async fn make_client(pool: &PgPool, token: &str) -> i64 {
    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        token,
        "/api/v1/clients",
        serde_json::json!({ "name": "Timed Co", "contact_email": "t@example.com" }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_start_and_stop_timer(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let client_id = make_client(&pool, &token).await;

    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        "/api/v1/time-logs/start",
        serde_json::json!({
            "client_id": client_id,
            "task_name": "Sprint work",
            "hourly_rate": "90.00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let started = body_json(response).await;
    assert_eq!(started["status"], "RUNNING");
    let log_id = started["id"].as_i64().unwrap();

    // The running endpoint reports it.
    let response = authed_get(
        common::build_test_app(pool.clone()),
        &token,
        "/api/v1/time-logs/running",
    )
    .await;
    let running = body_json(response).await;
    assert_eq!(running["id"].as_i64().unwrap(), log_id);

    // Stop completes the log and derives the duration.
    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        &format!("/api/v1/time-logs/{log_id}/stop"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let stopped = body_json(response).await;
    assert_eq!(stopped["status"], "COMPLETED");
    assert!(stopped["end_time"].is_string());

    // Nothing is running anymore.
    let response = authed_get(
        common::build_test_app(pool),
        &token,
        "/api/v1/time-logs/running",
    )
    .await;
    let running = body_json(response).await;
    assert!(running.is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_second_timer_rejected_while_running(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;

    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        "/api/v1/time-logs/start",
        serde_json::json!({ "task_name": "First" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = authed_post_json(
        common::build_test_app(pool),
        &token,
        "/api/v1/time-logs/start",
        serde_json::json!({ "task_name": "Second" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_manual_entry_capped_at_24_hours(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;

    let response = authed_post_json(
        common::build_test_app(pool),
        &token,
        "/api/v1/time-logs",
        serde_json::json!({
            "start_time": "2026-03-02T09:00:00Z",
            "end_time": "2026-03-05T09:00:00Z",
            "status": "COMPLETED",
            "description": "Forgot to stop the timer",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["duration_minutes"], 1440);
    assert_eq!(json["end_time"], "2026-03-03T09:00:00Z");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_billable_time_raises_outstanding_balance(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let client_id = make_client(&pool, &token).await;

    // 90 billable minutes at 100/h = 150.00 owed.
    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        "/api/v1/time-logs",
        serde_json::json!({
            "client_id": client_id,
            "start_time": "2026-03-02T09:00:00Z",
            "end_time": "2026-03-02T10:30:00Z",
            "status": "COMPLETED",
            "hourly_rate": "100.00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = authed_get(
        common::build_test_app(pool.clone()),
        &token,
        &format!("/api/v1/clients/{client_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["outstanding_balance"], "150.00");

    // The summary endpoint agrees.
    let response = authed_get(
        common::build_test_app(pool),
        &token,
        &format!("/api/v1/time-logs/summary?client_id={client_id}"),
    )
    .await;
    let summary = body_json(response).await;
    assert_eq!(summary["total_minutes"], 90);
    assert_eq!(summary["billable_cost"], "150.00");
}
