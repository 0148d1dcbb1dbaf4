//! HTTP-level integration tests for invoicing: lifecycle transitions,
//! line-item totals, and the client financial rollup.

mod common;

use axum::http::StatusCode;
use common::{authed_get, authed_post_json, body_json, seed_owner};
use sqlx::PgPool;

/// Create a client and return its id.
async fn make_client(pool: &PgPool, token: &str) -> i64 {
    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        token,
        "/api/v1/clients",
        serde_json::json!({ "name": "Billed Co", "contact_email": "ap@billed.example" }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a draft invoice and return its id.
async fn make_invoice(pool: &PgPool, token: &str, client_id: i64) -> i64 {
    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        token,
        "/api/v1/invoices",
        serde_json::json!({
            "client_id": client_id,
            "issue_date": "2026-03-01",
            "due_date": "2026-03-31",
            "subtotal": "1000.00",
            "tax": "150.00",
            "discount": "50.00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["status"], "DRAFT");
    assert_eq!(json["total"], "1100.00");
    json["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_invoice_number_is_generated(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let client_id = make_client(&pool, &token).await;

    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        "/api/v1/invoices",
        serde_json::json!({
            "client_id": client_id,
            "issue_date": "2026-03-01",
            "due_date": "2026-03-15",
        }),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["invoice_number"], "INV-2026-0001");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_line_items_drive_subtotal(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let client_id = make_client(&pool, &token).await;
    let invoice_id = make_invoice(&pool, &token, client_id).await;

    // Two items: 10h x 75.00 + 1 x 250.00 = 1000.00
    for body in [
        serde_json::json!({ "description": "Development", "quantity": "10", "rate": "75.00" }),
        serde_json::json!({ "description": "Hosting setup", "rate": "250.00" }),
    ] {
        let response = authed_post_json(
            common::build_test_app(pool.clone()),
            &token,
            &format!("/api/v1/invoices/{invoice_id}/items"),
            body,
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = authed_get(
        common::build_test_app(pool),
        &token,
        &format!("/api/v1/invoices/{invoice_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["subtotal"], "1000.00");
    // subtotal 1000 + tax 150 - discount 50
    assert_eq!(json["total"], "1100.00");
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_lifecycle_updates_client_totals(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let client_id = make_client(&pool, &token).await;
    let invoice_id = make_invoice(&pool, &token, client_id).await;

    // Draft invoices do not touch the balance.
    let response = authed_get(
        common::build_test_app(pool.clone()),
        &token,
        &format!("/api/v1/clients/{client_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["outstanding_balance"], "0.00");

    // Send: total lands in outstanding.
    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        &format!("/api/v1/invoices/{invoice_id}/send"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = authed_get(
        common::build_test_app(pool.clone()),
        &token,
        &format!("/api/v1/clients/{client_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["outstanding_balance"], "1100.00");
    assert_eq!(json["total_revenue"], "0.00");

    // Pay: outstanding drains into revenue.
    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        &format!("/api/v1/invoices/{invoice_id}/pay"),
        serde_json::json!({ "paid_date": "2026-03-20" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let paid = body_json(response).await;
    assert_eq!(paid["status"], "PAID");
    assert_eq!(paid["paid_date"], "2026-03-20");

    let response = authed_get(
        common::build_test_app(pool),
        &token,
        &format!("/api/v1/clients/{client_id}"),
    )
    .await;
    let json = body_json(response).await;
    assert_eq!(json["outstanding_balance"], "0.00");
    assert_eq!(json["total_revenue"], "1100.00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_draft_cannot_be_paid_directly(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let client_id = make_client(&pool, &token).await;
    let invoice_id = make_invoice(&pool, &token, client_id).await;

    let response = authed_post_json(
        common::build_test_app(pool),
        &token,
        &format!("/api/v1/invoices/{invoice_id}/pay"),
        serde_json::json!({}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_excess_discount_rejected(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let client_id = make_client(&pool, &token).await;

    let response = authed_post_json(
        common::build_test_app(pool),
        &token,
        "/api/v1/invoices",
        serde_json::json!({
            "client_id": client_id,
            "issue_date": "2026-03-01",
            "due_date": "2026-03-15",
            "subtotal": "100.00",
            "discount": "200.00",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
