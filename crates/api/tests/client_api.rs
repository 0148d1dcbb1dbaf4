//! HTTP-level integration tests for the clients resource, including
//! owner scoping.

mod common;

use axum::http::StatusCode;
use common::{
    authed_delete, authed_get, authed_post_json, authed_put_json, body_json, seed_owner,
    seed_user,
};
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_client_returns_201(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;

    let app = common::build_test_app(pool);
    let response = authed_post_json(
        app,
        &token,
        "/api/v1/clients",
        serde_json::json!({
            "name": "ACME Corp",
            "contact_email": "billing@acme.example",
            "company": "ACME",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "ACME Corp");
    assert_eq!(json["status"], "ACTIVE");
    assert_eq!(json["payment_terms"], "Net 30");
    assert_eq!(json["total_revenue"], "0.00");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_client_rejects_bad_email(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;

    let app = common::build_test_app(pool);
    let response = authed_post_json(
        app,
        &token,
        "/api/v1/clients",
        serde_json::json!({ "name": "Bad", "contact_email": "not-an-email" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_clients_are_owner_scoped(pool: PgPool) {
    seed_owner(&pool).await;
    seed_user(&pool, "other", "staff").await;

    let admin_token = common::login(common::build_test_app(pool.clone()), "admin").await;
    let other_token = common::login(common::build_test_app(pool.clone()), "other").await;

    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &admin_token,
        "/api/v1/clients",
        serde_json::json!({ "name": "Private", "contact_email": "p@example.com" }),
    )
    .await;
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    // The other user sees an empty list and a 404 on direct access.
    let response = authed_get(
        common::build_test_app(pool.clone()),
        &other_token,
        "/api/v1/clients",
    )
    .await;
    let list = body_json(response).await;
    assert_eq!(list.as_array().unwrap().len(), 0);

    let response = authed_get(
        common::build_test_app(pool.clone()),
        &other_token,
        &format!("/api/v1/clients/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // The owner still sees it.
    let response = authed_get(
        common::build_test_app(pool),
        &admin_token,
        &format!("/api/v1/clients/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_and_delete_client(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;

    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        "/api/v1/clients",
        serde_json::json!({ "name": "Old Name", "contact_email": "c@example.com" }),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let response = authed_put_json(
        common::build_test_app(pool.clone()),
        &token,
        &format!("/api/v1/clients/{id}"),
        serde_json::json!({ "name": "New Name", "status": "INACTIVE" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["name"], "New Name");
    assert_eq!(json["status"], "INACTIVE");

    let response = authed_delete(
        common::build_test_app(pool.clone()),
        &token,
        &format!("/api/v1/clients/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = authed_get(
        common::build_test_app(pool),
        &token,
        &format!("/api/v1/clients/{id}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_primary_contact_is_exclusive(pool: PgPool) {
    seed_owner(&pool).await;
    let token = common::login(common::build_test_app(pool.clone()), "admin").await;

    let response = authed_post_json(
        common::build_test_app(pool.clone()),
        &token,
        "/api/v1/clients",
        serde_json::json!({ "name": "Contactful", "contact_email": "c@example.com" }),
    )
    .await;
    let client_id = body_json(response).await["id"].as_i64().unwrap();

    for (name, primary) in [("First", true), ("Second", true)] {
        let response = authed_post_json(
            common::build_test_app(pool.clone()),
            &token,
            &format!("/api/v1/clients/{client_id}/contacts"),
            serde_json::json!({
                "name": name,
                "email": format!("{}@example.com", name.to_lowercase()),
                "is_primary": primary,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = authed_get(
        common::build_test_app(pool),
        &token,
        &format!("/api/v1/clients/{client_id}/contacts"),
    )
    .await;
    let contacts = body_json(response).await;
    let primaries: Vec<_> = contacts
        .as_array()
        .unwrap()
        .iter()
        .filter(|c| c["is_primary"].as_bool().unwrap())
        .collect();
    assert_eq!(primaries.len(), 1, "only one primary contact may remain");
    assert_eq!(primaries[0]["name"], "Second");
}
