//! Route definitions for the `/clients` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::clients;
use crate::state::AppState;

/// Routes mounted at `/clients`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(clients::list).post(clients::create))
        .route(
            "/{id}",
            get(clients::get_by_id)
                .put(clients::update)
                .delete(clients::delete),
        )
        .route("/{id}/recalculate", post(clients::recalculate))
        .route(
            "/{id}/contacts",
            get(clients::list_contacts).post(clients::create_contact),
        )
        .route(
            "/{id}/contacts/{contact_id}",
            axum::routing::put(clients::update_contact).delete(clients::delete_contact),
        )
        .route(
            "/{id}/notes",
            get(clients::list_notes).post(clients::create_note),
        )
        .route(
            "/{id}/notes/{note_id}",
            axum::routing::put(clients::update_note).delete(clients::delete_note),
        )
}
