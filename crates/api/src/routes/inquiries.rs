//! Route definitions for the `/inquiries` resource.
//!
//! `POST /` is the public intake endpoint; everything else requires auth
//! (enforced by the `AuthUser` extractor on each handler).

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::inquiries;
use crate::state::AppState;

/// Routes mounted at `/inquiries`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(inquiries::list).post(inquiries::create))
        .route(
            "/{id}",
            get(inquiries::get_by_id)
                .put(inquiries::update)
                .delete(inquiries::delete),
        )
        .route("/{id}/convert-client", post(inquiries::convert_client))
        .route("/{id}/convert-project", post(inquiries::convert_project))
}
