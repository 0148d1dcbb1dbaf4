//! Route definitions for the `/invoices` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::invoices;
use crate::state::AppState;

/// Routes mounted at `/invoices`.
///
/// `/overdue` is registered before `/{id}` so the literal segment wins.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(invoices::list).post(invoices::create))
        .route("/overdue", get(invoices::list_overdue))
        .route(
            "/{id}",
            get(invoices::get_by_id)
                .put(invoices::update)
                .delete(invoices::delete),
        )
        .route("/{id}/send", post(invoices::send))
        .route("/{id}/pay", post(invoices::pay))
        .route("/{id}/cancel", post(invoices::cancel))
        .route("/{id}/bill-time", post(invoices::bill_time))
        .route(
            "/{id}/items",
            get(invoices::list_items).post(invoices::create_item),
        )
        .route(
            "/{id}/items/{item_id}",
            put(invoices::update_item).delete(invoices::delete_item),
        )
}
