//! Route definitions for the public `/portfolio` surface.

use axum::routing::get;
use axum::Router;

use crate::handlers::portfolio;
use crate::state::AppState;

/// Routes mounted at `/portfolio`. No authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(portfolio::list))
        .route("/{slug}", get(portfolio::get_by_slug))
}
