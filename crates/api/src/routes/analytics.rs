//! Route definitions for the `/analytics` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::analytics;
use crate::state::AppState;

/// Routes mounted at `/analytics`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/business", get(analytics::business))
        .route(
            "/goals",
            get(analytics::get_goals).put(analytics::save_goals),
        )
}
