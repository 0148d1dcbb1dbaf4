//! Route definitions for the `/time-logs` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::time_logs;
use crate::state::AppState;

/// Routes mounted at `/time-logs`.
///
/// Literal segments (`/start`, `/running`, `/summary`) are registered
/// before `/{id}`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(time_logs::list).post(time_logs::create))
        .route("/start", post(time_logs::start))
        .route("/running", get(time_logs::running))
        .route("/summary", get(time_logs::summary))
        .route(
            "/{id}",
            get(time_logs::get_by_id)
                .put(time_logs::update)
                .delete(time_logs::delete),
        )
        .route("/{id}/stop", post(time_logs::stop))
}
