//! Liveness endpoint, mounted at the root (not under `/api/v1`).

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /healthz
///
/// Returns 200 with a db round-trip, 500 when the pool is unhealthy.
async fn healthz(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    atelier_db::health_check(&state.pool).await?;
    Ok(Json(json!({ "status": "ok" })))
}

/// Routes mounted at `/`.
pub fn router() -> Router<AppState> {
    Router::new().route("/healthz", get(healthz))
}
