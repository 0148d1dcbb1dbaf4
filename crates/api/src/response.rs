//! Shared response envelope types for API handlers.
//!
//! Entity CRUD endpoints return the bare entity JSON. Aggregate endpoints
//! (dashboard, analytics) wrap their payload in a `{ "data": ... }`
//! envelope via [`DataResponse`] for a consistent widget-facing shape.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
