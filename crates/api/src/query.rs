//! Shared pagination constants for list endpoints.
//!
//! Each resource defines its own query struct (filters differ), but they
//! all clamp against the same page-size bounds via `atelier_db::clamp_limit`.

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 50;

/// Hard cap on page size.
pub const MAX_PAGE_SIZE: i64 = 200;
