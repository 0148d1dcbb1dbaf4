//! Well-known role name constants.
//!
//! These must match the CHECK constraint on `users.role` in
//! `20260715000001_create_users_and_sessions.sql`.

/// The studio owner. The only role allowed to touch admin settings,
/// user management, and system logs.
pub const ROLE_ADMIN: &str = "admin";

/// A collaborator account with access to day-to-day CRM resources but
/// not the admin surface.
pub const ROLE_STAFF: &str = "staff";
