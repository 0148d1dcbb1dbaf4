//! Route tree assembly.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod inquiries;
pub mod invoices;
pub mod portfolio;
pub mod projects;
pub mod settings;
pub mod time_logs;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
/// /auth/me                                         current user
///
/// /clients                                         list, create
/// /clients/{id}                                    get, update, delete
/// /clients/{id}/recalculate                        financial recompute (POST)
/// /clients/{id}/contacts[/{contact_id}]            contact CRUD
/// /clients/{id}/notes[/{note_id}]                  note CRUD
///
/// /projects                                        list, create
/// /projects/{id}                                   get, update, delete
/// /projects/{id}/time-summary                      billable rollup (GET)
/// /projects/{project_id}/milestones[/{id}]         milestone CRUD
/// /projects/{project_id}/tasks[/{id}]              task CRUD
/// /projects/{project_id}/notes[/{id}]              note CRUD
/// /projects/{project_id}/files[/{id}]              file record CRUD
///
/// /invoices                                        list, create
/// /invoices/overdue                                overdue listing
/// /invoices/{id}                                   get, update, delete (draft)
/// /invoices/{id}/send|pay|cancel                   lifecycle (POST)
/// /invoices/{id}/bill-time                         attach unbilled hours (POST)
/// /invoices/{id}/items[/{item_id}]                 line item CRUD (draft)
///
/// /time-logs                                       list, create
/// /time-logs/start                                 start timer (POST)
/// /time-logs/running                               current timer (GET)
/// /time-logs/summary                               client rollup (GET)
/// /time-logs/{id}                                  get, update, delete
/// /time-logs/{id}/stop                             stop timer (POST)
///
/// /inquiries                                       list; create is PUBLIC
/// /inquiries/{id}                                  get, update, delete
/// /inquiries/{id}/convert-client                   conversion (POST)
/// /inquiries/{id}/convert-project                  conversion (POST)
///
/// /portfolio                                       public case-study list
/// /portfolio/{slug}                                public case study
///
/// /analytics/business                              business rollup (GET)
/// /analytics/goals                                 get, save goals
///
/// /dashboard/summary                               admin dashboard (GET)
///
/// /settings                                        get, save (admin only)
///
/// /admin/users                                     list, create (admin only)
/// /admin/users/{id}                                get, update, deactivate
/// /admin/users/{id}/reset-password                 reset password
/// /admin/system-logs                               log listing (admin only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (login, refresh, logout, me).
        .nest("/auth", auth::router())
        // Client relationship management.
        .nest("/clients", clients::router())
        // Projects and their nested milestones/tasks/notes/files.
        .nest("/projects", projects::router())
        // Invoicing and line items.
        .nest("/invoices", invoices::router())
        // Time tracking.
        .nest("/time-logs", time_logs::router())
        // Lead intake and pipeline.
        .nest("/inquiries", inquiries::router())
        // Public portfolio.
        .nest("/portfolio", portfolio::router())
        // Business analytics and goals.
        .nest("/analytics", analytics::router())
        // Admin dashboard summary.
        .nest("/dashboard", dashboard::router())
        // Admin settings.
        .nest("/settings", settings::router())
        // Admin surface (user management + system logs).
        .nest("/admin", admin::router())
}
