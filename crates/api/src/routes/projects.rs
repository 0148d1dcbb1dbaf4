//! Route definitions for the `/projects` resource.
//!
//! Nests milestone, task, note, and file routes under
//! `/projects/{project_id}/...`.

use axum::routing::{delete, get, put};
use axum::Router;

use crate::handlers::{milestones, project_files, project_notes, projects, tasks};
use crate::state::AppState;

/// Routes mounted at `/projects`.
pub fn router() -> Router<AppState> {
    let milestone_routes = Router::new()
        .route("/", get(milestones::list_by_project).post(milestones::create))
        .route("/{id}", put(milestones::update).delete(milestones::delete));

    let task_routes = Router::new()
        .route("/", get(tasks::list_by_project).post(tasks::create))
        .route("/{id}", put(tasks::update).delete(tasks::delete));

    let note_routes = Router::new()
        .route(
            "/",
            get(project_notes::list_by_project).post(project_notes::create),
        )
        .route(
            "/{id}",
            put(project_notes::update).delete(project_notes::delete),
        );

    let file_routes = Router::new()
        .route(
            "/",
            get(project_files::list_by_project).post(project_files::create),
        )
        .route("/{id}", delete(project_files::delete));

    Router::new()
        .route("/", get(projects::list).post(projects::create))
        .route(
            "/{id}",
            get(projects::get_by_id)
                .put(projects::update)
                .delete(projects::delete),
        )
        .route("/{id}/time-summary", get(projects::time_summary))
        .nest("/{project_id}/milestones", milestone_routes)
        .nest("/{project_id}/tasks", task_routes)
        .nest("/{project_id}/notes", note_routes)
        .nest("/{project_id}/files", file_routes)
}
