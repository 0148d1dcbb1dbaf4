//! Handlers for `/projects/{project_id}/tasks`.
//!
//! Task mutations that can change completion recompute the parent
//! project's `progress_percentage`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use atelier_core::types::DbId;
use atelier_db::models::task::{CreateTask, Task, UpdateTask};
use atelier_db::repositories::{ProjectRepo, TaskRepo};

use crate::error::{not_found, AppResult};
use crate::handlers::projects::ensure_project;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/tasks
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Task>>> {
    ensure_project(&state, user.user_id, project_id).await?;
    let tasks = TaskRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(tasks))
}

/// POST /api/v1/projects/{project_id}/tasks
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateTask>,
) -> AppResult<(StatusCode, Json<Task>)> {
    ensure_project(&state, user.user_id, project_id).await?;
    let task = TaskRepo::create(&state.pool, project_id, &input).await?;
    ProjectRepo::recompute_progress(&state.pool, project_id).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// PUT /api/v1/projects/{project_id}/tasks/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateTask>,
) -> AppResult<Json<Task>> {
    ensure_project(&state, user.user_id, project_id).await?;
    let task = TaskRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(not_found("Task", id))?;
    if input.status.is_some() {
        ProjectRepo::recompute_progress(&state.pool, project_id).await?;
    }
    Ok(Json(task))
}

/// DELETE /api/v1/projects/{project_id}/tasks/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project(&state, user.user_id, project_id).await?;
    let deleted = TaskRepo::delete(&state.pool, project_id, id).await?;
    if !deleted {
        return Err(not_found("Task", id));
    }
    ProjectRepo::recompute_progress(&state.pool, project_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
