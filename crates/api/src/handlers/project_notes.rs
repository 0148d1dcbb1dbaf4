//! Handlers for `/projects/{project_id}/notes`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use atelier_core::types::DbId;
use atelier_db::models::project_note::{CreateProjectNote, ProjectNote, UpdateProjectNote};
use atelier_db::repositories::ProjectNoteRepo;

use crate::error::{not_found, AppResult};
use crate::handlers::projects::ensure_project;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/notes
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectNote>>> {
    ensure_project(&state, user.user_id, project_id).await?;
    let notes = ProjectNoteRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(notes))
}

/// POST /api/v1/projects/{project_id}/notes
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateProjectNote>,
) -> AppResult<(StatusCode, Json<ProjectNote>)> {
    ensure_project(&state, user.user_id, project_id).await?;
    let note = ProjectNoteRepo::create(&state.pool, project_id, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /api/v1/projects/{project_id}/notes/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateProjectNote>,
) -> AppResult<Json<ProjectNote>> {
    ensure_project(&state, user.user_id, project_id).await?;
    let note = ProjectNoteRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(not_found("ProjectNote", id))?;
    Ok(Json(note))
}

/// DELETE /api/v1/projects/{project_id}/notes/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project(&state, user.user_id, project_id).await?;
    let deleted = ProjectNoteRepo::delete(&state.pool, project_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("ProjectNote", id))
    }
}
