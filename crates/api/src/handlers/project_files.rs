//! Handlers for `/projects/{project_id}/files` (metadata records only).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use atelier_core::types::DbId;
use atelier_db::models::project_file::{CreateProjectFile, ProjectFile};
use atelier_db::repositories::ProjectFileRepo;

use crate::error::{not_found, AppResult};
use crate::handlers::projects::ensure_project;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/files
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<ProjectFile>>> {
    ensure_project(&state, user.user_id, project_id).await?;
    let files = ProjectFileRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(files))
}

/// POST /api/v1/projects/{project_id}/files
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateProjectFile>,
) -> AppResult<(StatusCode, Json<ProjectFile>)> {
    ensure_project(&state, user.user_id, project_id).await?;
    let file = ProjectFileRepo::create(&state.pool, project_id, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(file)))
}

/// DELETE /api/v1/projects/{project_id}/files/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project(&state, user.user_id, project_id).await?;
    let deleted = ProjectFileRepo::delete(&state.pool, project_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("ProjectFile", id))
    }
}
