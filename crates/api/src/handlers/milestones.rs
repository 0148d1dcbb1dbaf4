//! Handlers for `/projects/{project_id}/milestones`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use atelier_core::types::DbId;
use atelier_db::models::milestone::{CreateMilestone, Milestone, UpdateMilestone};
use atelier_db::repositories::MilestoneRepo;

use crate::error::{not_found, AppResult};
use crate::handlers::projects::ensure_project;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/v1/projects/{project_id}/milestones
pub async fn list_by_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Milestone>>> {
    ensure_project(&state, user.user_id, project_id).await?;
    let milestones = MilestoneRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(milestones))
}

/// POST /api/v1/projects/{project_id}/milestones
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateMilestone>,
) -> AppResult<(StatusCode, Json<Milestone>)> {
    ensure_project(&state, user.user_id, project_id).await?;
    let milestone = MilestoneRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(milestone)))
}

/// PUT /api/v1/projects/{project_id}/milestones/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateMilestone>,
) -> AppResult<Json<Milestone>> {
    ensure_project(&state, user.user_id, project_id).await?;
    let milestone = MilestoneRepo::update(&state.pool, project_id, id, &input)
        .await?
        .ok_or(not_found("Milestone", id))?;
    Ok(Json(milestone))
}

/// DELETE /api/v1/projects/{project_id}/milestones/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path((project_id, id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_project(&state, user.user_id, project_id).await?;
    let deleted = MilestoneRepo::delete(&state.pool, project_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Milestone", id))
    }
}
