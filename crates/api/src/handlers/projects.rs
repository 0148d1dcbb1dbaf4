//! Handlers for the `/projects` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use atelier_core::slug::slugify;
use atelier_core::status::ProjectStatus;
use atelier_core::types::DbId;
use atelier_db::models::project::{CreateProject, Project, UpdateProject};
use atelier_db::models::time_log::TimeSummary;
use atelier_db::repositories::{ProjectRepo, TimeLogRepo};
use atelier_db::{clamp_limit, clamp_offset};

use crate::error::{not_found, AppResult};
use crate::handlers::clients::ensure_client;
use crate::middleware::auth::AuthUser;
use crate::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::state::AppState;

/// Query params for `GET /projects`.
#[derive(Debug, Deserialize)]
pub struct ProjectListQuery {
    pub status: Option<ProjectStatus>,
    pub client_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Fetch a project owned by the caller or bail with 404.
///
/// All nested resources (milestones, tasks, notes, files, time summaries)
/// authorize through this check.
pub(crate) async fn ensure_project(
    state: &AppState,
    user_id: DbId,
    project_id: DbId,
) -> AppResult<Project> {
    ProjectRepo::find_by_id(&state.pool, user_id, project_id)
        .await?
        .ok_or(not_found("Project", project_id))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(mut input): Json<CreateProject>,
) -> AppResult<(StatusCode, Json<Project>)> {
    input.validate()?;
    ensure_client(&state, user.user_id, input.client_id).await?;

    // Projects with portfolio copy get a slug derived from the title
    // unless the caller picked one.
    if input.slug.is_none() && input.intro.is_some() {
        let derived = slugify(&input.title);
        if !derived.is_empty() {
            input.slug = Some(derived);
        }
    }

    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}

/// GET /api/v1/projects
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ProjectListQuery>,
) -> AppResult<Json<Vec<Project>>> {
    let projects = ProjectRepo::list(
        &state.pool,
        user.user_id,
        query.status,
        query.client_id,
        clamp_limit(query.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        clamp_offset(query.offset),
    )
    .await?;
    Ok(Json(projects))
}

/// GET /api/v1/projects/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Project>> {
    let project = ensure_project(&state, user.user_id, id).await?;
    Ok(Json(project))
}

/// PUT /api/v1/projects/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProject>,
) -> AppResult<Json<Project>> {
    input.validate()?;
    if let Some(client_id) = input.client_id {
        ensure_client(&state, user.user_id, client_id).await?;
    }
    let project = ProjectRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(not_found("Project", id))?;
    Ok(Json(project))
}

/// DELETE /api/v1/projects/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ProjectRepo::delete(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Project", id))
    }
}

/// GET /api/v1/projects/{id}/time-summary
pub async fn time_summary(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TimeSummary>> {
    ensure_project(&state, user.user_id, id).await?;
    let summary = TimeLogRepo::summary_for_project(&state.pool, user.user_id, id).await?;
    Ok(Json(summary))
}
