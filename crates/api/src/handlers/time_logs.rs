//! Handlers for the `/time-logs` resource: manual entries, the live
//! timer, and billable summaries.
//!
//! Durations are always re-derived server-side (`atelier_core::timetrack`)
//! and capped at 24 hours; client-supplied durations are ignored.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use atelier_core::error::CoreError;
use atelier_core::status::TimeLogStatus;
use atelier_core::timetrack;
use atelier_core::types::DbId;
use atelier_db::models::time_log::{
    CreateTimeLog, StartTimer, TimeLog, TimeSummary, UpdateTimeLog,
};
use atelier_db::repositories::{ClientRepo, TimeLogRepo};
use atelier_db::{clamp_limit, clamp_offset};

use crate::error::{not_found, AppError, AppResult};
use crate::handlers::clients::ensure_client;
use crate::handlers::projects::ensure_project;
use crate::middleware::auth::AuthUser;
use crate::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::state::AppState;

/// Query params for `GET /time-logs`.
#[derive(Debug, Deserialize)]
pub struct TimeLogListQuery {
    pub status: Option<TimeLogStatus>,
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Query params for `GET /time-logs/summary`.
#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub client_id: DbId,
}

/// Check that any referenced client/project belongs to the caller.
async fn check_refs(
    state: &AppState,
    user_id: DbId,
    client_id: Option<DbId>,
    project_id: Option<DbId>,
) -> AppResult<()> {
    if let Some(client_id) = client_id {
        ensure_client(state, user_id, client_id).await?;
    }
    if let Some(project_id) = project_id {
        ensure_project(state, user_id, project_id).await?;
    }
    Ok(())
}

/// Refresh a client's denormalized balance after a log mutation.
async fn refresh_client(state: &AppState, client_id: Option<DbId>) -> AppResult<()> {
    if let Some(client_id) = client_id {
        ClientRepo::recalculate_financials(&state.pool, client_id).await?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/time-logs (manual entry)
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateTimeLog>,
) -> AppResult<(StatusCode, Json<TimeLog>)> {
    check_refs(&state, user.user_id, input.client_id, input.project_id).await?;

    let (end_time, duration) = match input.end_time {
        Some(end) => {
            let capped = timetrack::capped_end(input.start_time, end);
            (Some(capped), timetrack::duration_minutes(input.start_time, capped))
        }
        None => (None, 0),
    };

    let log = TimeLogRepo::create(&state.pool, user.user_id, &input, end_time, duration).await?;
    if log.status == TimeLogStatus::Completed && log.is_billable {
        refresh_client(&state, log.client_id).await?;
    }
    Ok((StatusCode::CREATED, Json(log)))
}

/// GET /api/v1/time-logs
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<TimeLogListQuery>,
) -> AppResult<Json<Vec<TimeLog>>> {
    let logs = TimeLogRepo::list(
        &state.pool,
        user.user_id,
        query.status,
        query.client_id,
        query.project_id,
        clamp_limit(query.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        clamp_offset(query.offset),
    )
    .await?;
    Ok(Json(logs))
}

/// GET /api/v1/time-logs/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TimeLog>> {
    let log = TimeLogRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(not_found("TimeLog", id))?;
    Ok(Json(log))
}

/// PUT /api/v1/time-logs/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateTimeLog>,
) -> AppResult<Json<TimeLog>> {
    let existing = TimeLogRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(not_found("TimeLog", id))?;
    check_refs(&state, user.user_id, input.client_id, input.project_id).await?;

    // Re-derive the duration from the merged timestamps.
    let start_time = input.start_time.unwrap_or(existing.start_time);
    let (end_time, duration) = match input.end_time.or(existing.end_time) {
        Some(end) => {
            let capped = timetrack::capped_end(start_time, end);
            (Some(capped), timetrack::duration_minutes(start_time, capped))
        }
        None => (None, 0),
    };

    let log = TimeLogRepo::update(
        &state.pool,
        user.user_id,
        id,
        &input,
        start_time,
        end_time,
        duration,
    )
    .await?
    .ok_or(not_found("TimeLog", id))?;

    // Both the previous and (possibly different) current client are touched.
    refresh_client(&state, existing.client_id).await?;
    if log.client_id != existing.client_id {
        refresh_client(&state, log.client_id).await?;
    }
    Ok(Json(log))
}

/// DELETE /api/v1/time-logs/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = TimeLogRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(not_found("TimeLog", id))?;
    TimeLogRepo::delete(&state.pool, user.user_id, id).await?;
    refresh_client(&state, existing.client_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Timer
// ---------------------------------------------------------------------------

/// POST /api/v1/time-logs/start
///
/// One running timer per user; a second start is rejected until the first
/// stops.
pub async fn start(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<StartTimer>,
) -> AppResult<(StatusCode, Json<TimeLog>)> {
    check_refs(&state, user.user_id, input.client_id, input.project_id).await?;

    if let Some(running) = TimeLogRepo::find_running(&state.pool, user.user_id).await? {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A timer is already running (id {})",
            running.id
        ))));
    }

    let log = TimeLogRepo::start_timer(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// POST /api/v1/time-logs/{id}/stop
pub async fn stop(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<TimeLog>> {
    let existing = TimeLogRepo::find_by_id(&state.pool, user.user_id, id)
        .await?
        .ok_or(not_found("TimeLog", id))?;

    if !matches!(
        existing.status,
        TimeLogStatus::Running | TimeLogStatus::Paused
    ) {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Time log {id} is not running"
        ))));
    }

    let end = timetrack::capped_end(existing.start_time, Utc::now());
    let duration = timetrack::duration_minutes(existing.start_time, end);

    let log = TimeLogRepo::stop_timer(&state.pool, user.user_id, id, end, duration)
        .await?
        .ok_or(not_found("TimeLog", id))?;

    if log.is_billable {
        refresh_client(&state, log.client_id).await?;
    }
    Ok(Json(log))
}

/// GET /api/v1/time-logs/running
pub async fn running(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Option<TimeLog>>> {
    let log = TimeLogRepo::find_running(&state.pool, user.user_id).await?;
    Ok(Json(log))
}

/// GET /api/v1/time-logs/summary?client_id=
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SummaryQuery>,
) -> AppResult<Json<TimeSummary>> {
    ensure_client(&state, user.user_id, query.client_id).await?;
    let summary =
        TimeLogRepo::summary_for_client(&state.pool, user.user_id, query.client_id).await?;
    Ok(Json(summary))
}
