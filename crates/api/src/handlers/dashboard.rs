//! Handlers for the admin dashboard summary.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use atelier_core::types::Money;
use atelier_db::models::milestone::Milestone;
use atelier_db::models::system_log::SystemLog;
use atelier_db::models::time_log::TimeLog;
use atelier_db::repositories::analytics_repo::DashboardCounts;
use atelier_db::repositories::{AnalyticsRepo, MilestoneRepo, SystemLogRepo, TimeLogRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Window for the upcoming-deadlines widget, in days.
const UPCOMING_WINDOW_DAYS: i32 = 14;

/// Rows shown in the deadline and activity widgets.
const WIDGET_ROWS: i64 = 10;

/// Payload for `GET /dashboard/summary`.
#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub counts: DashboardCounts,
    pub outstanding_total: Money,
    pub overdue_total: Money,
    pub upcoming_milestones: Vec<Milestone>,
    pub recent_activity: Vec<SystemLog>,
    pub running_timer: Option<TimeLog>,
}

/// GET /api/v1/dashboard/summary
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<DashboardSummary>>> {
    let pool = &state.pool;

    let counts = AnalyticsRepo::dashboard_counts(pool, user.user_id).await?;
    let outstanding_total = AnalyticsRepo::outstanding_total(pool, user.user_id).await?;
    let overdue_total = AnalyticsRepo::overdue_total(pool, user.user_id).await?;
    let upcoming_milestones =
        MilestoneRepo::upcoming_for_user(pool, user.user_id, UPCOMING_WINDOW_DAYS, WIDGET_ROWS)
            .await?;
    let recent_activity = SystemLogRepo::recent(pool, WIDGET_ROWS).await?;
    let running_timer = TimeLogRepo::find_running(pool, user.user_id).await?;

    Ok(Json(DataResponse {
        data: DashboardSummary {
            counts,
            outstanding_total,
            overdue_total,
            upcoming_milestones,
            recent_activity,
            running_timer,
        },
    }))
}
