//! Handlers for `/analytics`: the business analytics rollup and goals.
//!
//! Everything is computed at request time by summing persisted rows; the
//! only denormalized figures in the system are the per-client totals.

use axum::extract::State;
use axum::Json;
use chrono::{Datelike, Duration, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use atelier_core::types::{Date, Money};
use atelier_db::models::goals::{SaveUserGoals, UserGoals};
use atelier_db::repositories::analytics_repo::ProjectCounts;
use atelier_db::repositories::{AnalyticsRepo, GoalsRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// One point of the monthly revenue trend.
#[derive(Debug, Serialize)]
pub struct MonthPoint {
    /// Short month label, e.g. `"Mar"`.
    pub month: String,
    pub amount: Money,
}

/// A top client row formatted for the analytics widget.
#[derive(Debug, Serialize)]
pub struct TopClientEntry {
    pub name: String,
    pub revenue: Money,
    pub hours: Decimal,
}

/// Progress against the monthly revenue target.
#[derive(Debug, Serialize)]
pub struct GoalProgress {
    pub monthly_revenue_target: Money,
    pub this_month_revenue: Money,
    pub progress_pct: Decimal,
}

/// Full business analytics payload for `GET /analytics/business`.
#[derive(Debug, Serialize)]
pub struct BusinessAnalytics {
    pub total_revenue: Money,
    pub total_hours: Decimal,
    pub average_rate: Money,
    pub this_month_revenue: Money,
    pub last_month_revenue: Money,
    pub monthly_growth_pct: Decimal,
    pub monthly_revenue: Vec<MonthPoint>,
    pub top_clients: Vec<TopClientEntry>,
    pub projects: ProjectCounts,
    pub conversion_rate_pct: Decimal,
    pub goal_progress: Option<GoalProgress>,
}

/// First day of the month containing `date`.
fn month_start(date: Date) -> Date {
    date.with_day(1).expect("day 1 is always valid")
}

/// First day of the month after the one containing `date`.
fn next_month_start(date: Date) -> Date {
    month_start(month_start(date) + Duration::days(32))
}

/// Minutes per hour, as a decimal divisor.
fn sixty() -> Decimal {
    Decimal::from(60)
}

/// GET /api/v1/analytics/business
pub async fn business(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<DataResponse<BusinessAnalytics>>> {
    let pool = &state.pool;
    let today = Utc::now().date_naive();

    let this_month = month_start(today);
    let last_month = month_start(this_month - Duration::days(1));
    let six_months_ago = month_start(today - Duration::days(180));

    let total_revenue = AnalyticsRepo::revenue_total(pool, user.user_id).await?;

    let total_minutes = AnalyticsRepo::total_logged_minutes(pool, user.user_id).await?;
    let total_hours = (Decimal::from(total_minutes) / sixty()).round_dp(1);

    let average_rate = if total_hours > Decimal::ZERO {
        (total_revenue / total_hours).round_dp(2)
    } else {
        Decimal::ZERO
    };

    let this_month_revenue =
        AnalyticsRepo::revenue_between(pool, user.user_id, this_month, next_month_start(today))
            .await?;
    let last_month_revenue =
        AnalyticsRepo::revenue_between(pool, user.user_id, last_month, this_month).await?;

    let monthly_growth_pct = if last_month_revenue > Decimal::ZERO {
        ((this_month_revenue - last_month_revenue) / last_month_revenue * Decimal::ONE_HUNDRED).round_dp(1)
    } else {
        Decimal::ZERO
    };

    let monthly_revenue = AnalyticsRepo::monthly_revenue(pool, user.user_id, six_months_ago)
        .await?
        .into_iter()
        .map(|row| MonthPoint {
            month: row.month.format("%b").to_string(),
            amount: row.amount,
        })
        .collect();

    let top_clients = AnalyticsRepo::top_clients(pool, user.user_id, 3)
        .await?
        .into_iter()
        .map(|row| TopClientEntry {
            name: row.name,
            revenue: row.revenue,
            hours: (Decimal::from(row.billable_minutes) / sixty()).round_dp(1),
        })
        .collect();

    let projects = AnalyticsRepo::project_counts(pool, user.user_id).await?;

    let inquiries = AnalyticsRepo::inquiry_stats(pool, user.user_id).await?;
    let conversion_rate_pct = if inquiries.total > 0 {
        (Decimal::from(inquiries.won) / Decimal::from(inquiries.total) * Decimal::ONE_HUNDRED).round_dp(1)
    } else {
        Decimal::ZERO
    };

    let goal_progress = GoalsRepo::find_by_user(pool, user.user_id)
        .await?
        .and_then(|goals| goals.monthly_revenue_target)
        .filter(|target| *target > Decimal::ZERO)
        .map(|target| GoalProgress {
            monthly_revenue_target: target,
            this_month_revenue,
            progress_pct: (this_month_revenue / target * Decimal::ONE_HUNDRED).round_dp(1),
        });

    Ok(Json(DataResponse {
        data: BusinessAnalytics {
            total_revenue,
            total_hours,
            average_rate,
            this_month_revenue,
            last_month_revenue,
            monthly_growth_pct,
            monthly_revenue,
            top_clients,
            projects,
            conversion_rate_pct,
            goal_progress,
        },
    }))
}

/// GET /api/v1/analytics/goals
pub async fn get_goals(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Option<UserGoals>>> {
    let goals = GoalsRepo::find_by_user(&state.pool, user.user_id).await?;
    Ok(Json(goals))
}

/// PUT /api/v1/analytics/goals
pub async fn save_goals(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<SaveUserGoals>,
) -> AppResult<Json<UserGoals>> {
    let goals = GoalsRepo::upsert(&state.pool, user.user_id, &input).await?;
    Ok(Json(goals))
}
