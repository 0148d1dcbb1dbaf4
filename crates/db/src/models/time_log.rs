//! Time log model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::status::TimeLogStatus;
use atelier_core::types::{DbId, Money, Timestamp};

/// A time log row from the `time_logs` table.
///
/// `duration_minutes` is derived from `start_time`/`end_time` on write and
/// capped at 24 hours. `invoice_id` is set once the log is billed.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TimeLog {
    pub id: DbId,
    pub user_id: DbId,
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    pub invoice_id: Option<DbId>,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub duration_minutes: i32,
    pub description: Option<String>,
    pub task_name: Option<String>,
    pub status: TimeLogStatus,
    pub is_billable: bool,
    pub hourly_rate: Option<Money>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a finished time log in one shot (manual entry).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimeLog {
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    pub start_time: Timestamp,
    pub end_time: Option<Timestamp>,
    pub description: Option<String>,
    pub task_name: Option<String>,
    pub status: Option<TimeLogStatus>,
    pub is_billable: Option<bool>,
    pub hourly_rate: Option<Money>,
}

/// DTO for starting a live timer: no end time, status forced to RUNNING.
#[derive(Debug, Clone, Deserialize)]
pub struct StartTimer {
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    pub description: Option<String>,
    pub task_name: Option<String>,
    pub is_billable: Option<bool>,
    pub hourly_rate: Option<Money>,
}

/// DTO for updating a time log. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTimeLog {
    pub client_id: Option<DbId>,
    pub project_id: Option<DbId>,
    pub task_id: Option<DbId>,
    pub milestone_id: Option<DbId>,
    pub start_time: Option<Timestamp>,
    pub end_time: Option<Timestamp>,
    pub description: Option<String>,
    pub task_name: Option<String>,
    pub status: Option<TimeLogStatus>,
    pub is_billable: Option<bool>,
    pub hourly_rate: Option<Money>,
}

/// Billable rollup for a client or project.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct TimeSummary {
    pub total_minutes: i64,
    pub billable_minutes: i64,
    pub billable_cost: Money,
}
