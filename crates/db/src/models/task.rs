//! Project task model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::status::{Priority, TaskStatus};
use atelier_core::types::{DbId, Money, Timestamp};

/// A task row from the `project_tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Task {
    pub id: DbId,
    pub project_id: DbId,
    pub milestone_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: Priority,
    pub assigned_to: Option<String>,
    pub estimated_hours: Money,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a task.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTask {
    pub milestone_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
    pub estimated_hours: Option<Money>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a task. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTask {
    pub milestone_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub assigned_to: Option<String>,
    pub estimated_hours: Option<Money>,
    pub sort_order: Option<i32>,
}
