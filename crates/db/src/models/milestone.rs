//! Project milestone model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::status::MilestoneStatus;
use atelier_core::types::{Date, DbId, Timestamp};

/// A milestone row from the `project_milestones` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Milestone {
    pub id: DbId,
    pub project_id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub due_date: Date,
    pub status: MilestoneStatus,
    pub sort_order: i32,
    pub is_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a milestone.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateMilestone {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Date,
    pub status: Option<MilestoneStatus>,
    pub sort_order: Option<i32>,
}

/// DTO for updating a milestone. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMilestone {
    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<Date>,
    pub status: Option<MilestoneStatus>,
    pub sort_order: Option<i32>,
    pub is_completed: Option<bool>,
}
