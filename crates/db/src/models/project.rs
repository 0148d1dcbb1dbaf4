//! Project entity model and DTOs, including the public portfolio view.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use atelier_core::status::{Priority, ProjectPhase, ProjectStatus};
use atelier_core::types::{Date, DbId, Money, Timestamp};

/// A project row from the `projects` table.
///
/// `progress_percentage` is derived from task completion and recomputed by
/// `TaskRepo` on every task status change.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub user_id: DbId,
    pub client_id: DbId,
    pub inquiry_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub intro: Option<String>,
    pub client_type: Option<String>,
    pub industry: Option<String>,
    pub logo: Option<String>,
    pub case_study: serde_json::Value,
    pub status: ProjectStatus,
    pub project_phase: ProjectPhase,
    pub budget: Money,
    pub hourly_rate: Money,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub estimated_hours: Money,
    pub design_tools: serde_json::Value,
    pub technologies: serde_json::Value,
    pub priority: Priority,
    pub progress_percentage: i32,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProject {
    pub client_id: DbId,
    pub inquiry_id: Option<DbId>,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    pub description: Option<String>,
    /// Derived from the title when omitted and portfolio fields are set.
    pub slug: Option<String>,
    pub intro: Option<String>,
    pub client_type: Option<String>,
    pub industry: Option<String>,
    #[validate(url)]
    pub logo: Option<String>,
    pub case_study: Option<serde_json::Value>,
    pub status: Option<ProjectStatus>,
    pub project_phase: Option<ProjectPhase>,
    pub budget: Option<Money>,
    pub hourly_rate: Option<Money>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub estimated_hours: Option<Money>,
    pub design_tools: Option<serde_json::Value>,
    pub technologies: Option<serde_json::Value>,
    pub priority: Option<Priority>,
}

/// DTO for updating an existing project. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProject {
    pub client_id: Option<DbId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub slug: Option<String>,
    pub intro: Option<String>,
    pub client_type: Option<String>,
    pub industry: Option<String>,
    #[validate(url)]
    pub logo: Option<String>,
    pub case_study: Option<serde_json::Value>,
    pub status: Option<ProjectStatus>,
    pub project_phase: Option<ProjectPhase>,
    pub budget: Option<Money>,
    pub hourly_rate: Option<Money>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub estimated_hours: Option<Money>,
    pub design_tools: Option<serde_json::Value>,
    pub technologies: Option<serde_json::Value>,
    pub priority: Option<Priority>,
    pub is_active: Option<bool>,
}

/// Public case-study listing entry: only portfolio-safe fields, no
/// financials and no internal status detail.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortfolioEntry {
    pub slug: String,
    pub title: String,
    pub intro: Option<String>,
    pub client_type: Option<String>,
    pub industry: Option<String>,
    pub logo: Option<String>,
    pub design_tools: serde_json::Value,
    pub technologies: serde_json::Value,
}

/// Full public case study: the listing entry plus the structured body.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PortfolioCaseStudy {
    pub slug: String,
    pub title: String,
    pub intro: Option<String>,
    pub client_type: Option<String>,
    pub industry: Option<String>,
    pub logo: Option<String>,
    pub case_study: serde_json::Value,
    pub design_tools: serde_json::Value,
    pub technologies: serde_json::Value,
}
