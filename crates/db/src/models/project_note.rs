//! Project note model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::status::ProjectNoteType;
use atelier_core::types::{DbId, Timestamp};

/// A note row from the `project_notes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectNote {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub note_type: ProjectNoteType,
    pub title: String,
    pub content: String,
    /// Internal notes are not shown to the client.
    pub is_internal: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a project note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectNote {
    pub note_type: Option<ProjectNoteType>,
    pub title: String,
    pub content: String,
    pub is_internal: Option<bool>,
}

/// DTO for updating a project note.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProjectNote {
    pub note_type: Option<ProjectNoteType>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_internal: Option<bool>,
}
