//! Project file-record model and DTOs.
//!
//! Only metadata is stored; the bytes live wherever `file_path` points.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::status::ProjectFileType;
use atelier_core::types::{DbId, Timestamp};

/// A file record row from the `project_files` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProjectFile {
    pub id: DbId,
    pub project_id: DbId,
    pub user_id: DbId,
    pub file_type: ProjectFileType,
    pub title: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for registering a file against a project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectFile {
    pub file_type: Option<ProjectFileType>,
    pub title: String,
    pub file_name: String,
    pub file_path: String,
    pub file_size: i64,
}
