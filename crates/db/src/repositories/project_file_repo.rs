//! Repository for the `project_files` table.

use sqlx::PgPool;

use atelier_core::types::DbId;

use crate::models::project_file::{CreateProjectFile, ProjectFile};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, user_id, file_type, title, file_name, file_path, \
                       file_size, created_at, updated_at";

/// Provides CRUD operations for project file records.
pub struct ProjectFileRepo;

impl ProjectFileRepo {
    /// Insert a new file record, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        input: &CreateProjectFile,
    ) -> Result<ProjectFile, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_files (project_id, user_id, file_type, title, file_name,
                                        file_path, file_size)
             VALUES ($1, $2, COALESCE($3, 'OTHER'), $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(input.file_type)
            .bind(&input.title)
            .bind(&input.file_name)
            .bind(&input.file_path)
            .bind(input.file_size)
            .fetch_one(pool)
            .await
    }

    /// List file records for a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectFile>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_files
             WHERE project_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProjectFile>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Delete a file record. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_files WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
