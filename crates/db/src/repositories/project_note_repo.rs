//! Repository for the `project_notes` table.

use sqlx::PgPool;

use atelier_core::types::DbId;

use crate::models::project_note::{CreateProjectNote, ProjectNote, UpdateProjectNote};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, project_id, user_id, note_type, title, content, is_internal, created_at, updated_at";

/// Provides CRUD operations for project notes.
pub struct ProjectNoteRepo;

impl ProjectNoteRepo {
    /// Insert a new note, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        user_id: DbId,
        input: &CreateProjectNote,
    ) -> Result<ProjectNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_notes (project_id, user_id, note_type, title, content, is_internal)
             VALUES ($1, $2, COALESCE($3, 'GENERAL'), $4, $5, COALESCE($6, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectNote>(&query)
            .bind(project_id)
            .bind(user_id)
            .bind(input.note_type)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.is_internal)
            .fetch_one(pool)
            .await
    }

    /// List notes for a project, newest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<ProjectNote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_notes
             WHERE project_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ProjectNote>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a note scoped to its project. Only non-`None` fields apply.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateProjectNote,
    ) -> Result<Option<ProjectNote>, sqlx::Error> {
        let query = format!(
            "UPDATE project_notes SET
                note_type = COALESCE($3, note_type),
                title = COALESCE($4, title),
                content = COALESCE($5, content),
                is_internal = COALESCE($6, is_internal),
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectNote>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.note_type)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.is_internal)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_notes WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
