//! Repository for the `project_tasks` table.

use sqlx::PgPool;

use atelier_core::types::DbId;

use crate::models::task::{CreateTask, Task, UpdateTask};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, milestone_id, title, description, status, priority, \
                       assigned_to, estimated_hours, sort_order, created_at, updated_at";

/// Provides CRUD operations for project tasks.
///
/// Task status changes feed the parent project's `progress_percentage`;
/// callers run `ProjectRepo::recompute_progress` after mutating status.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a new task, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateTask,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_tasks (project_id, milestone_id, title, description, status,
                                        priority, assigned_to, estimated_hours, sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'TODO'), COALESCE($6, 'MEDIUM'), $7,
                     COALESCE($8, 0), COALESCE($9, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .bind(input.milestone_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.priority)
            .bind(&input.assigned_to)
            .bind(input.estimated_hours)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// List tasks for a project in display order.
    pub async fn list_by_project(pool: &PgPool, project_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_tasks
             WHERE project_id = $1
             ORDER BY sort_order, created_at"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a task scoped to its project. Only non-`None` fields apply.
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateTask,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE project_tasks SET
                milestone_id = COALESCE($3, milestone_id),
                title = COALESCE($4, title),
                description = COALESCE($5, description),
                status = COALESCE($6, status),
                priority = COALESCE($7, priority),
                assigned_to = COALESCE($8, assigned_to),
                estimated_hours = COALESCE($9, estimated_hours),
                sort_order = COALESCE($10, sort_order),
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(id)
            .bind(project_id)
            .bind(input.milestone_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.status)
            .bind(input.priority)
            .bind(&input.assigned_to)
            .bind(input.estimated_hours)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_tasks WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
