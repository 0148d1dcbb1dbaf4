//! Repository for the `project_milestones` table.

use sqlx::PgPool;

use atelier_core::types::DbId;

use crate::models::milestone::{CreateMilestone, Milestone, UpdateMilestone};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, project_id, title, description, due_date, status, sort_order, \
                       is_completed, created_at, updated_at";

/// Provides CRUD operations for project milestones.
pub struct MilestoneRepo;

impl MilestoneRepo {
    /// Insert a new milestone, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateMilestone,
    ) -> Result<Milestone, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_milestones (project_id, title, description, due_date, status,
                                             sort_order)
             VALUES ($1, $2, $3, $4, COALESCE($5, 'PENDING'), COALESCE($6, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .bind(input.status)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// List milestones for a project in display order.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Milestone>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_milestones
             WHERE project_id = $1
             ORDER BY sort_order, due_date"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }

    /// Update a milestone scoped to its project.
    ///
    /// Setting `is_completed` also moves `status` to COMPLETED (and back to
    /// PENDING when unchecked and not otherwise overridden).
    pub async fn update(
        pool: &PgPool,
        project_id: DbId,
        id: DbId,
        input: &UpdateMilestone,
    ) -> Result<Option<Milestone>, sqlx::Error> {
        let query = format!(
            "UPDATE project_milestones SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                due_date = COALESCE($5, due_date),
                status = CASE
                    WHEN $7::boolean IS TRUE THEN 'COMPLETED'::milestone_status
                    ELSE COALESCE($6, status)
                END,
                sort_order = COALESCE($8, sort_order),
                is_completed = COALESCE($7, is_completed),
                updated_at = NOW()
             WHERE id = $1 AND project_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Milestone>(&query)
            .bind(id)
            .bind(project_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(input.due_date)
            .bind(input.status)
            .bind(input.is_completed)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a milestone. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, project_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM project_milestones WHERE id = $1 AND project_id = $2")
            .bind(id)
            .bind(project_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Mark incomplete milestones past their due date as OVERDUE.
    /// Used by the background sweep. Returns the number updated.
    pub async fn mark_overdue_past_due(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE project_milestones SET status = 'OVERDUE', updated_at = NOW()
             WHERE is_completed = false
               AND status IN ('PENDING', 'IN_PROGRESS')
               AND due_date < CURRENT_DATE",
        )
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    /// Milestones due within the next `days` days, soonest first, for the
    /// dashboard's upcoming-deadlines widget.
    pub async fn upcoming_for_user(
        pool: &PgPool,
        user_id: DbId,
        days: i32,
        limit: i64,
    ) -> Result<Vec<Milestone>, sqlx::Error> {
        sqlx::query_as::<_, Milestone>(
            "SELECT m.id, m.project_id, m.title, m.description, m.due_date, m.status,
                    m.sort_order, m.is_completed, m.created_at, m.updated_at
             FROM project_milestones m
             JOIN projects p ON p.id = m.project_id
             WHERE p.user_id = $1
               AND m.is_completed = false
               AND m.due_date BETWEEN CURRENT_DATE AND CURRENT_DATE + $2 * INTERVAL '1 day'
             ORDER BY m.due_date
             LIMIT $3",
        )
            .bind(user_id)
            .bind(days)
            .bind(limit)
            .fetch_all(pool)
            .await
    }
}
