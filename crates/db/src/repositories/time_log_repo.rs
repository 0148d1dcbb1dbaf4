//! Repository for the `time_logs` table.
//!
//! Duration derivation (and the 24h cap) happens in
//! `atelier_core::timetrack`; handlers pass the derived values in.

use sqlx::PgPool;

use atelier_core::status::TimeLogStatus;
use atelier_core::types::{DbId, Timestamp};

use crate::models::time_log::{CreateTimeLog, StartTimer, TimeLog, TimeSummary, UpdateTimeLog};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, client_id, project_id, task_id, milestone_id, invoice_id, \
                       start_time, end_time, duration_minutes, description, task_name, status, \
                       is_billable, hourly_rate, created_at, updated_at";

/// Provides CRUD and timer operations for time logs.
pub struct TimeLogRepo;

impl TimeLogRepo {
    /// Insert a manual entry with pre-derived duration, returning the row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateTimeLog,
        end_time: Option<Timestamp>,
        duration_minutes: i32,
    ) -> Result<TimeLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_logs (user_id, client_id, project_id, task_id, milestone_id,
                                    start_time, end_time, duration_minutes, description,
                                    task_name, status, is_billable, hourly_rate)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, COALESCE($11, 'STOPPED'),
                     COALESCE($12, true), $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeLog>(&query)
            .bind(user_id)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(input.task_id)
            .bind(input.milestone_id)
            .bind(input.start_time)
            .bind(end_time)
            .bind(duration_minutes)
            .bind(&input.description)
            .bind(&input.task_name)
            .bind(input.status)
            .bind(input.is_billable)
            .bind(input.hourly_rate)
            .fetch_one(pool)
            .await
    }

    /// Start a live timer: status RUNNING, start time now, no end.
    pub async fn start_timer(
        pool: &PgPool,
        user_id: DbId,
        input: &StartTimer,
    ) -> Result<TimeLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO time_logs (user_id, client_id, project_id, task_id, milestone_id,
                                    start_time, description, task_name, status, is_billable,
                                    hourly_rate)
             VALUES ($1, $2, $3, $4, $5, NOW(), $6, $7, 'RUNNING', COALESCE($8, true), $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeLog>(&query)
            .bind(user_id)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(input.task_id)
            .bind(input.milestone_id)
            .bind(&input.description)
            .bind(&input.task_name)
            .bind(input.is_billable)
            .bind(input.hourly_rate)
            .fetch_one(pool)
            .await
    }

    /// Stop a running/paused timer with pre-derived end and duration.
    pub async fn stop_timer(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        end_time: Timestamp,
        duration_minutes: i32,
    ) -> Result<Option<TimeLog>, sqlx::Error> {
        let query = format!(
            "UPDATE time_logs SET
                end_time = $3,
                duration_minutes = $4,
                status = 'COMPLETED',
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2 AND status IN ('RUNNING', 'PAUSED')
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeLog>(&query)
            .bind(id)
            .bind(user_id)
            .bind(end_time)
            .bind(duration_minutes)
            .fetch_optional(pool)
            .await
    }

    /// The user's currently running timer, if any (newest when several).
    pub async fn find_running(pool: &PgPool, user_id: DbId) -> Result<Option<TimeLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_logs
             WHERE user_id = $1 AND status = 'RUNNING'
             ORDER BY start_time DESC
             LIMIT 1"
        );
        sqlx::query_as::<_, TimeLog>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a time log owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<TimeLog>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM time_logs WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, TimeLog>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List logs for `user_id`, newest first, with optional filters.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        status: Option<TimeLogStatus>,
        client_id: Option<DbId>,
        project_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TimeLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM time_logs
             WHERE user_id = $1
               AND ($2::time_log_status IS NULL OR status = $2)
               AND ($3::bigint IS NULL OR client_id = $3)
               AND ($4::bigint IS NULL OR project_id = $4)
             ORDER BY start_time DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, TimeLog>(&query)
            .bind(user_id)
            .bind(status)
            .bind(client_id)
            .bind(project_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a log with pre-merged timing values. Only non-`None` fields
    /// of the remaining columns are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateTimeLog,
        start_time: Timestamp,
        end_time: Option<Timestamp>,
        duration_minutes: i32,
    ) -> Result<Option<TimeLog>, sqlx::Error> {
        let query = format!(
            "UPDATE time_logs SET
                client_id = COALESCE($3, client_id),
                project_id = COALESCE($4, project_id),
                task_id = COALESCE($5, task_id),
                milestone_id = COALESCE($6, milestone_id),
                start_time = $7,
                end_time = $8,
                duration_minutes = $9,
                description = COALESCE($10, description),
                task_name = COALESCE($11, task_name),
                status = COALESCE($12, status),
                is_billable = COALESCE($13, is_billable),
                hourly_rate = COALESCE($14, hourly_rate),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, TimeLog>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(input.task_id)
            .bind(input.milestone_id)
            .bind(start_time)
            .bind(end_time)
            .bind(duration_minutes)
            .bind(&input.description)
            .bind(&input.task_name)
            .bind(input.status)
            .bind(input.is_billable)
            .bind(input.hourly_rate)
            .fetch_optional(pool)
            .await
    }

    /// Delete a time log. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM time_logs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Billable rollup for a client.
    pub async fn summary_for_client(
        pool: &PgPool,
        user_id: DbId,
        client_id: DbId,
    ) -> Result<TimeSummary, sqlx::Error> {
        sqlx::query_as::<_, TimeSummary>(
            "SELECT
                COALESCE(SUM(duration_minutes), 0)::bigint AS total_minutes,
                COALESCE(SUM(duration_minutes) FILTER (WHERE is_billable), 0)::bigint
                    AS billable_minutes,
                COALESCE(SUM(ROUND(hourly_rate * duration_minutes / 60.0, 2))
                    FILTER (WHERE is_billable AND hourly_rate IS NOT NULL), 0)
                    AS billable_cost
             FROM time_logs
             WHERE user_id = $1 AND client_id = $2",
        )
        .bind(user_id)
        .bind(client_id)
        .fetch_one(pool)
        .await
    }

    /// Billable rollup for a project.
    pub async fn summary_for_project(
        pool: &PgPool,
        user_id: DbId,
        project_id: DbId,
    ) -> Result<TimeSummary, sqlx::Error> {
        sqlx::query_as::<_, TimeSummary>(
            "SELECT
                COALESCE(SUM(duration_minutes), 0)::bigint AS total_minutes,
                COALESCE(SUM(duration_minutes) FILTER (WHERE is_billable), 0)::bigint
                    AS billable_minutes,
                COALESCE(SUM(ROUND(hourly_rate * duration_minutes / 60.0, 2))
                    FILTER (WHERE is_billable AND hourly_rate IS NOT NULL), 0)
                    AS billable_cost
             FROM time_logs
             WHERE user_id = $1 AND project_id = $2",
        )
        .bind(user_id)
        .bind(project_id)
        .fetch_one(pool)
        .await
    }

    /// Attach COMPLETED, billable, uninvoiced logs of a client to an
    /// invoice. Returns the number of logs billed.
    pub async fn attach_to_invoice(
        pool: &PgPool,
        user_id: DbId,
        client_id: DbId,
        invoice_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE time_logs SET invoice_id = $3, updated_at = NOW()
             WHERE user_id = $1 AND client_id = $2
               AND status = 'COMPLETED' AND is_billable AND invoice_id IS NULL",
        )
        .bind(user_id)
        .bind(client_id)
        .bind(invoice_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
