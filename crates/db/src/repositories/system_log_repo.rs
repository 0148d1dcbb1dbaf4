//! Repository for the `system_logs` table.

use sqlx::PgPool;

use atelier_core::types::Timestamp;

use crate::models::system_log::{CreateSystemLog, SystemLog, SystemLogFilter};
use crate::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, level, category, message, ip_address, user_agent, metadata, created_at";

/// Provides append/list/purge for system logs.
pub struct SystemLogRepo;

impl SystemLogRepo {
    /// Append a log entry, returning the created row.
    pub async fn insert(pool: &PgPool, input: &CreateSystemLog) -> Result<SystemLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO system_logs (user_id, level, category, message, ip_address,
                                      user_agent, metadata)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SystemLog>(&query)
            .bind(input.user_id)
            .bind(input.level)
            .bind(input.category)
            .bind(&input.message)
            .bind(&input.ip_address)
            .bind(&input.user_agent)
            .bind(&input.metadata)
            .fetch_one(pool)
            .await
    }

    /// List log entries, newest first, filtered by level/category.
    pub async fn list(
        pool: &PgPool,
        filter: &SystemLogFilter,
    ) -> Result<Vec<SystemLog>, sqlx::Error> {
        let limit = clamp_limit(filter.limit, 50, 200);
        let offset = clamp_offset(filter.offset);
        let query = format!(
            "SELECT {COLUMNS} FROM system_logs
             WHERE ($1::log_level IS NULL OR level = $1)
               AND ($2::log_category IS NULL OR category = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, SystemLog>(&query)
            .bind(filter.level)
            .bind(filter.category)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Most recent entries for the dashboard activity widget.
    pub async fn recent(pool: &PgPool, limit: i64) -> Result<Vec<SystemLog>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM system_logs
             ORDER BY created_at DESC
             LIMIT $1"
        );
        sqlx::query_as::<_, SystemLog>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Delete entries older than the cutoff. Returns the number removed.
    pub async fn purge_older_than(pool: &PgPool, cutoff: Timestamp) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM system_logs WHERE created_at < $1")
            .bind(cutoff)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
