//! Aggregation queries for the analytics and dashboard endpoints.
//!
//! Everything here is read-only. Each query aggregates over the calling
//! user's rows; nothing is cached or denormalized at this layer.

use serde::Serialize;
use sqlx::{FromRow, PgPool};

use atelier_core::types::{Date, DbId, Money};

/// Revenue for one calendar month.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MonthlyRevenue {
    /// First day of the month.
    pub month: Date,
    pub amount: Money,
}

/// A client ranked by collected revenue.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopClient {
    pub client_id: DbId,
    pub name: String,
    pub revenue: Money,
    pub billable_minutes: i64,
}

/// Project counts by lifecycle status.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct ProjectCounts {
    pub total: i64,
    pub planning: i64,
    pub in_progress: i64,
    pub on_hold: i64,
    pub completed: i64,
    pub cancelled: i64,
}

/// Inquiry pipeline totals for the conversion rate.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct InquiryStats {
    pub total: i64,
    pub won: i64,
    pub open: i64,
}

/// Entity counts for the admin dashboard header.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct DashboardCounts {
    pub clients: i64,
    pub active_projects: i64,
    pub outstanding_invoices: i64,
    pub overdue_invoices: i64,
    pub new_inquiries: i64,
    pub running_timers: i64,
}

/// Read-only aggregate queries over a user's data.
pub struct AnalyticsRepo;

impl AnalyticsRepo {
    /// Lifetime revenue: sum of PAID invoice totals.
    pub async fn revenue_total(pool: &PgPool, user_id: DbId) -> Result<Money, sqlx::Error> {
        let row: (Money,) = sqlx::query_as(
            "SELECT COALESCE(SUM(total), 0) FROM invoices
             WHERE user_id = $1 AND status = 'PAID'",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Revenue from PAID invoices issued in `[from, to)`.
    pub async fn revenue_between(
        pool: &PgPool,
        user_id: DbId,
        from: Date,
        to: Date,
    ) -> Result<Money, sqlx::Error> {
        let row: (Money,) = sqlx::query_as(
            "SELECT COALESCE(SUM(total), 0) FROM invoices
             WHERE user_id = $1 AND status = 'PAID'
               AND issue_date >= $2 AND issue_date < $3",
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Monthly revenue trend since `since`, oldest month first.
    pub async fn monthly_revenue(
        pool: &PgPool,
        user_id: DbId,
        since: Date,
    ) -> Result<Vec<MonthlyRevenue>, sqlx::Error> {
        sqlx::query_as::<_, MonthlyRevenue>(
            "SELECT date_trunc('month', issue_date)::date AS month,
                    SUM(total) AS amount
             FROM invoices
             WHERE user_id = $1 AND status = 'PAID' AND issue_date >= $2
             GROUP BY 1
             ORDER BY 1",
        )
        .bind(user_id)
        .bind(since)
        .fetch_all(pool)
        .await
    }

    /// Top clients by collected revenue, with their billable hours.
    /// Clients with no revenue are excluded.
    pub async fn top_clients(
        pool: &PgPool,
        user_id: DbId,
        limit: i64,
    ) -> Result<Vec<TopClient>, sqlx::Error> {
        sqlx::query_as::<_, TopClient>(
            "SELECT c.id AS client_id,
                    c.name,
                    COALESCE(inv.revenue, 0) AS revenue,
                    COALESCE(tl.billable_minutes, 0)::bigint AS billable_minutes
             FROM clients c
             LEFT JOIN (
                SELECT client_id, SUM(total) AS revenue
                FROM invoices WHERE status = 'PAID' GROUP BY client_id
             ) inv ON inv.client_id = c.id
             LEFT JOIN (
                SELECT client_id, SUM(duration_minutes) AS billable_minutes
                FROM time_logs WHERE is_billable GROUP BY client_id
             ) tl ON tl.client_id = c.id
             WHERE c.user_id = $1 AND COALESCE(inv.revenue, 0) > 0
             ORDER BY inv.revenue DESC
             LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Total minutes logged across all of a user's time logs.
    pub async fn total_logged_minutes(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COALESCE(SUM(duration_minutes), 0)::bigint FROM time_logs WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Project counts broken down by status.
    pub async fn project_counts(pool: &PgPool, user_id: DbId) -> Result<ProjectCounts, sqlx::Error> {
        sqlx::query_as::<_, ProjectCounts>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'PLANNING') AS planning,
                    COUNT(*) FILTER (WHERE status = 'IN_PROGRESS') AS in_progress,
                    COUNT(*) FILTER (WHERE status = 'ON_HOLD') AS on_hold,
                    COUNT(*) FILTER (WHERE status = 'COMPLETED') AS completed,
                    COUNT(*) FILTER (WHERE status = 'CANCELLED') AS cancelled
             FROM projects WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Inquiry totals for the lead conversion rate.
    pub async fn inquiry_stats(pool: &PgPool, user_id: DbId) -> Result<InquiryStats, sqlx::Error> {
        sqlx::query_as::<_, InquiryStats>(
            "SELECT COUNT(*) AS total,
                    COUNT(*) FILTER (WHERE status = 'WON') AS won,
                    COUNT(*) FILTER (WHERE status IN ('NEW', 'CONTACTED', 'QUOTED',
                                                      'NEGOTIATING', 'ON_HOLD')) AS open
             FROM inquiries WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }

    /// Sum of totals awaiting payment (SENT or OVERDUE).
    pub async fn outstanding_total(pool: &PgPool, user_id: DbId) -> Result<Money, sqlx::Error> {
        let row: (Money,) = sqlx::query_as(
            "SELECT COALESCE(SUM(total), 0) FROM invoices
             WHERE user_id = $1 AND status IN ('SENT', 'OVERDUE')",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Sum of totals past due.
    pub async fn overdue_total(pool: &PgPool, user_id: DbId) -> Result<Money, sqlx::Error> {
        let row: (Money,) = sqlx::query_as(
            "SELECT COALESCE(SUM(total), 0) FROM invoices
             WHERE user_id = $1
               AND status IN ('SENT', 'OVERDUE')
               AND due_date < CURRENT_DATE",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Entity counts for the dashboard header.
    pub async fn dashboard_counts(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<DashboardCounts, sqlx::Error> {
        sqlx::query_as::<_, DashboardCounts>(
            "SELECT
                (SELECT COUNT(*) FROM clients WHERE user_id = $1) AS clients,
                (SELECT COUNT(*) FROM projects
                  WHERE user_id = $1 AND status = 'IN_PROGRESS') AS active_projects,
                (SELECT COUNT(*) FROM invoices
                  WHERE user_id = $1 AND status IN ('SENT', 'OVERDUE')) AS outstanding_invoices,
                (SELECT COUNT(*) FROM invoices
                  WHERE user_id = $1 AND status IN ('SENT', 'OVERDUE')
                    AND due_date < CURRENT_DATE) AS overdue_invoices,
                (SELECT COUNT(*) FROM inquiries
                  WHERE user_id = $1 AND status = 'NEW') AS new_inquiries,
                (SELECT COUNT(*) FROM time_logs
                  WHERE user_id = $1 AND status = 'RUNNING') AS running_timers",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
    }
}
