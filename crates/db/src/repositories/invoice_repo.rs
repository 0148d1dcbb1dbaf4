//! Repository for the `invoices` table.
//!
//! Status transitions are validated by callers via
//! `atelier_core::billing::check_transition`; this layer only persists.
//! Every write that changes totals or status is followed by
//! `ClientRepo::recalculate_financials` at the handler level.

use sqlx::PgPool;

use atelier_core::status::InvoiceStatus;
use atelier_core::types::{Date, DbId, Money};

use crate::models::invoice::{CreateInvoice, Invoice, UpdateInvoice};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, client_id, project_id, invoice_number, public_id, \
                       issue_date, due_date, paid_date, status, subtotal, tax, discount, \
                       total, notes, created_at, updated_at";

/// Provides CRUD operations for invoices.
pub struct InvoiceRepo;

impl InvoiceRepo {
    /// Insert a new DRAFT invoice, returning the created row.
    ///
    /// `total` is computed by the caller (`billing::invoice_total`) and
    /// passed explicitly so the stored value always matches the components.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateInvoice,
        invoice_number: &str,
        total: Money,
    ) -> Result<Invoice, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoices (user_id, client_id, project_id, invoice_number, issue_date,
                                   due_date, subtotal, tax, discount, total, notes)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 0), COALESCE($8, 0), COALESCE($9, 0),
                     $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(user_id)
            .bind(input.client_id)
            .bind(input.project_id)
            .bind(invoice_number)
            .bind(input.issue_date)
            .bind(input.due_date)
            .bind(input.subtotal)
            .bind(input.tax)
            .bind(input.discount)
            .bind(total)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an invoice owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoices WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List invoices for `user_id`, newest first, with optional status and
    /// client filters.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        status: Option<InvoiceStatus>,
        client_id: Option<DbId>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices
             WHERE user_id = $1
               AND ($2::invoice_status IS NULL OR status = $2)
               AND ($3::bigint IS NULL OR client_id = $3)
             ORDER BY created_at DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(user_id)
            .bind(status)
            .bind(client_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Invoices awaiting payment past their due date, most overdue first.
    pub async fn list_overdue(pool: &PgPool, user_id: DbId) -> Result<Vec<Invoice>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoices
             WHERE user_id = $1
               AND status IN ('SENT', 'OVERDUE')
               AND due_date < CURRENT_DATE
             ORDER BY due_date"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update the editable fields of a DRAFT invoice. The WHERE clause pins
    /// the status so a concurrently sent invoice cannot be edited.
    ///
    /// `total` is recomputed by the caller from the merged components.
    pub async fn update_draft(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateInvoice,
        total: Money,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET
                project_id = COALESCE($3, project_id),
                issue_date = COALESCE($4, issue_date),
                due_date = COALESCE($5, due_date),
                subtotal = COALESCE($6, subtotal),
                tax = COALESCE($7, tax),
                discount = COALESCE($8, discount),
                total = $9,
                notes = COALESCE($10, notes),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2 AND status = 'DRAFT'
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(user_id)
            .bind(input.project_id)
            .bind(input.issue_date)
            .bind(input.due_date)
            .bind(input.subtotal)
            .bind(input.tax)
            .bind(input.discount)
            .bind(total)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Move an invoice to a new status, optionally stamping `paid_date`.
    pub async fn set_status(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        status: InvoiceStatus,
        paid_date: Option<Date>,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices SET
                status = $3,
                paid_date = COALESCE($4, paid_date),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(id)
            .bind(user_id)
            .bind(status)
            .bind(paid_date)
            .fetch_optional(pool)
            .await
    }

    /// Recompute `subtotal` from line items and re-derive `total`.
    ///
    /// Runs as one statement so item writes cannot interleave between the
    /// subtotal read and the total write.
    pub async fn resync_totals_from_items(
        pool: &PgPool,
        invoice_id: DbId,
    ) -> Result<Option<Invoice>, sqlx::Error> {
        let query = format!(
            "UPDATE invoices i SET
                subtotal = sub.amount,
                total = GREATEST(sub.amount + i.tax - i.discount, 0),
                updated_at = NOW()
             FROM (
                SELECT COALESCE(SUM(amount), 0) AS amount
                FROM invoice_items WHERE invoice_id = $1
             ) sub
             WHERE i.id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Invoice>(&query)
            .bind(invoice_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a DRAFT invoice. Returns `true` if a row was removed; sent or
    /// paid invoices are never deleted, only cancelled.
    pub async fn delete_draft(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM invoices WHERE id = $1 AND user_id = $2 AND status = 'DRAFT'")
                .bind(id)
                .bind(user_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Next sequence number for generated invoice numbers within a year.
    pub async fn next_number_in_year(
        pool: &PgPool,
        user_id: DbId,
        year: i32,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) + 1 FROM invoices
             WHERE user_id = $1 AND date_part('year', issue_date) = $2",
        )
        .bind(user_id)
        .bind(f64::from(year))
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }

    /// Flip SENT invoices past their due date to OVERDUE. Used by the
    /// background sweep. Returns the ids of the affected clients so the
    /// caller can recompute their financials.
    pub async fn mark_overdue_past_due(pool: &PgPool) -> Result<Vec<DbId>, sqlx::Error> {
        let rows: Vec<(DbId,)> = sqlx::query_as(
            "UPDATE invoices SET status = 'OVERDUE', updated_at = NOW()
             WHERE status = 'SENT' AND due_date < CURRENT_DATE
             RETURNING client_id",
        )
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(id,)| id).collect())
    }
}
