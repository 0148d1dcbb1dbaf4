//! Repository for the `clients` table, including the denormalized
//! financial rollup.

use sqlx::PgPool;

use atelier_core::status::ClientStatus;
use atelier_core::types::DbId;

use crate::models::client::{Client, ClientCounts, CreateClient, UpdateClient};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, company, contact_email, phone, address, status, \
                       total_revenue, outstanding_balance, notes, website, industry, \
                       secondary_email, secondary_phone, tax_id, payment_terms, \
                       created_at, updated_at";

/// Provides CRUD operations and the financial recompute for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client for `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (user_id, name, company, contact_email, phone, address,
                                  status, notes, website, industry, secondary_email,
                                  secondary_phone, tax_id, payment_terms)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'ACTIVE'), $8, $9, $10, $11, $12, $13,
                     COALESCE($14, 'Net 30'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.company)
            .bind(&input.contact_email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(input.status)
            .bind(&input.notes)
            .bind(&input.website)
            .bind(&input.industry)
            .bind(&input.secondary_email)
            .bind(&input.secondary_phone)
            .bind(&input.tax_id)
            .bind(&input.payment_terms)
            .fetch_one(pool)
            .await
    }

    /// Find a client owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM clients WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find a client by contact email (used by inquiry conversion to avoid
    /// duplicating a client that already exists).
    pub async fn find_by_contact_email(
        pool: &PgPool,
        user_id: DbId,
        email: &str,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients WHERE user_id = $1 AND contact_email = $2
             ORDER BY created_at LIMIT 1"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(user_id)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// List clients for `user_id`, newest first, optionally filtered by status.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        status: Option<ClientStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM clients
             WHERE user_id = $1 AND ($2::client_status IS NULL OR status = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(user_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a client. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row is owned by `user_id` with the given `id`.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateClient,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients SET
                name = COALESCE($3, name),
                company = COALESCE($4, company),
                contact_email = COALESCE($5, contact_email),
                phone = COALESCE($6, phone),
                address = COALESCE($7, address),
                status = COALESCE($8, status),
                notes = COALESCE($9, notes),
                website = COALESCE($10, website),
                industry = COALESCE($11, industry),
                secondary_email = COALESCE($12, secondary_email),
                secondary_phone = COALESCE($13, secondary_phone),
                tax_id = COALESCE($14, tax_id),
                payment_terms = COALESCE($15, payment_terms),
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.company)
            .bind(&input.contact_email)
            .bind(&input.phone)
            .bind(&input.address)
            .bind(input.status)
            .bind(&input.notes)
            .bind(&input.website)
            .bind(&input.industry)
            .bind(&input.secondary_email)
            .bind(&input.secondary_phone)
            .bind(&input.tax_id)
            .bind(&input.payment_terms)
            .fetch_optional(pool)
            .await
    }

    /// Delete a client and (via FK cascade) its projects, invoices, notes,
    /// and contacts. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Recompute the denormalized financial totals from source rows in a
    /// single atomic statement:
    ///
    /// - `total_revenue`: sum of PAID invoice totals
    /// - `outstanding_balance`: sum of SENT/OVERDUE invoice totals, plus the
    ///   billable cost of COMPLETED time logs not yet attached to an invoice
    ///
    /// Returns the updated row, or `None` when the client does not exist.
    pub async fn recalculate_financials(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients c SET
                total_revenue = COALESCE((
                    SELECT SUM(i.total) FROM invoices i
                    WHERE i.client_id = c.id AND i.status = 'PAID'
                ), 0),
                outstanding_balance = COALESCE((
                    SELECT SUM(i.total) FROM invoices i
                    WHERE i.client_id = c.id AND i.status IN ('SENT', 'OVERDUE')
                ), 0) + COALESCE((
                    SELECT SUM(ROUND(t.hourly_rate * t.duration_minutes / 60.0, 2))
                    FROM time_logs t
                    WHERE t.client_id = c.id
                      AND t.is_billable
                      AND t.status = 'COMPLETED'
                      AND t.invoice_id IS NULL
                      AND t.hourly_rate IS NOT NULL
                ), 0),
                updated_at = NOW()
             WHERE c.id = $1
             RETURNING {COLUMNS}"
        );
        let client = sqlx::query_as::<_, Client>(&query)
            .bind(client_id)
            .fetch_optional(pool)
            .await?;
        if let Some(client) = &client {
            tracing::debug!(
                client_id,
                total_revenue = %client.total_revenue,
                outstanding_balance = %client.outstanding_balance,
                "Client financials recomputed"
            );
        }
        Ok(client)
    }

    /// Read-time project/invoice counts for a client detail view.
    pub async fn counts(pool: &PgPool, client_id: DbId) -> Result<ClientCounts, sqlx::Error> {
        sqlx::query_as::<_, ClientCounts>(
            "SELECT
                (SELECT COUNT(*) FROM projects p WHERE p.client_id = $1) AS total_projects,
                (SELECT COUNT(*) FROM projects p
                  WHERE p.client_id = $1 AND p.status = 'IN_PROGRESS') AS active_projects,
                (SELECT COUNT(*) FROM invoices i WHERE i.client_id = $1) AS total_invoices,
                (SELECT COUNT(*) FROM invoices i
                  WHERE i.client_id = $1 AND i.status = 'PAID') AS paid_invoices,
                (SELECT COUNT(*) FROM invoices i
                  WHERE i.client_id = $1 AND i.status IN ('SENT', 'OVERDUE')
                    AND i.due_date < CURRENT_DATE) AS overdue_invoices",
        )
        .bind(client_id)
        .fetch_one(pool)
        .await
    }
}
