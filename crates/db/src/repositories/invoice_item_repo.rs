//! Repository for the `invoice_items` table.
//!
//! `amount` is always `quantity * rate`, computed by the caller via
//! `billing::line_amount` and stored explicitly.

use sqlx::PgPool;

use atelier_core::types::{DbId, Money};

use crate::models::invoice::{CreateInvoiceItem, InvoiceItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, invoice_id, description, quantity, rate, amount, created_at, updated_at";

/// Provides CRUD operations for invoice line items.
pub struct InvoiceItemRepo;

impl InvoiceItemRepo {
    /// Insert a new line item, returning the created row.
    pub async fn create(
        pool: &PgPool,
        invoice_id: DbId,
        input: &CreateInvoiceItem,
        amount: Money,
    ) -> Result<InvoiceItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO invoice_items (invoice_id, description, quantity, rate, amount)
             VALUES ($1, $2, COALESCE($3, 1), $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InvoiceItem>(&query)
            .bind(invoice_id)
            .bind(&input.description)
            .bind(input.quantity)
            .bind(input.rate)
            .bind(amount)
            .fetch_one(pool)
            .await
    }

    /// Find a line item scoped to its invoice.
    pub async fn find_by_id(
        pool: &PgPool,
        invoice_id: DbId,
        id: DbId,
    ) -> Result<Option<InvoiceItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM invoice_items WHERE id = $1 AND invoice_id = $2");
        sqlx::query_as::<_, InvoiceItem>(&query)
            .bind(id)
            .bind(invoice_id)
            .fetch_optional(pool)
            .await
    }

    /// List line items for an invoice in insertion order.
    pub async fn list_by_invoice(
        pool: &PgPool,
        invoice_id: DbId,
    ) -> Result<Vec<InvoiceItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM invoice_items
             WHERE invoice_id = $1
             ORDER BY created_at"
        );
        sqlx::query_as::<_, InvoiceItem>(&query)
            .bind(invoice_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a line item's fields with pre-merged values.
    pub async fn update(
        pool: &PgPool,
        invoice_id: DbId,
        id: DbId,
        description: &str,
        quantity: Money,
        rate: Money,
        amount: Money,
    ) -> Result<Option<InvoiceItem>, sqlx::Error> {
        let query = format!(
            "UPDATE invoice_items SET
                description = $3, quantity = $4, rate = $5, amount = $6, updated_at = NOW()
             WHERE id = $1 AND invoice_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InvoiceItem>(&query)
            .bind(id)
            .bind(invoice_id)
            .bind(description)
            .bind(quantity)
            .bind(rate)
            .bind(amount)
            .fetch_optional(pool)
            .await
    }

    /// Delete a line item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, invoice_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM invoice_items WHERE id = $1 AND invoice_id = $2")
            .bind(id)
            .bind(invoice_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
