//! Invoice and line-item models and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use atelier_core::status::InvoiceStatus;
use atelier_core::types::{Date, DbId, Money, Timestamp};

/// An invoice row from the `invoices` table.
///
/// `total` is always `subtotal + tax - discount`; when the invoice has line
/// items, `subtotal` is the sum of their amounts. Both are maintained by
/// `InvoiceRepo`, never written from request input.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Invoice {
    pub id: DbId,
    pub user_id: DbId,
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    pub invoice_number: String,
    /// Stable public identifier, safe to embed in payment links.
    pub public_id: Uuid,
    pub issue_date: Date,
    pub due_date: Date,
    pub paid_date: Option<Date>,
    pub status: InvoiceStatus,
    pub subtotal: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new invoice (always starts as DRAFT).
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub client_id: DbId,
    pub project_id: Option<DbId>,
    /// Generated sequentially when omitted.
    pub invoice_number: Option<String>,
    pub issue_date: Date,
    pub due_date: Date,
    pub subtotal: Option<Money>,
    pub tax: Option<Money>,
    pub discount: Option<Money>,
    pub notes: Option<String>,
}

/// DTO for updating a DRAFT invoice. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInvoice {
    pub project_id: Option<DbId>,
    pub issue_date: Option<Date>,
    pub due_date: Option<Date>,
    pub subtotal: Option<Money>,
    pub tax: Option<Money>,
    pub discount: Option<Money>,
    pub notes: Option<String>,
}

/// A line item row from the `invoice_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InvoiceItem {
    pub id: DbId,
    pub invoice_id: DbId,
    pub description: String,
    pub quantity: Money,
    pub rate: Money,
    pub amount: Money,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for adding a line item. `amount` is computed, not accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoiceItem {
    pub description: String,
    pub quantity: Option<Money>,
    pub rate: Money,
}

/// DTO for updating a line item.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateInvoiceItem {
    pub description: Option<String>,
    pub quantity: Option<Money>,
    pub rate: Option<Money>,
}
