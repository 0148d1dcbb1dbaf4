//! Client entity models and DTOs: the client itself, extra contacts, and
//! the note/communication history.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use atelier_core::status::{ClientNoteType, ClientStatus};
use atelier_core::types::{Date, DbId, Money, Timestamp};

/// A client row from the `clients` table.
///
/// `total_revenue` and `outstanding_balance` are denormalized; they are
/// recomputed by `ClientRepo::recalculate_financials`, never written from
/// request input.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Client {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub company: Option<String>,
    pub contact_email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: ClientStatus,
    pub total_revenue: Money,
    pub outstanding_balance: Money,
    pub notes: Option<String>,
    pub website: Option<String>,
    pub industry: Option<String>,
    pub secondary_email: Option<String>,
    pub secondary_phone: Option<String>,
    pub tax_id: Option<String>,
    pub payment_terms: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Read-time counts attached to a client detail response.
#[derive(Debug, Clone, Default, FromRow, Serialize)]
pub struct ClientCounts {
    pub total_projects: i64,
    pub active_projects: i64,
    pub total_invoices: i64,
    pub paid_invoices: i64,
    pub overdue_invoices: i64,
}

/// DTO for creating a new client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClient {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub company: Option<String>,
    #[validate(email)]
    pub contact_email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<ClientStatus>,
    pub notes: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub industry: Option<String>,
    #[validate(email)]
    pub secondary_email: Option<String>,
    pub secondary_phone: Option<String>,
    pub tax_id: Option<String>,
    /// Defaults to "Net 30" when omitted.
    pub payment_terms: Option<String>,
}

/// DTO for updating an existing client. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateClient {
    pub name: Option<String>,
    pub company: Option<String>,
    #[validate(email)]
    pub contact_email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<ClientStatus>,
    pub notes: Option<String>,
    #[validate(url)]
    pub website: Option<String>,
    pub industry: Option<String>,
    #[validate(email)]
    pub secondary_email: Option<String>,
    pub secondary_phone: Option<String>,
    pub tax_id: Option<String>,
    pub payment_terms: Option<String>,
}

/// An extra contact person attached to a client.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientContact {
    pub id: DbId,
    pub client_id: DbId,
    pub name: String,
    pub title: Option<String>,
    pub email: String,
    pub phone: Option<String>,
    pub is_primary: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a client contact.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateClientContact {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub title: Option<String>,
    #[validate(email)]
    pub email: String,
    pub phone: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// DTO for updating a client contact.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClientContact {
    pub name: Option<String>,
    pub title: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub is_primary: Option<bool>,
}

/// A note in a client's communication history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ClientNote {
    pub id: DbId,
    pub client_id: DbId,
    pub user_id: DbId,
    pub inquiry_id: Option<DbId>,
    pub note_type: ClientNoteType,
    pub title: String,
    pub content: String,
    pub follow_up_required: bool,
    pub follow_up_date: Option<Date>,
    pub follow_up_completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a client note.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientNote {
    pub inquiry_id: Option<DbId>,
    pub note_type: Option<ClientNoteType>,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub follow_up_required: bool,
    pub follow_up_date: Option<Date>,
}

/// DTO for updating a client note.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClientNote {
    pub note_type: Option<ClientNoteType>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub follow_up_required: Option<bool>,
    pub follow_up_date: Option<Date>,
    pub follow_up_completed: Option<bool>,
}
