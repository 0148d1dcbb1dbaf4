//! Inquiry (lead intake) model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use atelier_core::status::{
    BudgetRange, InquirySource, InquiryStatus, Priority, ServiceKind, TimelineKind,
};
use atelier_core::types::{Date, DbId, Timestamp};

/// An inquiry row from the `inquiries` table.
///
/// `lead_score` is computed by `atelier_core::leads::lead_score` on create
/// and whenever the scoring inputs change.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Inquiry {
    pub id: DbId,
    pub user_id: DbId,
    pub converted_client_id: Option<DbId>,
    pub client_name: String,
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub message: String,
    pub service_requested: ServiceKind,
    pub budget_range: Option<BudgetRange>,
    pub timeline: Option<TimelineKind>,
    pub priority: Priority,
    pub status: InquiryStatus,
    pub notes: Option<String>,
    pub follow_up_date: Option<Date>,
    pub reminder_sent: bool,
    pub tags: serde_json::Value,
    pub lead_score: i32,
    pub source: InquirySource,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the public intake form. The owning user is resolved
/// server-side; unauthenticated callers cannot choose an assignee.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInquiry {
    #[validate(length(min = 1, max = 150))]
    pub client_name: String,
    #[validate(email)]
    pub client_email: String,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    #[validate(length(min = 1))]
    pub message: String,
    pub service_requested: Option<ServiceKind>,
    pub budget_range: Option<BudgetRange>,
    pub timeline: Option<TimelineKind>,
    pub priority: Option<Priority>,
    pub source: Option<InquirySource>,
    pub tags: Option<Vec<String>>,
}

/// DTO for updating an inquiry. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInquiry {
    pub client_name: Option<String>,
    #[validate(email)]
    pub client_email: Option<String>,
    pub client_phone: Option<String>,
    pub client_company: Option<String>,
    pub message: Option<String>,
    pub service_requested: Option<ServiceKind>,
    pub budget_range: Option<BudgetRange>,
    pub timeline: Option<TimelineKind>,
    pub priority: Option<Priority>,
    pub status: Option<InquiryStatus>,
    pub notes: Option<String>,
    pub follow_up_date: Option<Date>,
    pub reminder_sent: Option<bool>,
    pub source: Option<InquirySource>,
    pub tags: Option<Vec<String>>,
}
