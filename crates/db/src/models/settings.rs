//! Per-user admin settings model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use atelier_core::types::{DbId, Money, Timestamp};

/// An admin settings row (one per user) from the `admin_settings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AdminSettings {
    pub id: DbId,
    pub user_id: DbId,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub default_hourly_rate: Money,
    pub currency: String,
    pub timezone: String,
    pub language: String,
    pub email_reminders: bool,
    pub project_updates: bool,
    pub invoice_due_reminders: bool,
    pub marketing_emails: bool,
    pub maintenance_mode: bool,
    pub debug_mode: bool,
    pub backup_frequency: String,
    pub dashboard_layout: serde_json::Value,
    pub theme: String,
    pub last_notification_sent: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for saving settings. Omitted fields keep their current (or default)
/// values; the row is created on first save.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SaveAdminSettings {
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub company: Option<String>,
    pub phone: Option<String>,
    pub default_hourly_rate: Option<Money>,
    pub currency: Option<String>,
    pub timezone: Option<String>,
    pub language: Option<String>,
    pub email_reminders: Option<bool>,
    pub project_updates: Option<bool>,
    pub invoice_due_reminders: Option<bool>,
    pub marketing_emails: Option<bool>,
    pub maintenance_mode: Option<bool>,
    pub debug_mode: Option<bool>,
    pub backup_frequency: Option<String>,
    pub dashboard_layout: Option<serde_json::Value>,
    pub theme: Option<String>,
}
