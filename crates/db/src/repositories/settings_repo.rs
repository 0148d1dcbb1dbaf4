//! Repository for the `admin_settings` table (one row per user).

use sqlx::PgPool;

use atelier_core::types::DbId;

use crate::models::settings::{AdminSettings, SaveAdminSettings};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, full_name, email, company, phone, default_hourly_rate, \
                       currency, timezone, language, email_reminders, project_updates, \
                       invoice_due_reminders, marketing_emails, maintenance_mode, debug_mode, \
                       backup_frequency, dashboard_layout, theme, last_notification_sent, \
                       created_at, updated_at";

/// Provides read/upsert for per-user admin settings.
pub struct SettingsRepo;

impl SettingsRepo {
    /// Find a user's settings. Returns `None` until the first save.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<AdminSettings>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM admin_settings WHERE user_id = $1");
        sqlx::query_as::<_, AdminSettings>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert a user's settings. Creates the row with defaults on first
    /// save; on conflict, only fields present in `input` overwrite.
    ///
    /// Uses `ON CONFLICT (user_id) DO UPDATE` to guarantee one row per user.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &SaveAdminSettings,
    ) -> Result<AdminSettings, sqlx::Error> {
        let query = format!(
            "INSERT INTO admin_settings (user_id, full_name, email, company, phone,
                                         default_hourly_rate, currency, timezone, language,
                                         email_reminders, project_updates, invoice_due_reminders,
                                         marketing_emails, maintenance_mode, debug_mode,
                                         backup_frequency, dashboard_layout, theme)
             VALUES ($1, $2, $3, $4, $5,
                     COALESCE($6, 150.00), COALESCE($7, 'USD'), COALESCE($8, 'Africa/Accra'),
                     COALESCE($9, 'en'), COALESCE($10, true), COALESCE($11, true),
                     COALESCE($12, true), COALESCE($13, false), COALESCE($14, false),
                     COALESCE($15, false), COALESCE($16, 'daily'),
                     COALESCE($17, '{{}}'::jsonb), COALESCE($18, 'light'))
             ON CONFLICT (user_id) DO UPDATE SET
                full_name = COALESCE(EXCLUDED.full_name, admin_settings.full_name),
                email = COALESCE(EXCLUDED.email, admin_settings.email),
                company = COALESCE(EXCLUDED.company, admin_settings.company),
                phone = COALESCE(EXCLUDED.phone, admin_settings.phone),
                default_hourly_rate = COALESCE($6, admin_settings.default_hourly_rate),
                currency = COALESCE($7, admin_settings.currency),
                timezone = COALESCE($8, admin_settings.timezone),
                language = COALESCE($9, admin_settings.language),
                email_reminders = COALESCE($10, admin_settings.email_reminders),
                project_updates = COALESCE($11, admin_settings.project_updates),
                invoice_due_reminders = COALESCE($12, admin_settings.invoice_due_reminders),
                marketing_emails = COALESCE($13, admin_settings.marketing_emails),
                maintenance_mode = COALESCE($14, admin_settings.maintenance_mode),
                debug_mode = COALESCE($15, admin_settings.debug_mode),
                backup_frequency = COALESCE($16, admin_settings.backup_frequency),
                dashboard_layout = COALESCE($17, admin_settings.dashboard_layout),
                theme = COALESCE($18, admin_settings.theme),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AdminSettings>(&query)
            .bind(user_id)
            .bind(&input.full_name)
            .bind(&input.email)
            .bind(&input.company)
            .bind(&input.phone)
            .bind(input.default_hourly_rate)
            .bind(&input.currency)
            .bind(&input.timezone)
            .bind(&input.language)
            .bind(input.email_reminders)
            .bind(input.project_updates)
            .bind(input.invoice_due_reminders)
            .bind(input.marketing_emails)
            .bind(input.maintenance_mode)
            .bind(input.debug_mode)
            .bind(&input.backup_frequency)
            .bind(&input.dashboard_layout)
            .bind(&input.theme)
            .fetch_one(pool)
            .await
    }
}
