//! Repository for the `inquiries` table.

use sqlx::PgPool;

use atelier_core::status::InquiryStatus;
use atelier_core::types::DbId;

use crate::models::inquiry::{CreateInquiry, Inquiry, UpdateInquiry};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, converted_client_id, client_name, client_email, \
                       client_phone, client_company, message, service_requested, budget_range, \
                       timeline, priority, status, notes, follow_up_date, reminder_sent, tags, \
                       lead_score, source, created_at, updated_at";

/// Provides CRUD operations for inquiries.
pub struct InquiryRepo;

impl InquiryRepo {
    /// Insert a new inquiry assigned to `user_id`, returning the created
    /// row. `lead_score` is computed by the caller from the scoring inputs.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateInquiry,
        lead_score: i32,
    ) -> Result<Inquiry, sqlx::Error> {
        let tags = serde_json::to_value(input.tags.clone().unwrap_or_default())
            .unwrap_or_else(|_| serde_json::json!([]));
        let query = format!(
            "INSERT INTO inquiries (user_id, client_name, client_email, client_phone,
                                    client_company, message, service_requested, budget_range,
                                    timeline, priority, source, tags, lead_score)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'OTHER'), $8, $9,
                     COALESCE($10, 'MEDIUM'), COALESCE($11, 'WEBSITE'), $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(user_id)
            .bind(&input.client_name)
            .bind(&input.client_email)
            .bind(&input.client_phone)
            .bind(&input.client_company)
            .bind(&input.message)
            .bind(input.service_requested)
            .bind(input.budget_range)
            .bind(input.timeline)
            .bind(input.priority)
            .bind(input.source)
            .bind(tags)
            .bind(lead_score)
            .fetch_one(pool)
            .await
    }

    /// Find an inquiry owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Inquiry>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inquiries WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List inquiries for `user_id`, newest first, optionally by status.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        status: Option<InquiryStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Inquiry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inquiries
             WHERE user_id = $1 AND ($2::inquiry_status IS NULL OR status = $2)
             ORDER BY created_at DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(user_id)
            .bind(status)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update an inquiry. Only non-`None` fields in `input` are applied.
    ///
    /// `lead_score` is re-derived by the caller whenever scoring inputs
    /// change, and passed in full.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateInquiry,
        lead_score: i32,
    ) -> Result<Option<Inquiry>, sqlx::Error> {
        let tags = input
            .tags
            .as_ref()
            .map(|t| serde_json::to_value(t).unwrap_or_else(|_| serde_json::json!([])));
        let query = format!(
            "UPDATE inquiries SET
                client_name = COALESCE($3, client_name),
                client_email = COALESCE($4, client_email),
                client_phone = COALESCE($5, client_phone),
                client_company = COALESCE($6, client_company),
                message = COALESCE($7, message),
                service_requested = COALESCE($8, service_requested),
                budget_range = COALESCE($9, budget_range),
                timeline = COALESCE($10, timeline),
                priority = COALESCE($11, priority),
                status = COALESCE($12, status),
                notes = COALESCE($13, notes),
                follow_up_date = COALESCE($14, follow_up_date),
                reminder_sent = COALESCE($15, reminder_sent),
                source = COALESCE($16, source),
                tags = COALESCE($17, tags),
                lead_score = $18,
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.client_name)
            .bind(&input.client_email)
            .bind(&input.client_phone)
            .bind(&input.client_company)
            .bind(&input.message)
            .bind(input.service_requested)
            .bind(input.budget_range)
            .bind(input.timeline)
            .bind(input.priority)
            .bind(input.status)
            .bind(&input.notes)
            .bind(input.follow_up_date)
            .bind(input.reminder_sent)
            .bind(input.source)
            .bind(tags)
            .bind(lead_score)
            .fetch_optional(pool)
            .await
    }

    /// Record a conversion: link the client and mark the inquiry WON.
    pub async fn mark_converted(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        client_id: DbId,
    ) -> Result<Option<Inquiry>, sqlx::Error> {
        let query = format!(
            "UPDATE inquiries SET
                converted_client_id = $3,
                status = 'WON',
                updated_at = NOW()
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inquiry>(&query)
            .bind(id)
            .bind(user_id)
            .bind(client_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an inquiry. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inquiries WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
