//! Repository for the `client_notes` table.

use sqlx::PgPool;

use atelier_core::types::DbId;

use crate::models::client::{ClientNote, CreateClientNote, UpdateClientNote};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, user_id, inquiry_id, note_type, title, content, \
                       follow_up_required, follow_up_date, follow_up_completed, \
                       created_at, updated_at";

/// Provides CRUD operations for client notes.
pub struct ClientNoteRepo;

impl ClientNoteRepo {
    /// Insert a new note, returning the created row.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        user_id: DbId,
        input: &CreateClientNote,
    ) -> Result<ClientNote, sqlx::Error> {
        let query = format!(
            "INSERT INTO client_notes (client_id, user_id, inquiry_id, note_type, title,
                                       content, follow_up_required, follow_up_date)
             VALUES ($1, $2, $3, COALESCE($4, 'GENERAL'), $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientNote>(&query)
            .bind(client_id)
            .bind(user_id)
            .bind(input.inquiry_id)
            .bind(input.note_type)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.follow_up_required)
            .bind(input.follow_up_date)
            .fetch_one(pool)
            .await
    }

    /// List notes for a client, newest first.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ClientNote>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_notes
             WHERE client_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, ClientNote>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Update a note scoped to its client. Only non-`None` fields apply.
    pub async fn update(
        pool: &PgPool,
        client_id: DbId,
        id: DbId,
        input: &UpdateClientNote,
    ) -> Result<Option<ClientNote>, sqlx::Error> {
        let query = format!(
            "UPDATE client_notes SET
                note_type = COALESCE($3, note_type),
                title = COALESCE($4, title),
                content = COALESCE($5, content),
                follow_up_required = COALESCE($6, follow_up_required),
                follow_up_date = COALESCE($7, follow_up_date),
                follow_up_completed = COALESCE($8, follow_up_completed),
                updated_at = NOW()
             WHERE id = $1 AND client_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ClientNote>(&query)
            .bind(id)
            .bind(client_id)
            .bind(input.note_type)
            .bind(&input.title)
            .bind(&input.content)
            .bind(input.follow_up_required)
            .bind(input.follow_up_date)
            .bind(input.follow_up_completed)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, client_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM client_notes WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
