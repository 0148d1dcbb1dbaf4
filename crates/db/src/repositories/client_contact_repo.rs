//! Repository for the `client_contacts` table.

use sqlx::PgPool;

use atelier_core::types::DbId;

use crate::models::client::{ClientContact, CreateClientContact, UpdateClientContact};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, client_id, name, title, email, phone, is_primary, \
                       created_at, updated_at";

/// Provides CRUD operations for client contacts.
///
/// At most one contact per client is primary; creating or updating a
/// contact as primary demotes the others first.
pub struct ClientContactRepo;

impl ClientContactRepo {
    /// Insert a new contact, returning the created row.
    pub async fn create(
        pool: &PgPool,
        client_id: DbId,
        input: &CreateClientContact,
    ) -> Result<ClientContact, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_primary {
            sqlx::query("UPDATE client_contacts SET is_primary = false WHERE client_id = $1")
                .bind(client_id)
                .execute(&mut *tx)
                .await?;
        }

        let query = format!(
            "INSERT INTO client_contacts (client_id, name, title, email, phone, is_primary)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let contact = sqlx::query_as::<_, ClientContact>(&query)
            .bind(client_id)
            .bind(&input.name)
            .bind(&input.title)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.is_primary)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(contact)
    }

    /// List contacts for a client, primary first, then by name.
    pub async fn list_by_client(
        pool: &PgPool,
        client_id: DbId,
    ) -> Result<Vec<ClientContact>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM client_contacts
             WHERE client_id = $1
             ORDER BY is_primary DESC, name"
        );
        sqlx::query_as::<_, ClientContact>(&query)
            .bind(client_id)
            .fetch_all(pool)
            .await
    }

    /// Update a contact scoped to its client. Only non-`None` fields apply.
    pub async fn update(
        pool: &PgPool,
        client_id: DbId,
        id: DbId,
        input: &UpdateClientContact,
    ) -> Result<Option<ClientContact>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        if input.is_primary == Some(true) {
            sqlx::query(
                "UPDATE client_contacts SET is_primary = false
                 WHERE client_id = $1 AND id <> $2",
            )
            .bind(client_id)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        }

        let query = format!(
            "UPDATE client_contacts SET
                name = COALESCE($3, name),
                title = COALESCE($4, title),
                email = COALESCE($5, email),
                phone = COALESCE($6, phone),
                is_primary = COALESCE($7, is_primary),
                updated_at = NOW()
             WHERE id = $1 AND client_id = $2
             RETURNING {COLUMNS}"
        );
        let contact = sqlx::query_as::<_, ClientContact>(&query)
            .bind(id)
            .bind(client_id)
            .bind(&input.name)
            .bind(&input.title)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.is_primary)
            .fetch_optional(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(contact)
    }

    /// Delete a contact. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, client_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM client_contacts WHERE id = $1 AND client_id = $2")
            .bind(id)
            .bind(client_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
