//! Repository for the `user_goals` table (one row per user).

use sqlx::PgPool;

use atelier_core::types::DbId;

use crate::models::goals::{SaveUserGoals, UserGoals};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, monthly_revenue_target, client_satisfaction_target, \
                       current_client_satisfaction, created_at, updated_at";

/// Provides read/upsert for per-user analytics goals.
pub struct GoalsRepo;

impl GoalsRepo {
    /// Find a user's goals. Returns `None` until the first save.
    pub async fn find_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Option<UserGoals>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_goals WHERE user_id = $1");
        sqlx::query_as::<_, UserGoals>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Upsert a user's goals. Fields present in `input` overwrite.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        input: &SaveUserGoals,
    ) -> Result<UserGoals, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_goals (user_id, monthly_revenue_target,
                                     client_satisfaction_target, current_client_satisfaction)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (user_id) DO UPDATE SET
                monthly_revenue_target = COALESCE($2, user_goals.monthly_revenue_target),
                client_satisfaction_target =
                    COALESCE($3, user_goals.client_satisfaction_target),
                current_client_satisfaction =
                    COALESCE($4, user_goals.current_client_satisfaction),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserGoals>(&query)
            .bind(user_id)
            .bind(input.monthly_revenue_target)
            .bind(input.client_satisfaction_target)
            .bind(input.current_client_satisfaction)
            .fetch_one(pool)
            .await
    }
}
