//! User goals model and DTOs (analytics targets).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::types::{DbId, Money, Timestamp};

/// A goals row (one per user) from the `user_goals` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserGoals {
    pub id: DbId,
    pub user_id: DbId,
    pub monthly_revenue_target: Option<Money>,
    pub client_satisfaction_target: Option<Money>,
    pub current_client_satisfaction: Option<Money>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for saving goals (upsert).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveUserGoals {
    pub monthly_revenue_target: Option<Money>,
    pub client_satisfaction_target: Option<Money>,
    pub current_client_satisfaction: Option<Money>,
}
