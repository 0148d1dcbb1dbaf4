//! System log model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use atelier_core::status::{LogCategory, LogLevel};
use atelier_core::types::{DbId, Timestamp};

/// A system log row from the `system_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SystemLog {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub level: LogLevel,
    pub category: LogCategory,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for writing a log entry.
#[derive(Debug, Clone)]
pub struct CreateSystemLog {
    pub user_id: Option<DbId>,
    pub level: LogLevel,
    pub category: LogCategory,
    pub message: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub metadata: serde_json::Value,
}

impl CreateSystemLog {
    /// An INFO-level entry with empty metadata.
    pub fn info(category: LogCategory, message: impl Into<String>) -> Self {
        Self {
            user_id: None,
            level: LogLevel::Info,
            category,
            message: message.into(),
            ip_address: None,
            user_agent: None,
            metadata: serde_json::json!({}),
        }
    }

    /// Attach the acting user.
    pub fn by_user(mut self, user_id: DbId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// Override the level.
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }
}

/// Query filter for listing system logs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SystemLogFilter {
    pub level: Option<LogLevel>,
    pub category: Option<LogCategory>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
