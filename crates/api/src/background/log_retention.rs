//! Daily purge of old system log rows and stale auth sessions.

use std::time::Duration;

use chrono::Utc;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use atelier_db::repositories::{SessionRepo, SystemLogRepo};

/// How often the retention job runs.
const RETENTION_INTERVAL: Duration = Duration::from_secs(86_400); // 24 hours

/// Run the retention loop until `cancel` is triggered.
///
/// `retention_days` comes from `ServerConfig::system_log_retention_days`.
pub async fn run(pool: PgPool, retention_days: i64, cancel: CancellationToken) {
    tracing::info!(
        retention_days,
        interval_secs = RETENTION_INTERVAL.as_secs(),
        "Log retention job started"
    );

    let mut interval = tokio::time::interval(RETENTION_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Log retention job stopping");
                break;
            }
            _ = interval.tick() => {
                let cutoff = Utc::now() - chrono::Duration::days(retention_days);
                match SystemLogRepo::purge_older_than(&pool, cutoff).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Log retention: purged old rows");
                    }
                    Ok(_) => {
                        tracing::debug!("Log retention: no rows to purge");
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "Log retention: purge failed");
                    }
                }

                match SessionRepo::purge_stale(&pool).await {
                    Ok(deleted) if deleted > 0 => {
                        tracing::info!(deleted, "Session purge: removed stale sessions");
                    }
                    Ok(_) => {}
                    Err(e) => {
                        tracing::error!(error = %e, "Session purge failed");
                    }
                }
            }
        }
    }
}
