//! Hourly sweep that flips past-due invoices and milestones to OVERDUE.
//!
//! Invoices moving to OVERDUE do not change what a client owes, but the
//! affected clients are recomputed anyway so the sweep also repairs any
//! drift left behind by crashed request handlers.

use std::collections::HashSet;
use std::time::Duration;

use sqlx::PgPool;
use tokio_util::sync::CancellationToken;

use atelier_db::repositories::{ClientRepo, InvoiceRepo, MilestoneRepo};

/// How often the sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(3600); // 1 hour

/// Run the overdue sweep loop until `cancel` is triggered.
pub async fn run(pool: PgPool, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = SWEEP_INTERVAL.as_secs(),
        "Overdue sweep started"
    );

    let mut interval = tokio::time::interval(SWEEP_INTERVAL);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Overdue sweep stopping");
                break;
            }
            _ = interval.tick() => {
                sweep_once(&pool).await;
            }
        }
    }
}

/// One sweep pass. Errors are logged and the loop keeps going; a failed
/// pass is retried on the next tick.
async fn sweep_once(pool: &PgPool) {
    match InvoiceRepo::mark_overdue_past_due(pool).await {
        Ok(client_ids) => {
            if !client_ids.is_empty() {
                tracing::info!(count = client_ids.len(), "Invoices marked overdue");
            }
            let distinct: HashSet<_> = client_ids.into_iter().collect();
            for client_id in distinct {
                if let Err(e) = ClientRepo::recalculate_financials(pool, client_id).await {
                    tracing::error!(client_id, error = %e, "Client recompute failed");
                }
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Overdue sweep: invoice pass failed");
        }
    }

    match MilestoneRepo::mark_overdue_past_due(pool).await {
        Ok(updated) if updated > 0 => {
            tracing::info!(updated, "Milestones marked overdue");
        }
        Ok(_) => {}
        Err(e) => {
            tracing::error!(error = %e, "Overdue sweep: milestone pass failed");
        }
    }
}
