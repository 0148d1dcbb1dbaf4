//! Handlers for the public `/portfolio` surface.
//!
//! Read-only, unauthenticated, and limited to portfolio-safe columns; no
//! budgets, rates, or client identities leak here.

use axum::extract::{Path, State};
use axum::Json;

use atelier_db::models::project::{PortfolioCaseStudy, PortfolioEntry};
use atelier_db::repositories::ProjectRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/portfolio
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<PortfolioEntry>>> {
    let entries = ProjectRepo::portfolio_list(&state.pool).await?;
    Ok(Json(entries))
}

/// GET /api/v1/portfolio/{slug}
pub async fn get_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<PortfolioCaseStudy>> {
    let case_study = ProjectRepo::portfolio_find_by_slug(&state.pool, &slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No case study published under '{slug}'")))?;
    Ok(Json(case_study))
}
