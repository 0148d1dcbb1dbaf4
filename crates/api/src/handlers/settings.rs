//! Handlers for per-user admin settings (admin role only).

use axum::extract::State;
use axum::Json;
use validator::Validate;

use atelier_db::models::settings::{AdminSettings, SaveAdminSettings};
use atelier_db::repositories::SettingsRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// GET /api/v1/settings
///
/// The row is materialized with defaults on first read, so the frontend
/// always gets a full settings object.
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
) -> AppResult<Json<AdminSettings>> {
    let settings = match SettingsRepo::find_by_user(&state.pool, user.user_id).await? {
        Some(settings) => settings,
        None => {
            SettingsRepo::upsert(&state.pool, user.user_id, &SaveAdminSettings::default()).await?
        }
    };
    Ok(Json(settings))
}

/// PUT /api/v1/settings
pub async fn save(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    Json(input): Json<SaveAdminSettings>,
) -> AppResult<Json<AdminSettings>> {
    input.validate()?;
    let settings = SettingsRepo::upsert(&state.pool, user.user_id, &input).await?;
    Ok(Json(settings))
}
