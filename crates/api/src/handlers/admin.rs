//! Handlers for the `/admin` surface: user management and system logs.
//!
//! Every endpoint here requires the `admin` role via [`RequireAdmin`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use atelier_core::error::CoreError;
use atelier_core::roles::{ROLE_ADMIN, ROLE_STAFF};
use atelier_core::status::LogCategory;
use atelier_core::types::DbId;
use atelier_db::models::system_log::{CreateSystemLog, SystemLog, SystemLogFilter};
use atelier_db::models::user::{CreateUser, UpdateUser, UserResponse};
use atelier_db::repositories::{SessionRepo, SystemLogRepo, UserRepo};

use crate::auth::password::{hash_password, validate_password_strength};
use crate::error::{not_found, AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::state::AppState;

/// Request body for `POST /admin/users` (plaintext password, hashed here).
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Defaults to `staff`.
    pub role: Option<String>,
}

/// Request body for `POST /admin/users/{id}/reset-password`.
#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub new_password: String,
}

/// Reject role strings outside the known set.
fn check_role(role: &str) -> AppResult<()> {
    if role != ROLE_ADMIN && role != ROLE_STAFF {
        return Err(AppError::BadRequest(format!("Unknown role '{role}'")));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = UserRepo::list(&state.pool).await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/admin/users
pub async fn create_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let role = input.role.unwrap_or_else(|| ROLE_STAFF.to_string());
    check_role(&role)?;
    validate_password_strength(&input.password)?;

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        username: input.username,
        email: input.email,
        password_hash,
        role,
    };
    create.validate()?;

    let user = UserRepo::create(&state.pool, &create).await?;

    SystemLogRepo::insert(
        &state.pool,
        &CreateSystemLog::info(
            LogCategory::Security,
            format!("User '{}' created", user.username),
        )
        .by_user(admin.user_id),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(not_found("User", id))?;
    Ok(Json(user.into()))
}

/// PUT /api/v1/admin/users/{id}
pub async fn update_user(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if let Some(role) = &input.role {
        check_role(role)?;
    }
    let user = UserRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(not_found("User", id))?;
    Ok(Json(user.into()))
}

/// DELETE /api/v1/admin/users/{id}
///
/// Deactivates rather than deletes: owned rows (clients, invoices, logs)
/// must survive the account. Active sessions are revoked.
pub async fn deactivate_user(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if id == admin.user_id {
        return Err(AppError::Core(CoreError::Conflict(
            "Cannot deactivate your own account".into(),
        )));
    }

    let deactivated = UserRepo::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(not_found("User", id));
    }
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    SystemLogRepo::insert(
        &state.pool,
        &CreateSystemLog::info(LogCategory::Security, format!("User {id} deactivated"))
            .by_user(admin.user_id),
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/admin/users/{id}/reset-password
pub async fn reset_password(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Path(id): Path<DbId>,
    Json(input): Json<ResetPasswordRequest>,
) -> AppResult<StatusCode> {
    validate_password_strength(&input.new_password)?;

    let password_hash = hash_password(&input.new_password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let updated = UserRepo::set_password_hash(&state.pool, id, &password_hash).await?;
    if !updated {
        return Err(not_found("User", id));
    }
    // Force re-login everywhere with the new credential.
    SessionRepo::revoke_all_for_user(&state.pool, id).await?;

    SystemLogRepo::insert(
        &state.pool,
        &CreateSystemLog::info(LogCategory::Security, format!("Password reset for user {id}"))
            .by_user(admin.user_id),
    )
    .await?;

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// System logs
// ---------------------------------------------------------------------------

/// GET /api/v1/admin/system-logs
pub async fn list_system_logs(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(filter): Query<SystemLogFilter>,
) -> AppResult<Json<Vec<SystemLog>>> {
    let logs = SystemLogRepo::list(&state.pool, &filter).await?;
    Ok(Json(logs))
}
