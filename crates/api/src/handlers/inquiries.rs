//! Handlers for the `/inquiries` resource.
//!
//! Intake (`create`) is the one deliberately public write endpoint: the
//! contact form on the public site posts here without credentials, and the
//! inquiry is hard-assigned to the configured owner account. Everything
//! else is owner-scoped.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use validator::Validate;

use atelier_core::error::CoreError;
use atelier_core::leads;
use atelier_core::status::{InquirySource, InquiryStatus, LogCategory, ServiceKind};
use atelier_core::types::DbId;
use atelier_db::models::client::{Client, CreateClient};
use atelier_db::models::inquiry::{CreateInquiry, Inquiry, UpdateInquiry};
use atelier_db::models::project::{CreateProject, Project};
use atelier_db::models::system_log::CreateSystemLog;
use atelier_db::repositories::{
    ClientRepo, InquiryRepo, ProjectRepo, SystemLogRepo, UserRepo,
};
use atelier_db::{clamp_limit, clamp_offset};

use crate::error::{not_found, AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::state::AppState;

/// Query params for `GET /inquiries`.
#[derive(Debug, Deserialize)]
pub struct InquiryListQuery {
    pub status: Option<InquiryStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Fetch an inquiry owned by the caller or bail with 404.
async fn ensure_inquiry(state: &AppState, user_id: DbId, id: DbId) -> AppResult<Inquiry> {
    InquiryRepo::find_by_id(&state.pool, user_id, id)
        .await?
        .ok_or(not_found("Inquiry", id))
}

// ---------------------------------------------------------------------------
// Public intake
// ---------------------------------------------------------------------------

/// POST /api/v1/inquiries (public, no auth)
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateInquiry>,
) -> AppResult<(StatusCode, Json<Inquiry>)> {
    input.validate()?;

    // Resolve the studio owner the inquiry lands with. An unconfigured or
    // missing owner account is a deployment error, not a caller error.
    let owner = UserRepo::find_by_username(&state.pool, &state.config.owner_username)
        .await?
        .ok_or_else(|| {
            AppError::InternalError(format!(
                "Owner account '{}' does not exist",
                state.config.owner_username
            ))
        })?;

    let score = leads::lead_score(
        input.service_requested.unwrap_or(ServiceKind::Other),
        input.budget_range,
        input.timeline,
        input.source.unwrap_or(InquirySource::Website),
    );

    let inquiry = InquiryRepo::create(&state.pool, owner.id, &input, score).await?;

    SystemLogRepo::insert(
        &state.pool,
        &CreateSystemLog::info(
            LogCategory::User,
            format!("New inquiry from {}", inquiry.client_email),
        )
        .by_user(owner.id),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(inquiry)))
}

// ---------------------------------------------------------------------------
// Owner-scoped CRUD
// ---------------------------------------------------------------------------

/// GET /api/v1/inquiries
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<InquiryListQuery>,
) -> AppResult<Json<Vec<Inquiry>>> {
    let inquiries = InquiryRepo::list(
        &state.pool,
        user.user_id,
        query.status,
        clamp_limit(query.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        clamp_offset(query.offset),
    )
    .await?;
    Ok(Json(inquiries))
}

/// GET /api/v1/inquiries/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Inquiry>> {
    let inquiry = ensure_inquiry(&state, user.user_id, id).await?;
    Ok(Json(inquiry))
}

/// PUT /api/v1/inquiries/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInquiry>,
) -> AppResult<Json<Inquiry>> {
    input.validate()?;
    let existing = ensure_inquiry(&state, user.user_id, id).await?;

    // Scoring inputs may have changed; derive the score from the merged row.
    let score = leads::lead_score(
        input.service_requested.unwrap_or(existing.service_requested),
        input.budget_range.or(existing.budget_range),
        input.timeline.or(existing.timeline),
        input.source.unwrap_or(existing.source),
    );

    let inquiry = InquiryRepo::update(&state.pool, user.user_id, id, &input, score)
        .await?
        .ok_or(not_found("Inquiry", id))?;
    Ok(Json(inquiry))
}

/// DELETE /api/v1/inquiries/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = InquiryRepo::delete(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Inquiry", id))
    }
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Find or create the client for an inquiry, then link and mark it WON.
async fn convert_inquiry_to_client(
    state: &AppState,
    user: &AuthUser,
    inquiry: &Inquiry,
) -> AppResult<Client> {
    let existing =
        ClientRepo::find_by_contact_email(&state.pool, user.user_id, &inquiry.client_email)
            .await?;

    let client = match existing {
        Some(client) => client,
        None => {
            let mut message = inquiry.message.clone();
            message.truncate(200);
            let input = CreateClient {
                name: inquiry.client_name.clone(),
                company: inquiry.client_company.clone(),
                contact_email: inquiry.client_email.clone(),
                phone: inquiry.client_phone.clone(),
                address: None,
                status: None,
                notes: Some(format!("Converted from inquiry: {message}...")),
                website: None,
                industry: None,
                secondary_email: None,
                secondary_phone: None,
                tax_id: None,
                payment_terms: None,
            };
            ClientRepo::create(&state.pool, user.user_id, &input).await?
        }
    };

    InquiryRepo::mark_converted(&state.pool, user.user_id, inquiry.id, client.id)
        .await?
        .ok_or(not_found("Inquiry", inquiry.id))?;

    SystemLogRepo::insert(
        &state.pool,
        &CreateSystemLog::info(
            LogCategory::User,
            format!("Inquiry {} converted to client {}", inquiry.id, client.id),
        )
        .by_user(user.user_id),
    )
    .await?;

    Ok(client)
}

/// POST /api/v1/inquiries/{id}/convert-client
pub async fn convert_client(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<Client>)> {
    let inquiry = ensure_inquiry(&state, user.user_id, id).await?;
    if inquiry.status == InquiryStatus::Won && inquiry.converted_client_id.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Inquiry has already been converted".into(),
        )));
    }
    let client = convert_inquiry_to_client(&state, &user, &inquiry).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// POST /api/v1/inquiries/{id}/convert-project
///
/// Converts to a client first (if needed), then creates a PLANNING project
/// seeded from the inquiry's answers: budget bracket midpoint, estimated
/// hours scaled by budget, and the default conversion hourly rate.
pub async fn convert_project(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<(StatusCode, Json<Project>)> {
    let inquiry = ensure_inquiry(&state, user.user_id, id).await?;

    let client = match inquiry.converted_client_id {
        Some(client_id) => ClientRepo::find_by_id(&state.pool, user.user_id, client_id)
            .await?
            .ok_or(not_found("Client", client_id))?,
        None => convert_inquiry_to_client(&state, &user, &inquiry).await?,
    };

    let budget = inquiry.budget_range.map(leads::budget_amount);
    let estimated_hours = leads::estimated_hours(inquiry.service_requested, inquiry.budget_range);

    let input = CreateProject {
        client_id: client.id,
        inquiry_id: Some(inquiry.id),
        title: leads::project_title(inquiry.service_requested),
        description: Some(format!("Inquiry: {}", inquiry.message)),
        slug: None,
        intro: None,
        client_type: None,
        industry: None,
        logo: None,
        case_study: None,
        status: None,
        project_phase: None,
        budget,
        hourly_rate: Some(leads::DEFAULT_PROJECT_HOURLY_RATE.into()),
        start_date: None,
        end_date: None,
        estimated_hours: Some(estimated_hours),
        design_tools: None,
        technologies: None,
        priority: Some(inquiry.priority),
    };

    let project = ProjectRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(project)))
}
