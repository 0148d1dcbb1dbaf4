//! Handlers for the `/clients` resource and its nested contacts and notes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use atelier_core::status::ClientStatus;
use atelier_core::types::DbId;
use atelier_db::models::client::{
    Client, ClientContact, ClientCounts, ClientNote, CreateClient, CreateClientContact,
    CreateClientNote, UpdateClient, UpdateClientContact, UpdateClientNote,
};
use atelier_db::repositories::{ClientContactRepo, ClientNoteRepo, ClientRepo};
use atelier_db::{clamp_limit, clamp_offset};

use crate::error::{not_found, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::state::AppState;

/// Query params for `GET /clients`.
#[derive(Debug, Deserialize)]
pub struct ClientListQuery {
    pub status: Option<ClientStatus>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Client detail: the row plus read-time relation counts.
#[derive(Debug, Serialize)]
pub struct ClientDetail {
    #[serde(flatten)]
    pub client: Client,
    pub counts: ClientCounts,
}

/// Fetch a client owned by the caller or bail with 404.
pub(crate) async fn ensure_client(
    state: &AppState,
    user_id: DbId,
    client_id: DbId,
) -> AppResult<Client> {
    ClientRepo::find_by_id(&state.pool, user_id, client_id)
        .await?
        .ok_or(not_found("Client", client_id))
}

// ---------------------------------------------------------------------------
// Client CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateClient>,
) -> AppResult<(StatusCode, Json<Client>)> {
    input.validate()?;
    let client = ClientRepo::create(&state.pool, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(client)))
}

/// GET /api/v1/clients
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ClientListQuery>,
) -> AppResult<Json<Vec<Client>>> {
    let clients = ClientRepo::list(
        &state.pool,
        user.user_id,
        query.status,
        clamp_limit(query.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        clamp_offset(query.offset),
    )
    .await?;
    Ok(Json(clients))
}

/// GET /api/v1/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<ClientDetail>> {
    let client = ensure_client(&state, user.user_id, id).await?;
    let counts = ClientRepo::counts(&state.pool, client.id).await?;
    Ok(Json(ClientDetail { client, counts }))
}

/// PUT /api/v1/clients/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateClient>,
) -> AppResult<Json<Client>> {
    input.validate()?;
    let client = ClientRepo::update(&state.pool, user.user_id, id, &input)
        .await?
        .ok_or(not_found("Client", id))?;
    Ok(Json(client))
}

/// DELETE /api/v1/clients/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = ClientRepo::delete(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Client", id))
    }
}

/// POST /api/v1/clients/{id}/recalculate
///
/// Force a financial recompute, e.g. after bulk-importing invoices.
pub async fn recalculate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Client>> {
    ensure_client(&state, user.user_id, id).await?;
    let client = ClientRepo::recalculate_financials(&state.pool, id)
        .await?
        .ok_or(not_found("Client", id))?;
    Ok(Json(client))
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

/// GET /api/v1/clients/{id}/contacts
pub async fn list_contacts(
    State(state): State<AppState>,
    user: AuthUser,
    Path(client_id): Path<DbId>,
) -> AppResult<Json<Vec<ClientContact>>> {
    ensure_client(&state, user.user_id, client_id).await?;
    let contacts = ClientContactRepo::list_by_client(&state.pool, client_id).await?;
    Ok(Json(contacts))
}

/// POST /api/v1/clients/{id}/contacts
pub async fn create_contact(
    State(state): State<AppState>,
    user: AuthUser,
    Path(client_id): Path<DbId>,
    Json(input): Json<CreateClientContact>,
) -> AppResult<(StatusCode, Json<ClientContact>)> {
    input.validate()?;
    ensure_client(&state, user.user_id, client_id).await?;
    let contact = ClientContactRepo::create(&state.pool, client_id, &input).await?;
    Ok((StatusCode::CREATED, Json(contact)))
}

/// PUT /api/v1/clients/{id}/contacts/{contact_id}
pub async fn update_contact(
    State(state): State<AppState>,
    user: AuthUser,
    Path((client_id, contact_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateClientContact>,
) -> AppResult<Json<ClientContact>> {
    ensure_client(&state, user.user_id, client_id).await?;
    let contact = ClientContactRepo::update(&state.pool, client_id, contact_id, &input)
        .await?
        .ok_or(not_found("ClientContact", contact_id))?;
    Ok(Json(contact))
}

/// DELETE /api/v1/clients/{id}/contacts/{contact_id}
pub async fn delete_contact(
    State(state): State<AppState>,
    user: AuthUser,
    Path((client_id, contact_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_client(&state, user.user_id, client_id).await?;
    let deleted = ClientContactRepo::delete(&state.pool, client_id, contact_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("ClientContact", contact_id))
    }
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// GET /api/v1/clients/{id}/notes
pub async fn list_notes(
    State(state): State<AppState>,
    user: AuthUser,
    Path(client_id): Path<DbId>,
) -> AppResult<Json<Vec<ClientNote>>> {
    ensure_client(&state, user.user_id, client_id).await?;
    let notes = ClientNoteRepo::list_by_client(&state.pool, client_id).await?;
    Ok(Json(notes))
}

/// POST /api/v1/clients/{id}/notes
pub async fn create_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path(client_id): Path<DbId>,
    Json(input): Json<CreateClientNote>,
) -> AppResult<(StatusCode, Json<ClientNote>)> {
    ensure_client(&state, user.user_id, client_id).await?;
    let note = ClientNoteRepo::create(&state.pool, client_id, user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /api/v1/clients/{id}/notes/{note_id}
pub async fn update_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path((client_id, note_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateClientNote>,
) -> AppResult<Json<ClientNote>> {
    ensure_client(&state, user.user_id, client_id).await?;
    let note = ClientNoteRepo::update(&state.pool, client_id, note_id, &input)
        .await?
        .ok_or(not_found("ClientNote", note_id))?;
    Ok(Json(note))
}

/// DELETE /api/v1/clients/{id}/notes/{note_id}
pub async fn delete_note(
    State(state): State<AppState>,
    user: AuthUser,
    Path((client_id, note_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    ensure_client(&state, user.user_id, client_id).await?;
    let deleted = ClientNoteRepo::delete(&state.pool, client_id, note_id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("ClientNote", note_id))
    }
}
