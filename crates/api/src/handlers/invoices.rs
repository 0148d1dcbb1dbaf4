//! Handlers for the `/invoices` resource: CRUD, lifecycle transitions,
//! line items, and time-log billing.
//!
//! Every mutation that can change what a client owes finishes with
//! `ClientRepo::recalculate_financials` so the denormalized totals never
//! drift from the source rows.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{Datelike, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use atelier_core::billing;
use atelier_core::error::CoreError;
use atelier_core::status::InvoiceStatus;
use atelier_core::types::{Date, DbId};
use atelier_db::models::invoice::{
    CreateInvoice, CreateInvoiceItem, Invoice, InvoiceItem, UpdateInvoice, UpdateInvoiceItem,
};
use atelier_db::repositories::{ClientRepo, InvoiceItemRepo, InvoiceRepo, TimeLogRepo};
use atelier_db::{clamp_limit, clamp_offset};

use crate::error::{not_found, AppError, AppResult};
use crate::handlers::clients::ensure_client;
use crate::middleware::auth::AuthUser;
use crate::query::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::state::AppState;

/// Query params for `GET /invoices`.
#[derive(Debug, Deserialize)]
pub struct InvoiceListQuery {
    pub status: Option<InvoiceStatus>,
    pub client_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for `POST /invoices/{id}/pay`.
#[derive(Debug, Default, Deserialize)]
pub struct PayRequest {
    /// Defaults to today when omitted.
    pub paid_date: Option<Date>,
}

/// Invoice detail: the row, its line items, and the overdue derivation.
#[derive(Debug, Serialize)]
pub struct InvoiceDetail {
    #[serde(flatten)]
    pub invoice: Invoice,
    pub items: Vec<InvoiceItem>,
    pub days_overdue: i64,
}

/// Fetch an invoice owned by the caller or bail with 404.
async fn ensure_invoice(state: &AppState, user_id: DbId, id: DbId) -> AppResult<Invoice> {
    InvoiceRepo::find_by_id(&state.pool, user_id, id)
        .await?
        .ok_or(not_found("Invoice", id))
}

/// Reject edits to anything but a DRAFT invoice.
fn ensure_draft(invoice: &Invoice) -> AppResult<()> {
    if invoice.status != InvoiceStatus::Draft {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Invoice {} is {}; only drafts can be edited",
            invoice.invoice_number, invoice.status
        ))));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

/// POST /api/v1/invoices
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<CreateInvoice>,
) -> AppResult<(StatusCode, Json<Invoice>)> {
    if input.due_date < input.issue_date {
        return Err(AppError::BadRequest(
            "due_date must not precede issue_date".into(),
        ));
    }
    ensure_client(&state, user.user_id, input.client_id).await?;

    let total = billing::invoice_total(
        input.subtotal.unwrap_or(Decimal::ZERO),
        input.tax.unwrap_or(Decimal::ZERO),
        input.discount.unwrap_or(Decimal::ZERO),
    )?;

    let invoice_number = match &input.invoice_number {
        Some(number) => number.clone(),
        None => {
            let year = input.issue_date.year();
            let seq = InvoiceRepo::next_number_in_year(&state.pool, user.user_id, year).await?;
            billing::format_invoice_number(year, seq)
        }
    };

    let invoice =
        InvoiceRepo::create(&state.pool, user.user_id, &input, &invoice_number, total).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// GET /api/v1/invoices
pub async fn list(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<InvoiceListQuery>,
) -> AppResult<Json<Vec<Invoice>>> {
    let invoices = InvoiceRepo::list(
        &state.pool,
        user.user_id,
        query.status,
        query.client_id,
        clamp_limit(query.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE),
        clamp_offset(query.offset),
    )
    .await?;
    Ok(Json(invoices))
}

/// GET /api/v1/invoices/overdue
pub async fn list_overdue(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<Invoice>>> {
    let invoices = InvoiceRepo::list_overdue(&state.pool, user.user_id).await?;
    Ok(Json(invoices))
}

/// GET /api/v1/invoices/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<InvoiceDetail>> {
    let invoice = ensure_invoice(&state, user.user_id, id).await?;
    let items = InvoiceItemRepo::list_by_invoice(&state.pool, invoice.id).await?;
    let days_overdue = billing::days_overdue(
        invoice.status,
        invoice.due_date,
        Utc::now().date_naive(),
    );
    Ok(Json(InvoiceDetail {
        invoice,
        items,
        days_overdue,
    }))
}

/// PUT /api/v1/invoices/{id}
///
/// DRAFT only. With line items present, `subtotal` stays derived from the
/// items regardless of what the caller sends.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvoice>,
) -> AppResult<Json<Invoice>> {
    let existing = ensure_invoice(&state, user.user_id, id).await?;
    ensure_draft(&existing)?;

    let total = billing::invoice_total(
        input.subtotal.unwrap_or(existing.subtotal),
        input.tax.unwrap_or(existing.tax),
        input.discount.unwrap_or(existing.discount),
    )?;

    let mut invoice = InvoiceRepo::update_draft(&state.pool, user.user_id, id, &input, total)
        .await?
        .ok_or(not_found("Invoice", id))?;

    let items = InvoiceItemRepo::list_by_invoice(&state.pool, id).await?;
    if !items.is_empty() {
        invoice = InvoiceRepo::resync_totals_from_items(&state.pool, id)
            .await?
            .ok_or(not_found("Invoice", id))?;
    }
    Ok(Json(invoice))
}

/// DELETE /api/v1/invoices/{id} (DRAFT only)
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let existing = ensure_invoice(&state, user.user_id, id).await?;
    ensure_draft(&existing)?;
    let deleted = InvoiceRepo::delete_draft(&state.pool, user.user_id, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found("Invoice", id))
    }
}

// ---------------------------------------------------------------------------
// Lifecycle transitions
// ---------------------------------------------------------------------------

/// Apply a validated status transition and recompute the client's totals.
async fn transition(
    state: &AppState,
    user: &AuthUser,
    id: DbId,
    to: InvoiceStatus,
    paid_date: Option<Date>,
) -> AppResult<Invoice> {
    let existing = ensure_invoice(state, user.user_id, id).await?;
    billing::check_transition(existing.status, to)?;

    let invoice = InvoiceRepo::set_status(&state.pool, user.user_id, id, to, paid_date)
        .await?
        .ok_or(not_found("Invoice", id))?;

    ClientRepo::recalculate_financials(&state.pool, invoice.client_id).await?;
    tracing::info!(
        invoice_id = invoice.id,
        invoice_number = %invoice.invoice_number,
        from = %existing.status,
        to = %to,
        "Invoice transitioned"
    );
    Ok(invoice)
}

/// POST /api/v1/invoices/{id}/send
pub async fn send(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Invoice>> {
    let invoice = transition(&state, &user, id, InvoiceStatus::Sent, None).await?;
    Ok(Json(invoice))
}

/// POST /api/v1/invoices/{id}/pay
pub async fn pay(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<PayRequest>,
) -> AppResult<Json<Invoice>> {
    let paid_date = input.paid_date.unwrap_or_else(|| Utc::now().date_naive());
    let invoice = transition(&state, &user, id, InvoiceStatus::Paid, Some(paid_date)).await?;
    Ok(Json(invoice))
}

/// POST /api/v1/invoices/{id}/cancel
pub async fn cancel(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Invoice>> {
    let invoice = transition(&state, &user, id, InvoiceStatus::Cancelled, None).await?;
    Ok(Json(invoice))
}

/// POST /api/v1/invoices/{id}/bill-time
///
/// Attach the client's completed, billable, uninvoiced time logs to this
/// DRAFT invoice and refresh the client's outstanding balance (the hours
/// move from "unbilled work" into the invoice).
pub async fn bill_time(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let invoice = ensure_invoice(&state, user.user_id, id).await?;
    ensure_draft(&invoice)?;

    let attached =
        TimeLogRepo::attach_to_invoice(&state.pool, user.user_id, invoice.client_id, invoice.id)
            .await?;
    ClientRepo::recalculate_financials(&state.pool, invoice.client_id).await?;

    Ok(Json(serde_json::json!({ "attached_time_logs": attached })))
}

// ---------------------------------------------------------------------------
// Line items
// ---------------------------------------------------------------------------

/// GET /api/v1/invoices/{id}/items
pub async fn list_items(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<InvoiceItem>>> {
    ensure_invoice(&state, user.user_id, id).await?;
    let items = InvoiceItemRepo::list_by_invoice(&state.pool, id).await?;
    Ok(Json(items))
}

/// POST /api/v1/invoices/{id}/items (DRAFT only)
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateInvoiceItem>,
) -> AppResult<(StatusCode, Json<InvoiceItem>)> {
    let invoice = ensure_invoice(&state, user.user_id, id).await?;
    ensure_draft(&invoice)?;

    let quantity = input.quantity.unwrap_or(Decimal::ONE);
    if quantity <= Decimal::ZERO || input.rate < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "quantity must be positive and rate non-negative".into(),
        ));
    }
    let amount = billing::line_amount(quantity, input.rate);

    let item = InvoiceItemRepo::create(&state.pool, id, &input, amount).await?;
    InvoiceRepo::resync_totals_from_items(&state.pool, id).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/v1/invoices/{id}/items/{item_id} (DRAFT only)
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, item_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateInvoiceItem>,
) -> AppResult<Json<InvoiceItem>> {
    let invoice = ensure_invoice(&state, user.user_id, id).await?;
    ensure_draft(&invoice)?;

    let existing = InvoiceItemRepo::find_by_id(&state.pool, id, item_id)
        .await?
        .ok_or(not_found("InvoiceItem", item_id))?;

    let description = input.description.unwrap_or(existing.description);
    let quantity = input.quantity.unwrap_or(existing.quantity);
    let rate = input.rate.unwrap_or(existing.rate);
    if quantity <= Decimal::ZERO || rate < Decimal::ZERO {
        return Err(AppError::BadRequest(
            "quantity must be positive and rate non-negative".into(),
        ));
    }
    let amount = billing::line_amount(quantity, rate);

    let item =
        InvoiceItemRepo::update(&state.pool, id, item_id, &description, quantity, rate, amount)
            .await?
            .ok_or(not_found("InvoiceItem", item_id))?;
    InvoiceRepo::resync_totals_from_items(&state.pool, id).await?;
    Ok(Json(item))
}

/// DELETE /api/v1/invoices/{id}/items/{item_id} (DRAFT only)
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthUser,
    Path((id, item_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    let invoice = ensure_invoice(&state, user.user_id, id).await?;
    ensure_draft(&invoice)?;

    let deleted = InvoiceItemRepo::delete(&state.pool, id, item_id).await?;
    if !deleted {
        return Err(not_found("InvoiceItem", item_id));
    }
    InvoiceRepo::resync_totals_from_items(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
