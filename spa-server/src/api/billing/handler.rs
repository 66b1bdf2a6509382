//! Billing API Handlers
//!
//! Invoices are read and edited directly here. Direct edits take the values
//! as given; nothing flows back onto the appointment.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{BillingCreate, BillingDetail, BillingUpdate, SpaBilling};
use crate::db::repository::BillingRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/spa/billing - all invoices with appointments expanded
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<BillingDetail>>> {
    let repo = BillingRepository::new(state.db.clone());
    let billings = repo.find_all_detail().await?;
    Ok(Json(billings))
}

/// GET /api/spa/billing/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<BillingDetail>> {
    let repo = BillingRepository::new(state.db.clone());
    let billing = repo
        .find_detail(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Billing {} not found", id)))?;
    Ok(Json(billing))
}

/// GET /api/spa/billing/appointment/:id - the invoice paired to an appointment
pub async fn get_by_appointment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<BillingDetail>> {
    let repo = BillingRepository::new(state.db.clone());
    let billing = repo
        .find_for_appointment(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Billing not found for this appointment".to_string()))?;
    Ok(Json(billing))
}

/// POST /api/spa/billing - manual invoice, outside the derivation path
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BillingCreate>,
) -> AppResult<(StatusCode, Json<BillingDetail>)> {
    payload.validate()?;
    let repo = BillingRepository::new(state.db.clone());
    let created = repo.create(payload).await?;
    let id = created
        .id
        .as_ref()
        .map(|t| t.id.to_raw())
        .ok_or_else(|| AppError::Internal("billing record has no id".to_string()))?;
    let detail = repo
        .find_detail(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Billing {} not found", id)))?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/spa/billing/:id - direct invoice edit
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BillingUpdate>,
) -> AppResult<Json<SpaBilling>> {
    payload.validate()?;
    let repo = BillingRepository::new(state.db.clone());
    let billing = repo.update(&id, payload).await?;
    Ok(Json(billing))
}

/// DELETE /api/spa/billing/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = BillingRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message((), "Billing record deleted successfully"))
}
