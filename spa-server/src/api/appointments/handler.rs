//! Appointment API Handlers
//!
//! Every mutation here also maintains the paired invoice as a side effect.
//! Invoice failures are logged and swallowed: the appointment write is the
//! primary outcome and always stands on its own.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::billing;
use crate::core::ServerState;
use crate::db::models::{
    AppointmentCreate, AppointmentDetail, AppointmentStatus, AppointmentUpdate, SpaAppointment,
};
use crate::db::repository::{AppointmentRepository, BillingRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/spa/appointments - all appointments with references expanded
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AppointmentDetail>>> {
    let repo = AppointmentRepository::new(state.db.clone());
    let appointments = repo.find_all_detail().await?;
    Ok(Json(appointments))
}

/// GET /api/spa/appointments/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppointmentDetail>> {
    let repo = AppointmentRepository::new(state.db.clone());
    let appointment = repo
        .find_detail(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", id)))?;
    Ok(Json(appointment))
}

/// Re-reads the written record with its references expanded. Mutation
/// responses carry the expanded shape, same as the read endpoints.
async fn populate(
    repo: &AppointmentRepository,
    appointment: &SpaAppointment,
) -> AppResult<AppointmentDetail> {
    let id = appointment
        .id
        .as_ref()
        .map(|t| t.id.to_raw())
        .ok_or_else(|| AppError::Internal("appointment record has no id".to_string()))?;
    repo.find_detail(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Appointment {} not found", id)))
}

/// POST /api/spa/appointments
///
/// Creates the appointment, then materializes its invoice. The 201 response
/// carries the appointment even if invoice creation failed.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AppointmentCreate>,
) -> AppResult<(StatusCode, Json<AppointmentDetail>)> {
    payload.validate()?;
    let repo = AppointmentRepository::new(state.db.clone());
    let appointment = repo.create(payload).await?;

    let billing_repo = BillingRepository::new(state.db.clone());
    if let Err(e) = billing::create_for_appointment(&billing_repo, &appointment).await {
        tracing::error!(
            target: "billing",
            error = %e,
            appointment_id = %appointment.appointment_id,
            "failed to create billing record"
        );
    }

    let detail = populate(&repo, &appointment).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// PUT /api/spa/appointments/:id
///
/// Applies the changes, then recomputes the paired invoice from the fresh
/// snapshots. When the appointment has no invoice, none is created.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AppointmentUpdate>,
) -> AppResult<Json<AppointmentDetail>> {
    payload.validate()?;
    let repo = AppointmentRepository::new(state.db.clone());
    let appointment = repo.update(&id, payload).await?;

    let billing_repo = BillingRepository::new(state.db.clone());
    if let Err(e) = billing::regenerate_for_appointment(&billing_repo, &appointment).await {
        tracing::error!(
            target: "billing",
            error = %e,
            appointment_id = %appointment.appointment_id,
            "failed to regenerate billing record"
        );
    }

    let detail = populate(&repo, &appointment).await?;
    Ok(Json(detail))
}

#[derive(Debug, Deserialize)]
pub struct StatusPayload {
    pub status: String,
}

/// PATCH /api/spa/appointments/:id/status
///
/// Unconditional set-and-save; any valid status can replace any other.
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StatusPayload>,
) -> AppResult<Json<AppResponse<AppointmentDetail>>> {
    let status: AppointmentStatus = payload
        .status
        .parse()
        .map_err(|e: String| AppError::Validation(e))?;

    let repo = AppointmentRepository::new(state.db.clone());
    let appointment = repo.set_status(&id, status).await?;
    let detail = populate(&repo, &appointment).await?;
    Ok(ok_with_message(detail, "Appointment status updated"))
}

/// DELETE /api/spa/appointments/:id
///
/// Removes the appointment and its invoice. An invoice that refuses to go is
/// logged and left orphaned.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<SpaAppointment>>> {
    let repo = AppointmentRepository::new(state.db.clone());
    let appointment = repo.delete(&id).await?;

    if let Some(link) = appointment.id.as_ref() {
        let billing_repo = BillingRepository::new(state.db.clone());
        if let Err(e) = billing::delete_for_appointment(&billing_repo, link).await {
            tracing::error!(
                target: "billing",
                error = %e,
                appointment_id = %appointment.appointment_id,
                "failed to delete billing record"
            );
        }
    }

    Ok(ok_with_message(
        appointment,
        "Appointment and associated billing permanently deleted",
    ))
}
