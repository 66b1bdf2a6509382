//! Therapist API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Therapist, TherapistCreate, TherapistUpdate};
use crate::db::repository::TherapistRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/spa/therapists
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Therapist>>> {
    let repo = TherapistRepository::new(state.db.clone());
    let therapists = repo.find_all().await?;
    Ok(Json(therapists))
}

/// GET /api/spa/therapists/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Therapist>> {
    let repo = TherapistRepository::new(state.db.clone());
    let therapist = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Therapist {} not found", id)))?;
    Ok(Json(therapist))
}

/// POST /api/spa/therapists
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TherapistCreate>,
) -> AppResult<(StatusCode, Json<Therapist>)> {
    payload.validate()?;
    let repo = TherapistRepository::new(state.db.clone());
    let therapist = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(therapist)))
}

/// PUT /api/spa/therapists/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TherapistUpdate>,
) -> AppResult<Json<Therapist>> {
    payload.validate()?;
    let repo = TherapistRepository::new(state.db.clone());
    let therapist = repo.update(&id, payload).await?;
    Ok(Json(therapist))
}

/// PATCH /api/spa/therapists/:id/toggle
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<Therapist>>> {
    let repo = TherapistRepository::new(state.db.clone());
    let therapist = repo.toggle_active(&id).await?;
    let message = if therapist.is_active {
        "Therapist activated"
    } else {
        "Therapist deactivated"
    };
    Ok(ok_with_message(therapist, message))
}

/// DELETE /api/spa/therapists/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = TherapistRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message((), "Therapist deleted successfully"))
}
