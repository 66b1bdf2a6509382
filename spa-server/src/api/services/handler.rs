//! Spa Service API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{SpaService, SpaServiceCreate, SpaServiceUpdate};
use crate::db::repository::SpaServiceRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/spa/services - all catalog entries
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SpaService>>> {
    let repo = SpaServiceRepository::new(state.db.clone());
    let services = repo.find_all().await?;
    Ok(Json(services))
}

/// GET /api/spa/services/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SpaService>> {
    let repo = SpaServiceRepository::new(state.db.clone());
    let service = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Service {} not found", id)))?;
    Ok(Json(service))
}

/// POST /api/spa/services
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SpaServiceCreate>,
) -> AppResult<(StatusCode, Json<SpaService>)> {
    payload.validate()?;
    let repo = SpaServiceRepository::new(state.db.clone());
    let service = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(service)))
}

/// PUT /api/spa/services/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SpaServiceUpdate>,
) -> AppResult<Json<SpaService>> {
    payload.validate()?;
    let repo = SpaServiceRepository::new(state.db.clone());
    let service = repo.update(&id, payload).await?;
    Ok(Json(service))
}

/// PATCH /api/spa/services/:id/toggle - flip availability
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<SpaService>>> {
    let repo = SpaServiceRepository::new(state.db.clone());
    let service = repo.toggle_active(&id).await?;
    let message = if service.is_active {
        "Service activated"
    } else {
        "Service deactivated"
    };
    Ok(ok_with_message(service, message))
}

/// DELETE /api/spa/services/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = SpaServiceRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message((), "Service deleted successfully"))
}
