//! Spa Room API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{SpaRoom, SpaRoomCreate, SpaRoomUpdate};
use crate::db::repository::SpaRoomRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/spa/rooms
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SpaRoom>>> {
    let repo = SpaRoomRepository::new(state.db.clone());
    let rooms = repo.find_all().await?;
    Ok(Json(rooms))
}

/// GET /api/spa/rooms/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SpaRoom>> {
    let repo = SpaRoomRepository::new(state.db.clone());
    let room = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Room {} not found", id)))?;
    Ok(Json(room))
}

/// POST /api/spa/rooms
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SpaRoomCreate>,
) -> AppResult<(StatusCode, Json<SpaRoom>)> {
    payload.validate()?;
    let repo = SpaRoomRepository::new(state.db.clone());
    let room = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

/// PUT /api/spa/rooms/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SpaRoomUpdate>,
) -> AppResult<Json<SpaRoom>> {
    payload.validate()?;
    let repo = SpaRoomRepository::new(state.db.clone());
    let room = repo.update(&id, payload).await?;
    Ok(Json(room))
}

/// PATCH /api/spa/rooms/:id/toggle
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<SpaRoom>>> {
    let repo = SpaRoomRepository::new(state.db.clone());
    let room = repo.toggle_active(&id).await?;
    let message = if room.is_active {
        "Room activated"
    } else {
        "Room deactivated"
    };
    Ok(ok_with_message(room, message))
}

/// DELETE /api/spa/rooms/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = SpaRoomRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message((), "Room deleted successfully"))
}
