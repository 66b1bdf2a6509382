//! Spa Package API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{SpaPackage, SpaPackageCreate, SpaPackageUpdate};
use crate::db::repository::SpaPackageRepository;
use crate::utils::{AppError, AppResponse, AppResult, ok_with_message};

/// GET /api/spa/packages
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<SpaPackage>>> {
    let repo = SpaPackageRepository::new(state.db.clone());
    let packages = repo.find_all().await?;
    Ok(Json(packages))
}

/// GET /api/spa/packages/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<SpaPackage>> {
    let repo = SpaPackageRepository::new(state.db.clone());
    let package = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Package {} not found", id)))?;
    Ok(Json(package))
}

/// POST /api/spa/packages
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SpaPackageCreate>,
) -> AppResult<(StatusCode, Json<SpaPackage>)> {
    payload.validate()?;
    let repo = SpaPackageRepository::new(state.db.clone());
    let package = repo.create(payload).await?;
    Ok((StatusCode::CREATED, Json(package)))
}

/// PUT /api/spa/packages/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SpaPackageUpdate>,
) -> AppResult<Json<SpaPackage>> {
    payload.validate()?;
    let repo = SpaPackageRepository::new(state.db.clone());
    let package = repo.update(&id, payload).await?;
    Ok(Json(package))
}

/// PATCH /api/spa/packages/:id/toggle
pub async fn toggle_active(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<SpaPackage>>> {
    let repo = SpaPackageRepository::new(state.db.clone());
    let package = repo.toggle_active(&id).await?;
    let message = if package.is_active {
        "Package activated"
    } else {
        "Package deactivated"
    };
    Ok(ok_with_message(package, message))
}

/// DELETE /api/spa/packages/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<()>>> {
    let repo = SpaPackageRepository::new(state.db.clone());
    repo.delete(&id).await?;
    Ok(ok_with_message((), "Package deleted successfully"))
}
