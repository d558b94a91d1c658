// src/handlers/allocation.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{Gestion, RequireRole},
    models::allocation::{
        AllocationMateriel, AllocationStats, CreateAllocationPayload, UpdateAllocationPayload,
    },
};

#[utoipa::path(
    get,
    path = "/api/allocation-materiel",
    tag = "Allocations",
    responses((status = 200, description = "Toutes les allocations de matériel", body = Vec<AllocationMateriel>)),
    security(("api_jwt" = []))
)]
pub async fn list_allocations(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let allocations = app_state.allocation_repo.list().await?;
    Ok((StatusCode::OK, Json(allocations)))
}

#[utoipa::path(
    get,
    path = "/api/allocation-materiel/byDossier/{id}",
    tag = "Allocations",
    params(("id" = Uuid, Path, description = "ID du dossier")),
    responses((status = 200, description = "Allocations du dossier", body = Vec<AllocationMateriel>)),
    security(("api_jwt" = []))
)]
pub async fn list_allocations_by_dossier(
    State(app_state): State<AppState>,
    Path(dossier_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let allocations = app_state.allocation_repo.list_by_dossier(dossier_id).await?;
    Ok((StatusCode::OK, Json(allocations)))
}

#[utoipa::path(
    get,
    path = "/api/allocation-materiel/byDossier/{id}/stats",
    tag = "Allocations",
    params(("id" = Uuid, Path, description = "ID du dossier")),
    responses((status = 200, description = "Totaux par état pour le dossier", body = AllocationStats)),
    security(("api_jwt" = []))
)]
pub async fn get_allocation_stats(
    State(app_state): State<AppState>,
    Path(dossier_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let allocations = app_state.allocation_repo.list_by_dossier(dossier_id).await?;
    Ok((StatusCode::OK, Json(AllocationStats::from_allocations(&allocations))))
}

#[utoipa::path(
    get,
    path = "/api/allocation-materiel/{id}",
    tag = "Allocations",
    params(("id" = Uuid, Path, description = "ID de l'allocation")),
    responses(
        (status = 200, description = "Allocation trouvée", body = AllocationMateriel),
        (status = 404, description = "Allocation introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_allocation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let allocation = app_state
        .allocation_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Allocation"))?;
    Ok((StatusCode::OK, Json(allocation)))
}

#[utoipa::path(
    post,
    path = "/api/allocation-materiel",
    tag = "Allocations",
    request_body = CreateAllocationPayload,
    responses(
        (status = 201, description = "Allocation enregistrée", body = AllocationMateriel),
        (status = 400, description = "Dossier ou équipement inexistant, nombre invalide")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_allocation(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateAllocationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let allocation = app_state.allocation_repo.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(allocation)))
}

#[utoipa::path(
    patch,
    path = "/api/allocation-materiel/{id}",
    tag = "Allocations",
    params(("id" = Uuid, Path, description = "ID de l'allocation")),
    request_body = UpdateAllocationPayload,
    responses(
        (status = 200, description = "Allocation mise à jour", body = AllocationMateriel),
        (status = 404, description = "Allocation introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_allocation(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAllocationPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let allocation = app_state
        .allocation_repo
        .update(id, &payload)
        .await?
        .ok_or(AppError::NotFound("Allocation"))?;
    Ok((StatusCode::OK, Json(allocation)))
}

#[utoipa::path(
    delete,
    path = "/api/allocation-materiel/{id}",
    tag = "Allocations",
    params(("id" = Uuid, Path, description = "ID de l'allocation")),
    responses(
        (status = 200, description = "Allocation supprimée", body = AllocationMateriel),
        (status = 404, description = "Allocation introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_allocation(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let allocation = app_state
        .allocation_repo
        .delete(id)
        .await?
        .ok_or(AppError::NotFound("Allocation"))?;
    Ok((StatusCode::OK, Json(allocation)))
}
