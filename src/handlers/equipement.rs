// src/handlers/equipement.rs

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
    models::equipement::{CreateEquipementPayload, Equipement, UpdateEquipementPayload},
};

#[utoipa::path(
    get,
    path = "/api/equipement",
    tag = "Équipements",
    responses((status = 200, description = "Catalogue des équipements", body = Vec<Equipement>)),
    security(("api_jwt" = []))
)]
pub async fn list_equipements(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let equipements = app_state.equipement_repo.list().await?;
    Ok((StatusCode::OK, Json(equipements)))
}

#[utoipa::path(
    get,
    path = "/api/equipement/{id}",
    tag = "Équipements",
    params(("id" = Uuid, Path, description = "ID de l'équipement")),
    responses(
        (status = 200, description = "Équipement trouvé", body = Equipement),
        (status = 404, description = "Équipement introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_equipement(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let equipement = app_state
        .equipement_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Équipement"))?;
    Ok((StatusCode::OK, Json(equipement)))
}

#[utoipa::path(
    post,
    path = "/api/equipement",
    tag = "Équipements",
    request_body = CreateEquipementPayload,
    responses(
        (status = 201, description = "Équipement ajouté au catalogue", body = Equipement),
        (status = 409, description = "Nom déjà utilisé")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_equipement(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Json(payload): Json<CreateEquipementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let equipement = app_state
        .equipement_repo
        .create(&payload.nom, payload.description.as_deref())
        .await?;
    Ok((StatusCode::CREATED, Json(equipement)))
}

// Servido em PATCH e PUT
#[utoipa::path(
    patch,
    path = "/api/equipement/{id}",
    tag = "Équipements",
    params(("id" = Uuid, Path, description = "ID de l'équipement")),
    request_body = UpdateEquipementPayload,
    responses(
        (status = 200, description = "Équipement mis à jour", body = Equipement),
        (status = 404, description = "Équipement introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_equipement(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEquipementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let equipement = app_state
        .equipement_repo
        .update(id, payload.nom.as_deref(), payload.description.as_deref())
        .await?
        .ok_or(AppError::NotFound("Équipement"))?;
    Ok((StatusCode::OK, Json(equipement)))
}

#[utoipa::path(
    delete,
    path = "/api/equipement/{id}",
    tag = "Équipements",
    params(("id" = Uuid, Path, description = "ID de l'équipement")),
    responses(
        (status = 200, description = "Équipement supprimé", body = Equipement),
        (status = 409, description = "Équipement encore alloué")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_equipement(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let equipement = app_state
        .equipement_repo
        .delete(id)
        .await?
        .ok_or(AppError::NotFound("Équipement"))?;
    Ok((StatusCode::OK, Json(equipement)))
}
