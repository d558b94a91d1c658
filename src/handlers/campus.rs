// src/handlers/campus.rs

use axum::{
    extract::{Path, Query, State},
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
    models::{
        annee::AnneeScope,
        campus::{Campus, CreateCampusPayload, UpdateCampusPayload},
    },
};

#[utoipa::path(
    get,
    path = "/api/campus",
    tag = "Campus",
    params(AnneeScope),
    responses(
        (status = 200, description = "Campus de l'année demandée (ou active)", body = Vec<Campus>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_campus(
    State(app_state): State<AppState>,
    Query(scope): Query<AnneeScope>,
) -> Result<impl IntoResponse, AppError> {
    let annee_id = app_state.annee_service.resolve_scope(scope.annee_universitaire_id).await?;
    let campus = app_state.structure_service.list_campus(annee_id).await?;
    Ok((StatusCode::OK, Json(campus)))
}

#[utoipa::path(
    get,
    path = "/api/campus/{id}",
    tag = "Campus",
    params(("id" = Uuid, Path, description = "ID du campus")),
    responses(
        (status = 200, description = "Campus trouvé", body = Campus),
        (status = 404, description = "Campus introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_campus(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let campus = app_state.structure_service.get_campus(id).await?;
    Ok((StatusCode::OK, Json(campus)))
}

#[utoipa::path(
    post,
    path = "/api/campus",
    tag = "Campus",
    request_body = CreateCampusPayload,
    responses(
        (status = 201, description = "Campus créé", body = Campus),
        (status = 400, description = "Payload invalide ou aucune année active"),
        (status = 403, description = "Rôle insuffisant")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_campus(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Json(payload): Json<CreateCampusPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let campus = app_state.structure_service.create_campus(payload).await?;
    Ok((StatusCode::CREATED, Json(campus)))
}

#[utoipa::path(
    patch,
    path = "/api/campus/{id}",
    tag = "Campus",
    params(("id" = Uuid, Path, description = "ID du campus")),
    request_body = UpdateCampusPayload,
    responses(
        (status = 200, description = "Campus mis à jour", body = Campus),
        (status = 404, description = "Campus introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_campus(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCampusPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let campus = app_state.structure_service.update_campus(id, payload).await?;
    Ok((StatusCode::OK, Json(campus)))
}

#[utoipa::path(
    delete,
    path = "/api/campus/{id}",
    tag = "Campus",
    params(("id" = Uuid, Path, description = "ID du campus")),
    responses(
        (status = 200, description = "Campus supprimé", body = Campus),
        (status = 404, description = "Campus introuvable"),
        (status = 409, description = "Campus encore référencé par des pavillons")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_campus(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let campus = app_state.structure_service.delete_campus(id).await?;
    Ok((StatusCode::OK, Json(campus)))
}
