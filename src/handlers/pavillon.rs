// src/handlers/pavillon.rs

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
        pavillon::{CreatePavillonPayload, Pavillon, UpdatePavillonPayload},
    },
};

#[utoipa::path(
    get,
    path = "/api/pavillon",
    tag = "Pavillons",
    params(AnneeScope),
    responses((status = 200, description = "Pavillons de l'année demandée (ou active)", body = Vec<Pavillon>)),
    security(("api_jwt" = []))
)]
pub async fn list_pavillons(
    State(app_state): State<AppState>,
    Query(scope): Query<AnneeScope>,
) -> Result<impl IntoResponse, AppError> {
    let annee_id = app_state.annee_service.resolve_scope(scope.annee_universitaire_id).await?;
    let pavillons = app_state.structure_service.list_pavillons(annee_id).await?;
    Ok((StatusCode::OK, Json(pavillons)))
}

#[utoipa::path(
    get,
    path = "/api/pavillon/annee-universitaire/{id}",
    tag = "Pavillons",
    params(("id" = Uuid, Path, description = "ID de l'année")),
    responses((status = 200, description = "Pavillons de l'année", body = Vec<Pavillon>)),
    security(("api_jwt" = []))
)]
pub async fn list_pavillons_by_annee(
    State(app_state): State<AppState>,
    Path(annee_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pavillons = app_state.structure_service.list_pavillons(Some(annee_id)).await?;
    Ok((StatusCode::OK, Json(pavillons)))
}

#[utoipa::path(
    get,
    path = "/api/pavillon/byCampus/{id}",
    tag = "Pavillons",
    params(("id" = Uuid, Path, description = "ID du campus")),
    responses((status = 200, description = "Pavillons du campus", body = Vec<Pavillon>)),
    security(("api_jwt" = []))
)]
pub async fn list_pavillons_by_campus(
    State(app_state): State<AppState>,
    Path(campus_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pavillons = app_state.structure_service.list_pavillons_by_campus(campus_id).await?;
    Ok((StatusCode::OK, Json(pavillons)))
}

#[utoipa::path(
    get,
    path = "/api/pavillon/{id}",
    tag = "Pavillons",
    params(("id" = Uuid, Path, description = "ID du pavillon")),
    responses(
        (status = 200, description = "Pavillon trouvé", body = Pavillon),
        (status = 404, description = "Pavillon introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_pavillon(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pavillon = app_state.structure_service.get_pavillon(id).await?;
    Ok((StatusCode::OK, Json(pavillon)))
}

#[utoipa::path(
    post,
    path = "/api/pavillon",
    tag = "Pavillons",
    request_body = CreatePavillonPayload,
    responses(
        (status = 201, description = "Pavillon créé (année héritée du campus)", body = Pavillon),
        (status = 400, description = "Campus inexistant ou année incohérente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_pavillon(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Json(payload): Json<CreatePavillonPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let pavillon = app_state.structure_service.create_pavillon(payload).await?;
    Ok((StatusCode::CREATED, Json(pavillon)))
}

#[utoipa::path(
    patch,
    path = "/api/pavillon/{id}",
    tag = "Pavillons",
    params(("id" = Uuid, Path, description = "ID du pavillon")),
    request_body = UpdatePavillonPayload,
    responses(
        (status = 200, description = "Pavillon mis à jour", body = Pavillon),
        (status = 404, description = "Pavillon introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_pavillon(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePavillonPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let pavillon = app_state.structure_service.update_pavillon(id, payload).await?;
    Ok((StatusCode::OK, Json(pavillon)))
}

#[utoipa::path(
    delete,
    path = "/api/pavillon/{id}",
    tag = "Pavillons",
    params(("id" = Uuid, Path, description = "ID du pavillon")),
    responses(
        (status = 200, description = "Pavillon supprimé", body = Pavillon),
        (status = 409, description = "Pavillon encore référencé par des chambres")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_pavillon(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let pavillon = app_state.structure_service.delete_pavillon(id).await?;
    Ok((StatusCode::OK, Json(pavillon)))
}
