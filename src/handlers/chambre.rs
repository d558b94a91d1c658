// src/handlers/chambre.rs

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
        chambre::{Chambre, CreateChambrePayload, UpdateChambrePayload},
    },
};

#[utoipa::path(
    get,
    path = "/api/chambre",
    tag = "Chambres",
    params(AnneeScope),
    responses((status = 200, description = "Chambres de l'année demandée (ou active)", body = Vec<Chambre>)),
    security(("api_jwt" = []))
)]
pub async fn list_chambres(
    State(app_state): State<AppState>,
    Query(scope): Query<AnneeScope>,
) -> Result<impl IntoResponse, AppError> {
    let annee_id = app_state.annee_service.resolve_scope(scope.annee_universitaire_id).await?;
    let chambres = app_state.structure_service.list_chambres(annee_id).await?;
    Ok((StatusCode::OK, Json(chambres)))
}

#[utoipa::path(
    get,
    path = "/api/chambre/annee-universitaire/{id}",
    tag = "Chambres",
    params(("id" = Uuid, Path, description = "ID de l'année")),
    responses((status = 200, description = "Chambres de l'année", body = Vec<Chambre>)),
    security(("api_jwt" = []))
)]
pub async fn list_chambres_by_annee(
    State(app_state): State<AppState>,
    Path(annee_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let chambres = app_state.structure_service.list_chambres(Some(annee_id)).await?;
    Ok((StatusCode::OK, Json(chambres)))
}

#[utoipa::path(
    get,
    path = "/api/chambre/byPavillon/{id}",
    tag = "Chambres",
    params(("id" = Uuid, Path, description = "ID du pavillon")),
    responses((status = 200, description = "Chambres du pavillon", body = Vec<Chambre>)),
    security(("api_jwt" = []))
)]
pub async fn list_chambres_by_pavillon(
    State(app_state): State<AppState>,
    Path(pavillon_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let chambres = app_state.structure_service.list_chambres_by_pavillon(pavillon_id).await?;
    Ok((StatusCode::OK, Json(chambres)))
}

#[utoipa::path(
    get,
    path = "/api/chambre/{id}",
    tag = "Chambres",
    params(("id" = Uuid, Path, description = "ID de la chambre")),
    responses(
        (status = 200, description = "Chambre trouvée", body = Chambre),
        (status = 404, description = "Chambre introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_chambre(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let chambre = app_state.structure_service.get_chambre(id).await?;
    Ok((StatusCode::OK, Json(chambre)))
}

#[utoipa::path(
    post,
    path = "/api/chambre",
    tag = "Chambres",
    request_body = CreateChambrePayload,
    responses(
        (status = 201, description = "Chambre créée (année héritée du pavillon)", body = Chambre),
        (status = 400, description = "Pavillon inexistant, places négatives ou année incohérente")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_chambre(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Json(payload): Json<CreateChambrePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let chambre = app_state.structure_service.create_chambre(payload).await?;
    Ok((StatusCode::CREATED, Json(chambre)))
}

#[utoipa::path(
    patch,
    path = "/api/chambre/{id}",
    tag = "Chambres",
    params(("id" = Uuid, Path, description = "ID de la chambre")),
    request_body = UpdateChambrePayload,
    responses(
        (status = 200, description = "Chambre mise à jour", body = Chambre),
        (status = 404, description = "Chambre introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_chambre(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateChambrePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let chambre = app_state.structure_service.update_chambre(id, payload).await?;
    Ok((StatusCode::OK, Json(chambre)))
}

#[utoipa::path(
    delete,
    path = "/api/chambre/{id}",
    tag = "Chambres",
    params(("id" = Uuid, Path, description = "ID de la chambre")),
    responses(
        (status = 200, description = "Chambre supprimée", body = Chambre),
        (status = 409, description = "Chambre encore référencée par des dossiers")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_chambre(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let chambre = app_state.structure_service.delete_chambre(id).await?;
    Ok((StatusCode::OK, Json(chambre)))
}
