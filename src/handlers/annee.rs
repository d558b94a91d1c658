// src/handlers/annee.rs

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
    models::{
        annee::{AnneeUniversitaire, CreateAnneePayload, ImportPayload, ImportSummary, UpdateAnneePayload},
        stats::StatsSnapshot,
    },
};

#[utoipa::path(
    get,
    path = "/api/annee-universitaire",
    tag = "Années universitaires",
    responses(
        (status = 200, description = "Toutes les années, la plus récente d'abord", body = Vec<AnneeUniversitaire>),
        (status = 401, description = "Non authentifié")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_annees(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let annees = app_state.annee_service.list().await?;
    Ok((StatusCode::OK, Json(annees)))
}

#[utoipa::path(
    get,
    path = "/api/annee-universitaire/active",
    tag = "Années universitaires",
    responses(
        (status = 200, description = "Année active", body = AnneeUniversitaire),
        (status = 404, description = "Aucune année active")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_active_annee(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let annee = app_state.annee_service.active().await?;
    Ok((StatusCode::OK, Json(annee)))
}

#[utoipa::path(
    get,
    path = "/api/annee-universitaire/{id}",
    tag = "Années universitaires",
    params(("id" = Uuid, Path, description = "ID de l'année")),
    responses(
        (status = 200, description = "Année trouvée", body = AnneeUniversitaire),
        (status = 404, description = "Année introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_annee(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let annee = app_state.annee_service.get(id).await?;
    Ok((StatusCode::OK, Json(annee)))
}

#[utoipa::path(
    post,
    path = "/api/annee-universitaire",
    tag = "Années universitaires",
    request_body = CreateAnneePayload,
    responses(
        (status = 201, description = "Année créée (les autres sont désactivées si isActif)", body = AnneeUniversitaire),
        (status = 400, description = "Payload invalide"),
        (status = 403, description = "Rôle insuffisant"),
        (status = 409, description = "Nom déjà utilisé")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_annee(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Json(payload): Json<CreateAnneePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let annee = app_state.annee_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(annee)))
}

#[utoipa::path(
    patch,
    path = "/api/annee-universitaire/{id}",
    tag = "Années universitaires",
    params(("id" = Uuid, Path, description = "ID de l'année")),
    request_body = UpdateAnneePayload,
    responses(
        (status = 200, description = "Année mise à jour", body = AnneeUniversitaire),
        (status = 404, description = "Année introuvable"),
        (status = 409, description = "Nom déjà utilisé")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_annee(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateAnneePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let annee = app_state.annee_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(annee)))
}

#[utoipa::path(
    delete,
    path = "/api/annee-universitaire/{id}",
    tag = "Années universitaires",
    params(("id" = Uuid, Path, description = "ID de l'année")),
    responses(
        (status = 200, description = "Année supprimée", body = AnneeUniversitaire),
        (status = 404, description = "Année introuvable"),
        (status = 409, description = "Année active ou encore référencée")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_annee(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let annee = app_state.annee_service.delete(id).await?;
    Ok((StatusCode::OK, Json(annee)))
}

#[utoipa::path(
    post,
    path = "/api/annee-universitaire/import",
    tag = "Années universitaires",
    request_body = ImportPayload,
    responses(
        (status = 200, description = "Structure copiée (campus, pavillons, chambres)", body = ImportSummary),
        (status = 400, description = "Année source identique à la destination"),
        (status = 404, description = "Année introuvable"),
        (status = 409, description = "La destination contient déjà des campus")
    ),
    security(("api_jwt" = []))
)]
pub async fn import_annee(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Json(payload): Json<ImportPayload>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.annee_service.import(payload).await?;
    Ok((StatusCode::OK, Json(summary)))
}

#[utoipa::path(
    get,
    path = "/api/annee-universitaire/statistiques/{id}",
    tag = "Années universitaires",
    params(("id" = Uuid, Path, description = "ID de l'année")),
    responses(
        (status = 200, description = "Statistiques d'occupation de l'année", body = StatsSnapshot),
        (status = 404, description = "Année introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_statistiques(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let snapshot = app_state.stats_service.snapshot(id).await?;
    Ok((StatusCode::OK, Json(snapshot)))
}
