// src/handlers/etudiant.rs

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
    models::etudiant::{CreateEtudiantPayload, Etudiant, UpdateEtudiantPayload},
};

#[utoipa::path(
    get,
    path = "/api/etudiant",
    tag = "Étudiants",
    responses((status = 200, description = "Tous les étudiants", body = Vec<Etudiant>)),
    security(("api_jwt" = []))
)]
pub async fn list_etudiants(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let etudiants = app_state.etudiant_repo.list().await?;
    Ok((StatusCode::OK, Json(etudiants)))
}

#[utoipa::path(
    get,
    path = "/api/etudiant/{id}",
    tag = "Étudiants",
    params(("id" = Uuid, Path, description = "ID de l'étudiant")),
    responses(
        (status = 200, description = "Étudiant trouvé", body = Etudiant),
        (status = 404, description = "Étudiant introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_etudiant(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let etudiant = app_state
        .etudiant_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Étudiant"))?;
    Ok((StatusCode::OK, Json(etudiant)))
}

#[utoipa::path(
    get,
    path = "/api/etudiant/ncs/{ncs}",
    tag = "Étudiants",
    params(("ncs" = String, Path, description = "Numéro de carte d'étudiant")),
    responses(
        (status = 200, description = "Étudiant trouvé", body = Etudiant),
        (status = 404, description = "Aucun étudiant avec ce NCS")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_etudiant_by_ncs(
    State(app_state): State<AppState>,
    Path(ncs): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let etudiant = app_state
        .etudiant_repo
        .find_by_ncs(ncs.trim())
        .await?
        .ok_or(AppError::NotFound("Étudiant"))?;
    Ok((StatusCode::OK, Json(etudiant)))
}

#[utoipa::path(
    post,
    path = "/api/etudiant",
    tag = "Étudiants",
    request_body = CreateEtudiantPayload,
    responses(
        (status = 201, description = "Étudiant créé", body = Etudiant),
        (status = 400, description = "Payload invalide"),
        (status = 409, description = "NCS déjà enregistré")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_etudiant(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateEtudiantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let etudiant = app_state.etudiant_repo.create(&payload).await?;
    tracing::info!("Étudiant {} enregistré", etudiant.ncs);
    Ok((StatusCode::CREATED, Json(etudiant)))
}

#[utoipa::path(
    patch,
    path = "/api/etudiant/{id}",
    tag = "Étudiants",
    params(("id" = Uuid, Path, description = "ID de l'étudiant")),
    request_body = UpdateEtudiantPayload,
    responses(
        (status = 200, description = "Étudiant mis à jour", body = Etudiant),
        (status = 404, description = "Étudiant introuvable"),
        (status = 409, description = "NCS déjà enregistré")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_etudiant(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEtudiantPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let etudiant = app_state
        .etudiant_repo
        .update(id, &payload)
        .await?
        .ok_or(AppError::NotFound("Étudiant"))?;
    Ok((StatusCode::OK, Json(etudiant)))
}

#[utoipa::path(
    delete,
    path = "/api/etudiant/{id}",
    tag = "Étudiants",
    params(("id" = Uuid, Path, description = "ID de l'étudiant")),
    responses(
        (status = 200, description = "Étudiant supprimé", body = Etudiant),
        (status = 404, description = "Étudiant introuvable"),
        (status = 409, description = "Étudiant encore lié à des dossiers")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_etudiant(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let etudiant = app_state
        .etudiant_repo
        .delete(id)
        .await?
        .ok_or(AppError::NotFound("Étudiant"))?;
    Ok((StatusCode::OK, Json(etudiant)))
}
