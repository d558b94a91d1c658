// src/handlers/dossier.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
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
        dossier::{CreateDossierPayload, Dossier, DossierDetail, UpdateDossierPayload},
    },
};

#[utoipa::path(
    get,
    path = "/api/dossier",
    tag = "Dossiers",
    params(AnneeScope),
    responses((status = 200, description = "Dossiers de l'année demandée (ou active), populés", body = Vec<DossierDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_dossiers(
    State(app_state): State<AppState>,
    Query(scope): Query<AnneeScope>,
) -> Result<impl IntoResponse, AppError> {
    let annee_id = app_state.annee_service.resolve_scope(scope.annee_universitaire_id).await?;
    let dossiers = app_state.dossier_service.list(annee_id).await?;
    Ok((StatusCode::OK, Json(dossiers)))
}

#[utoipa::path(
    get,
    path = "/api/dossier/byAnneeUniversitaire/{id}",
    tag = "Dossiers",
    params(("id" = Uuid, Path, description = "ID de l'année")),
    responses(
        (status = 200, description = "Dossiers de l'année", body = Vec<DossierDetail>),
        (status = 404, description = "Année introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_dossiers_by_annee(
    State(app_state): State<AppState>,
    Path(annee_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let dossiers = app_state.dossier_service.list_by_annee(annee_id).await?;
    Ok((StatusCode::OK, Json(dossiers)))
}

#[utoipa::path(
    get,
    path = "/api/dossier/byChambre/{id}",
    tag = "Dossiers",
    params(("id" = Uuid, Path, description = "ID de la chambre")),
    responses((status = 200, description = "Dossiers de la chambre", body = Vec<DossierDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_dossiers_by_chambre(
    State(app_state): State<AppState>,
    Path(chambre_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let dossiers = app_state.dossier_service.list_by_chambre(chambre_id).await?;
    Ok((StatusCode::OK, Json(dossiers)))
}

#[utoipa::path(
    get,
    path = "/api/dossier/byEtudiant/{id}",
    tag = "Dossiers",
    params(("id" = Uuid, Path, description = "ID de l'étudiant")),
    responses((status = 200, description = "Dossiers de l'étudiant", body = Vec<DossierDetail>)),
    security(("api_jwt" = []))
)]
pub async fn list_dossiers_by_etudiant(
    State(app_state): State<AppState>,
    Path(etudiant_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let dossiers = app_state.dossier_service.list_by_etudiant(etudiant_id).await?;
    Ok((StatusCode::OK, Json(dossiers)))
}

#[utoipa::path(
    get,
    path = "/api/dossier/{id}",
    tag = "Dossiers",
    params(("id" = Uuid, Path, description = "ID du dossier")),
    responses(
        (status = 200, description = "Dossier trouvé", body = DossierDetail),
        (status = 404, description = "Dossier introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dossier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let dossier = app_state.dossier_service.get(id).await?;
    Ok((StatusCode::OK, Json(dossier)))
}

#[utoipa::path(
    get,
    path = "/api/dossier/{id}/pdf",
    tag = "Dossiers",
    params(("id" = Uuid, Path, description = "ID du dossier")),
    responses(
        (status = 200, description = "Fiche du dossier", content_type = "application/pdf"),
        (status = 404, description = "Dossier introuvable"),
        (status = 500, description = "Polices absentes ou erreur de rendu")
    ),
    security(("api_jwt" = []))
)]
pub async fn generate_dossier_pdf(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    let (numero, pdf_bytes) = app_state.document_service.generate_dossier_pdf(id).await?;

    let headers = [
        (header::CONTENT_TYPE, "application/pdf".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"dossier_{}.pdf\"", numero),
        ),
    ];

    Ok((headers, pdf_bytes).into_response())
}

#[utoipa::path(
    post,
    path = "/api/dossier",
    tag = "Dossiers",
    request_body = CreateDossierPayload,
    responses(
        (status = 201, description = "Dossier créé (numéro attribué)", body = DossierDetail),
        (status = 400, description = "Chambre inexistante, montant négatif ou année incohérente"),
        (status = 409, description = "La chambre a déjà un dossier actif")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_dossier(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateDossierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validate_amounts()?;
    let dossier = app_state.dossier_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(dossier)))
}

#[utoipa::path(
    patch,
    path = "/api/dossier/{id}",
    tag = "Dossiers",
    params(("id" = Uuid, Path, description = "ID du dossier")),
    request_body = UpdateDossierPayload,
    responses(
        (status = 200, description = "Dossier mis à jour", body = DossierDetail),
        (status = 404, description = "Dossier introuvable"),
        (status = 409, description = "La chambre a déjà un dossier actif")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_dossier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDossierPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validate_amounts()?;
    let dossier = app_state.dossier_service.update(id, payload).await?;
    Ok((StatusCode::OK, Json(dossier)))
}

#[utoipa::path(
    delete,
    path = "/api/dossier/{id}",
    tag = "Dossiers",
    params(("id" = Uuid, Path, description = "ID du dossier")),
    responses(
        (status = 200, description = "Dossier supprimé", body = Dossier),
        (status = 404, description = "Dossier introuvable"),
        (status = 409, description = "Dossier encore lié à des paiements ou allocations")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_dossier(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let dossier = app_state.dossier_service.delete(id).await?;
    Ok((StatusCode::OK, Json(dossier)))
}
