// src/handlers/payement.rs

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
    models::payement::{CreatePayementPayload, Payement, UpdatePayementPayload},
};

#[utoipa::path(
    get,
    path = "/api/payement",
    tag = "Paiements",
    responses((status = 200, description = "Tous les paiements", body = Vec<Payement>)),
    security(("api_jwt" = []))
)]
pub async fn list_payements(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let payements = app_state.payement_repo.list().await?;
    Ok((StatusCode::OK, Json(payements)))
}

#[utoipa::path(
    get,
    path = "/api/payement/dossier/{id}",
    tag = "Paiements",
    params(("id" = Uuid, Path, description = "ID du dossier")),
    responses((status = 200, description = "Paiements du dossier, du plus ancien au plus récent", body = Vec<Payement>)),
    security(("api_jwt" = []))
)]
pub async fn list_payements_by_dossier(
    State(app_state): State<AppState>,
    Path(dossier_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payements = app_state.payement_repo.list_by_dossier(dossier_id).await?;
    Ok((StatusCode::OK, Json(payements)))
}

#[utoipa::path(
    get,
    path = "/api/payement/{id}",
    tag = "Paiements",
    params(("id" = Uuid, Path, description = "ID du paiement")),
    responses(
        (status = 200, description = "Paiement trouvé", body = Payement),
        (status = 404, description = "Paiement introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_payement(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payement = app_state
        .payement_repo
        .find_by_id(id)
        .await?
        .ok_or(AppError::NotFound("Paiement"))?;
    Ok((StatusCode::OK, Json(payement)))
}

#[utoipa::path(
    post,
    path = "/api/payement",
    tag = "Paiements",
    request_body = CreatePayementPayload,
    responses(
        (status = 201, description = "Paiement enregistré", body = Payement),
        (status = 400, description = "Montant invalide ou dossier inexistant"),
        (status = 409, description = "Numéro de facture déjà utilisé")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_payement(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePayementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let payement = app_state.payement_repo.create(&payload).await?;
    tracing::info!(
        "Paiement {} de {} enregistré pour le dossier {}",
        payement.numero_facture,
        payement.montant,
        payement.dossier_id
    );
    Ok((StatusCode::CREATED, Json(payement)))
}

#[utoipa::path(
    patch,
    path = "/api/payement/{id}",
    tag = "Paiements",
    params(("id" = Uuid, Path, description = "ID du paiement")),
    request_body = UpdatePayementPayload,
    responses(
        (status = 200, description = "Paiement mis à jour", body = Payement),
        (status = 404, description = "Paiement introuvable"),
        (status = 409, description = "Numéro de facture déjà utilisé")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_payement(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePayementPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate_all()?;
    let payement = app_state
        .payement_repo
        .update(id, &payload)
        .await?
        .ok_or(AppError::NotFound("Paiement"))?;
    Ok((StatusCode::OK, Json(payement)))
}

#[utoipa::path(
    delete,
    path = "/api/payement/{id}",
    tag = "Paiements",
    params(("id" = Uuid, Path, description = "ID du paiement")),
    responses(
        (status = 200, description = "Paiement supprimé", body = Payement),
        (status = 404, description = "Paiement introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_payement(
    State(app_state): State<AppState>,
    _guard: RequireRole<Gestion>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payement = app_state
        .payement_repo
        .delete(id)
        .await?
        .ok_or(AppError::NotFound("Paiement"))?;
    Ok((StatusCode::OK, Json(payement)))
}
