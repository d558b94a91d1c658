// src/handlers/auth.rs

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
    middleware::{
        auth::AuthenticatedUser,
        rbac::{AdminOnly, RequireRole},
    },
    models::auth::{CreateUserPayload, LoginPayload, LoginResponse, UpdateUserPayload, User},
};

// Handler de login (rota pública)
#[utoipa::path(
    post,
    path = "/api/user/login",
    tag = "Utilisateurs",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Connexion réussie", body = LoginResponse),
        (status = 400, description = "Payload invalide"),
        (status = 401, description = "Identifiants invalides"),
        (status = 403, description = "Compte désactivé")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let response = app_state
        .auth_service
        .login_user(&payload.username, &payload.password)
        .await?;
    Ok((StatusCode::OK, Json(response)))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/user/me",
    tag = "Utilisateurs",
    responses(
        (status = 200, description = "Utilisateur connecté", body = User),
        (status = 401, description = "Non authentifié")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

#[utoipa::path(
    get,
    path = "/api/user",
    tag = "Utilisateurs",
    responses(
        (status = 200, description = "Tous les comptes", body = Vec<User>),
        (status = 403, description = "Réservé aux administrateurs")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state.auth_service.list_users().await?;
    Ok((StatusCode::OK, Json(users)))
}

#[utoipa::path(
    get,
    path = "/api/user/{id}",
    tag = "Utilisateurs",
    params(("id" = Uuid, Path, description = "ID de l'utilisateur")),
    responses(
        (status = 200, description = "Utilisateur trouvé", body = User),
        (status = 404, description = "Utilisateur introuvable")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.auth_service.get_user(id).await?;
    Ok((StatusCode::OK, Json(user)))
}

#[utoipa::path(
    post,
    path = "/api/user",
    tag = "Utilisateurs",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Compte créé", body = User),
        (status = 400, description = "Payload invalide"),
        (status = 409, description = "E-mail déjà utilisé")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    let user = app_state.auth_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    patch,
    path = "/api/user/{id}",
    tag = "Utilisateurs",
    params(("id" = Uuid, Path, description = "ID de l'utilisateur")),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Compte mis à jour", body = User),
        (status = 404, description = "Utilisateur introuvable"),
        (status = 409, description = "E-mail déjà utilisé")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate_all()?;
    let user = app_state.auth_service.update_user(id, payload).await?;
    Ok((StatusCode::OK, Json(user)))
}

#[utoipa::path(
    delete,
    path = "/api/user/{id}",
    tag = "Utilisateurs",
    params(("id" = Uuid, Path, description = "ID de l'utilisateur")),
    responses(
        (status = 200, description = "Compte supprimé", body = User),
        (status = 404, description = "Utilisateur introuvable"),
        (status = 409, description = "Suppression de son propre compte")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<AdminOnly>,
    AuthenticatedUser(current): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let user = app_state.auth_service.delete_user(id, &current).await?;
    Ok((StatusCode::OK, Json(user)))
}
