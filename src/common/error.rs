// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erreur de validation")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    #[error("Cet e-mail est déjà utilisé")]
    EmailAlreadyExists,

    #[error("Identifiants invalides")]
    InvalidCredentials,

    #[error("Jeton invalide")]
    InvalidToken,

    #[error("Compte désactivé")]
    InactiveAccount,

    #[error("Accès refusé")]
    Forbidden,

    #[error("{0} introuvable")]
    NotFound(&'static str),

    #[error("{0}")]
    Conflict(String),

    #[error("Police introuvable: {0}")]
    FontNotFound(String),

    #[error("Erreur PDF: {0}")]
    PdfError(String),

    #[error("Erreur de base de données")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erreur interne du serveur")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erreur Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erreur JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Traduz violações de integridade do Postgres em erros de negócio.
    /// `unique` é a mensagem usada quando a chave única já existe.
    pub fn from_write(e: sqlx::Error, unique: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_unique_violation() {
                return AppError::Conflict(unique.to_string());
            }
            if db_err.is_foreign_key_violation() {
                return AppError::BadRequest("Référence invalide vers une entité inexistante.".into());
            }
            if db_err.is_check_violation() {
                return AppError::BadRequest("Valeur hors des limites autorisées.".into());
            }
        }
        e.into()
    }

    /// Para DELETE: uma FK violada significa que ainda há filhos apontando para a linha.
    pub fn from_delete(e: sqlx::Error, entity: &str) -> Self {
        if let sqlx::Error::Database(db_err) = &e {
            if db_err.is_foreign_key_violation() {
                return AppError::Conflict(format!(
                    "Impossible de supprimer: {} est encore référencé(e) par d'autres données.",
                    entity
                ));
            }
        }
        e.into()
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::InactiveAccount | AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::EmailAlreadyExists | AppError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let error_message = match self {
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Un ou plusieurs champs sont invalides.",
                    "details": details,
                }));
                return (status, body).into_response();
            }
            AppError::InvalidCredentials => "E-mail ou mot de passe invalide.".to_string(),
            AppError::InvalidToken => "Jeton d'authentification invalide ou absent.".to_string(),
            AppError::InactiveAccount => "Ce compte est désactivé.".to_string(),
            AppError::Forbidden => "Vous n'avez pas les droits pour cette action.".to_string(),
            AppError::EmailAlreadyExists => "Cet e-mail est déjà utilisé.".to_string(),
            e @ (AppError::BadRequest(_) | AppError::NotFound(_) | AppError::Conflict(_)) => {
                tracing::warn!("Requête rejetée: {}", e);
                e.to_string()
            }
            // Todo o resto vira 500; o detalhe só vai para o log.
            ref e => {
                tracing::error!("Erreur interne: {:?}", e);
                "Une erreur inattendue est survenue.".to_string()
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(resp: Response) -> serde_json::Value {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn not_found_is_404_with_entity_name() {
        let resp = AppError::NotFound("Campus").into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(resp).await["error"], "Campus introuvable");
    }

    #[tokio::test]
    async fn conflict_keeps_its_message() {
        let resp = AppError::Conflict("déjà importé".into()).into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(resp).await["error"], "déjà importé");
    }

    #[tokio::test]
    async fn validation_errors_are_listed_per_field() {
        let mut errors = validator::ValidationErrors::new();
        let mut err = validator::ValidationError::new("length");
        err.message = Some("Le nom est obligatoire.".into());
        errors.add("nom", err);

        let resp = AppError::ValidationError(errors).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body = body_json(resp).await;
        assert_eq!(body["details"]["nom"][0], "Le nom est obligatoire.");
    }

    #[tokio::test]
    async fn internal_errors_hide_details() {
        let resp = AppError::InternalServerError(anyhow::anyhow!("pool exhausted")).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(resp).await;
        assert_eq!(body["error"], "Une erreur inattendue est survenue.");
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(AppError::InvalidToken.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::InvalidCredentials.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::InactiveAccount.status(), StatusCode::FORBIDDEN);
    }
}
