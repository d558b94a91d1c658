// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::not_blank;

// Papéis reconhecidos; o primeiro elemento de `role` é o efetivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
            Role::User => "user",
        }
    }

    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "manager" => Some(Role::Manager),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    /// Papel efetivo de uma lista: o primeiro, `user` por omissão.
    pub fn effective(roles: &[String]) -> Role {
        roles
            .first()
            .and_then(|r| Role::parse(r))
            .unwrap_or(Role::User)
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub prenom: String,
    pub nom: String,
    pub email: String,

    #[serde(skip_serializing)]
    #[schema(ignore)]
    pub password_hash: String,

    pub role: Vec<String>,
    pub is_actif: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn effective_role(&self) -> Role {
        Role::effective(&self.role)
    }
}

pub(crate) fn validate_roles(roles: &Vec<String>) -> Result<(), ValidationError> {
    if roles.is_empty() || roles.iter().any(|r| Role::parse(r).is_none()) {
        let mut err = ValidationError::new("role");
        err.message = Some("Rôle inconnu (admin, manager ou user).".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserPayload {
    #[validate(custom(function = "not_blank", message = "Le prénom est obligatoire."))]
    pub prenom: String,
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: String,
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub email: String,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: String,
    #[validate(custom(function = "validate_roles"))]
    #[serde(default = "default_roles")]
    pub role: Vec<String>,
    #[serde(default = "default_true")]
    pub is_actif: bool,
}

fn default_roles() -> Vec<String> {
    vec![Role::User.as_str().to_string()]
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserPayload {
    #[validate(custom(function = "not_blank", message = "Le prénom est obligatoire."))]
    pub prenom: Option<String>,
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: Option<String>,
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub email: Option<String>,
    #[validate(length(min = 6, message = "Le mot de passe doit contenir au moins 6 caractères."))]
    pub password: Option<String>,
    // verificado à mão em `validate_all`, o derive não desembrulha o Option
    pub role: Option<Vec<String>>,
    pub is_actif: Option<bool>,
}

impl UpdateUserPayload {
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        let mut result = self.validate();
        if let Some(roles) = &self.role {
            if let Err(e) = validate_roles(roles) {
                let mut errors = result.err().unwrap_or_else(validator::ValidationErrors::new);
                errors.add("role", e);
                result = Err(errors);
            }
        }
        result
    }
}

// O front envia `username` (que é o e-mail)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginPayload {
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub username: String,
    #[validate(length(min = 1, message = "Le mot de passe est obligatoire."))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,     // ID do usuário
    pub role: String,  // papel efetivo no momento do login
    pub exp: usize,
    pub iat: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effective_role_uses_first_known_entry() {
        assert_eq!(Role::effective(&["admin".into(), "user".into()]), Role::Admin);
        assert_eq!(Role::effective(&["Manager".into()]), Role::Manager);
        assert_eq!(Role::effective(&[]), Role::User);
        assert_eq!(Role::effective(&["superuser".into()]), Role::User);
    }

    #[test]
    fn create_payload_rejects_unknown_role() {
        let payload = CreateUserPayload {
            prenom: "Awa".into(),
            nom: "Diatta".into(),
            email: "awa@crous.sn".into(),
            password: "secret123".into(),
            role: vec!["root".into()],
            is_actif: true,
        };
        let errors = payload.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }

    #[test]
    fn create_payload_defaults_to_user_role() {
        let payload: CreateUserPayload = serde_json::from_value(serde_json::json!({
            "prenom": "Awa",
            "nom": "Diatta",
            "email": "awa@crous.sn",
            "password": "secret123"
        }))
        .unwrap();
        assert_eq!(payload.role, vec!["user".to_string()]);
        assert!(payload.is_actif);
        assert!(payload.validate().is_ok());
    }
}
