// src/models/etudiant.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "genre")]
pub enum Genre {
    H,
    F,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Etudiant {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub nom: String,
    pub prenom: String,
    #[schema(example = "2019A1234")]
    pub ncs: String,
    pub cni: Option<String>,
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub avatar: Option<String>,
    pub genre: Option<Genre>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEtudiantPayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: String,
    #[validate(custom(function = "not_blank", message = "Le prénom est obligatoire."))]
    pub prenom: String,
    #[validate(custom(function = "not_blank", message = "Le NCS est obligatoire."))]
    pub ncs: String,
    pub cni: Option<String>,
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub avatar: Option<String>,
    pub genre: Option<Genre>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEtudiantPayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: Option<String>,
    #[validate(custom(function = "not_blank", message = "Le prénom est obligatoire."))]
    pub prenom: Option<String>,
    #[validate(custom(function = "not_blank", message = "Le NCS est obligatoire."))]
    pub ncs: Option<String>,
    pub cni: Option<String>,
    #[validate(email(message = "L'e-mail fourni est invalide."))]
    pub email: Option<String>,
    pub telephone: Option<String>,
    pub avatar: Option<String>,
    pub genre: Option<Genre>,
}
