// src/models/equipement.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipement {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "Matelas")]
    pub nom: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipementPayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: String,
    pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateEquipementPayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: Option<String>,
    pub description: Option<String>,
}
