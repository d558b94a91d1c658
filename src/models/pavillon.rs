// src/models/pavillon.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pavillon {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "Pavillon A")]
    pub nom: String,
    pub campus_id: Uuid,
    pub description: Option<String>,
    pub annee_universitaire_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePavillonPayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: String,
    pub campus_id: Uuid,
    pub description: Option<String>,
    // Herdado do campus; se vier, tem de bater
    pub annee_universitaire_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePavillonPayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: Option<String>,
    pub campus_id: Option<Uuid>,
    pub description: Option<String>,
}
