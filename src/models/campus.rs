// src/models/campus.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Campus {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "Campus de Diabir")]
    pub nom: String,
    pub adresse: Option<String>,
    // O front trata coordenadas como texto livre
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    pub annee_universitaire_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCampusPayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: String,
    pub adresse: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
    // Ausente: ano ativo
    pub annee_universitaire_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCampusPayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: Option<String>,
    pub adresse: Option<String>,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}
