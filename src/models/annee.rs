// src/models/annee.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnneeUniversitaire {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "2024-2025")]
    pub nom: String,
    pub is_actif: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnneePayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    #[schema(example = "2025-2026")]
    pub nom: String,
    #[serde(default)]
    pub is_actif: bool,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAnneePayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: Option<String>,
    pub is_actif: Option<bool>,
}

// Corpo de POST /annee-universitaire/import
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    pub annee_from: Uuid,
    pub annee_to: Uuid,
}

/// Quantidades criadas no ano de destino.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct ImportSummary {
    pub campus: i64,
    pub pavillons: i64,
    pub chambres: i64,
}

/// `?anneeUniversitaireId=` das listagens; ausente = ano ativo.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AnneeScope {
    pub annee_universitaire_id: Option<Uuid>,
}
