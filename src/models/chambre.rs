// src/models/chambre.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use super::not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Chambre {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "A-101")]
    pub nom: String,
    pub pavillon_id: Uuid,
    #[schema(example = 2)]
    pub places: i32,
    pub annee_universitaire_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateChambrePayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: String,
    pub pavillon_id: Uuid,
    #[validate(range(min = 0, message = "Le nombre de places ne peut pas être négatif."))]
    #[serde(default = "default_places")]
    pub places: i32,
    pub annee_universitaire_id: Option<Uuid>,
}

fn default_places() -> i32 {
    1
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChambrePayload {
    #[validate(custom(function = "not_blank", message = "Le nom est obligatoire."))]
    pub nom: Option<String>,
    pub pavillon_id: Option<Uuid>,
    #[validate(range(min = 0, message = "Le nombre de places ne peut pas être négatif."))]
    pub places: Option<i32>,
}
