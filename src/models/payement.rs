// src/models/payement.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use super::not_blank;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "mois", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mois {
    Janvier,
    Fevrier,
    Mars,
    Avril,
    Mai,
    Juin,
    Juillet,
    Aout,
    Septembre,
    Octobre,
    Novembre,
    Decembre,
}

impl Mois {
    pub fn label(&self) -> &'static str {
        match self {
            Mois::Janvier => "JANVIER",
            Mois::Fevrier => "FEVRIER",
            Mois::Mars => "MARS",
            Mois::Avril => "AVRIL",
            Mois::Mai => "MAI",
            Mois::Juin => "JUIN",
            Mois::Juillet => "JUILLET",
            Mois::Aout => "AOUT",
            Mois::Septembre => "SEPTEMBRE",
            Mois::Octobre => "OCTOBRE",
            Mois::Novembre => "NOVEMBRE",
            Mois::Decembre => "DECEMBRE",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Payement {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub dossier_id: Uuid,
    #[schema(example = "3000")]
    pub montant: Decimal,
    pub mois: Mois,
    #[serde(rename = "numero_facture")]
    #[schema(example = "FAC-2025-0012")]
    pub numero_facture: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

fn validate_positive(val: &Decimal) -> Result<(), ValidationError> {
    if *val <= Decimal::ZERO {
        let mut err = ValidationError::new("range");
        err.message = Some("Le montant doit être supérieur à zéro.".into());
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePayementPayload {
    pub dossier_id: Uuid,
    #[validate(custom(function = "validate_positive"))]
    pub montant: Decimal,
    pub mois: Mois,
    #[serde(rename = "numero_facture")]
    #[validate(custom(function = "not_blank", message = "Le numéro de facture est obligatoire."))]
    pub numero_facture: String,
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePayementPayload {
    pub dossier_id: Option<Uuid>,
    pub montant: Option<Decimal>,
    pub mois: Option<Mois>,
    #[serde(rename = "numero_facture")]
    #[validate(custom(function = "not_blank", message = "Le numéro de facture est obligatoire."))]
    pub numero_facture: Option<String>,
}

impl UpdatePayementPayload {
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        let mut result = self.validate();
        if let Some(montant) = &self.montant {
            if let Err(e) = validate_positive(montant) {
                let mut errors = result.err().unwrap_or_else(validator::ValidationErrors::new);
                errors.add("montant", e);
                result = Err(errors);
            }
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mois_uses_unaccented_uppercase_names() {
        assert_eq!(serde_json::to_value(Mois::Fevrier).unwrap(), "FEVRIER");
        assert_eq!(serde_json::to_value(Mois::Aout).unwrap(), "AOUT");
        let m: Mois = serde_json::from_value(serde_json::json!("DECEMBRE")).unwrap();
        assert_eq!(m, Mois::Decembre);
        assert_eq!(m.label(), "DECEMBRE");
    }

    #[test]
    fn zero_amount_is_invalid() {
        let payload: CreatePayementPayload = serde_json::from_value(serde_json::json!({
            "dossierId": Uuid::new_v4(),
            "montant": 0,
            "mois": "MARS",
            "numero_facture": "F-1"
        }))
        .unwrap();
        assert!(payload.validate().is_err());

        let update = UpdatePayementPayload {
            montant: Some(Decimal::from(-5)),
            ..Default::default()
        };
        assert!(update.validate_all().is_err());
    }
}
