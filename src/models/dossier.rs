// src/models/dossier.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::etudiant::Genre;

// Linha "crua" da tabela dossiers
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Dossier {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[schema(example = "DOS-000042")]
    pub numero: String,
    pub chambre_id: Uuid,
    pub etudiant_id: Uuid,
    pub annee_universitaire_id: Uuid,
    pub active: bool,
    pub caution: Decimal,
    #[serde(rename = "taux_loyer_mensuelle")]
    pub taux_loyer_mensuelle: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Forma "populada" que o front consome ---

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CampusRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub nom: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PavillonRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub nom: String,
    #[serde(rename = "campusId")]
    pub campus: CampusRef,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChambreRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub nom: String,
    pub places: i32,
    #[serde(rename = "pavillonId")]
    pub pavillon: PavillonRef,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EtudiantRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub nom: String,
    pub prenom: String,
    pub ncs: String,
    pub genre: Option<Genre>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AnneeRef {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub nom: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DossierDetail {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub numero: String,
    #[serde(rename = "chambreId")]
    pub chambre: ChambreRef,
    pub etudiant_id: Uuid,
    pub etudiant: EtudiantRef,
    #[serde(rename = "anneeUniversitaireId")]
    pub annee_universitaire: AnneeRef,
    pub active: bool,
    pub caution: Decimal,
    #[serde(rename = "taux_loyer_mensuelle")]
    pub taux_loyer_mensuelle: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Resultado plano do JOIN dossier → chambre → pavillon → campus (+ étudiant, année).
#[derive(Debug, Clone, FromRow)]
pub struct DossierDetailRow {
    pub id: Uuid,
    pub numero: String,
    pub active: bool,
    pub caution: Decimal,
    pub taux_loyer_mensuelle: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub chambre_id: Uuid,
    pub chambre_nom: String,
    pub chambre_places: i32,
    pub pavillon_id: Uuid,
    pub pavillon_nom: String,
    pub campus_id: Uuid,
    pub campus_nom: String,

    pub etudiant_id: Uuid,
    pub etudiant_nom: String,
    pub etudiant_prenom: String,
    pub etudiant_ncs: String,
    pub etudiant_genre: Option<Genre>,

    pub annee_universitaire_id: Uuid,
    pub annee_nom: String,
}

impl From<DossierDetailRow> for DossierDetail {
    fn from(r: DossierDetailRow) -> Self {
        DossierDetail {
            id: r.id,
            numero: r.numero,
            chambre: ChambreRef {
                id: r.chambre_id,
                nom: r.chambre_nom,
                places: r.chambre_places,
                pavillon: PavillonRef {
                    id: r.pavillon_id,
                    nom: r.pavillon_nom,
                    campus: CampusRef {
                        id: r.campus_id,
                        nom: r.campus_nom,
                    },
                },
            },
            etudiant_id: r.etudiant_id,
            etudiant: EtudiantRef {
                id: r.etudiant_id,
                nom: r.etudiant_nom,
                prenom: r.etudiant_prenom,
                ncs: r.etudiant_ncs,
                genre: r.etudiant_genre,
            },
            annee_universitaire: AnneeRef {
                id: r.annee_universitaire_id,
                nom: r.annee_nom,
            },
            active: r.active,
            caution: r.caution,
            taux_loyer_mensuelle: r.taux_loyer_mensuelle,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDossierPayload {
    pub chambre_id: Uuid,
    pub etudiant_id: Uuid,
    // Ausente: o ano do quarto
    pub annee_universitaire_id: Option<Uuid>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub caution: Decimal,
    #[serde(default, rename = "taux_loyer_mensuelle")]
    pub taux_loyer_mensuelle: Decimal,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDossierPayload {
    pub chambre_id: Option<Uuid>,
    pub etudiant_id: Option<Uuid>,
    pub active: Option<bool>,
    pub caution: Option<Decimal>,
    #[serde(rename = "taux_loyer_mensuelle")]
    pub taux_loyer_mensuelle: Option<Decimal>,
}

fn not_negative(field: &'static str, value: Option<Decimal>, errors: &mut ValidationErrors) {
    if let Some(v) = value {
        if v.is_sign_negative() && !v.is_zero() {
            let mut err = ValidationError::new("range");
            err.message = Some("Le montant ne peut pas être négatif.".into());
            errors.add(field, err);
        }
    }
}

impl CreateDossierPayload {
    pub fn validate_amounts(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        not_negative("caution", Some(self.caution), &mut errors);
        not_negative("taux_loyer_mensuelle", Some(self.taux_loyer_mensuelle), &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl UpdateDossierPayload {
    pub fn validate_amounts(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        not_negative("caution", self.caution, &mut errors);
        not_negative("taux_loyer_mensuelle", self.taux_loyer_mensuelle, &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn row() -> DossierDetailRow {
        DossierDetailRow {
            id: Uuid::new_v4(),
            numero: "DOS-000001".into(),
            active: true,
            caution: Decimal::from(15000),
            taux_loyer_mensuelle: Decimal::from(3000),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            chambre_id: Uuid::new_v4(),
            chambre_nom: "A-101".into(),
            chambre_places: 2,
            pavillon_id: Uuid::new_v4(),
            pavillon_nom: "Pavillon A".into(),
            campus_id: Uuid::new_v4(),
            campus_nom: "Diabir".into(),
            etudiant_id: Uuid::new_v4(),
            etudiant_nom: "Sane".into(),
            etudiant_prenom: "Fatou".into(),
            etudiant_ncs: "2020B0001".into(),
            etudiant_genre: Some(Genre::F),
            annee_universitaire_id: Uuid::new_v4(),
            annee_nom: "2024-2025".into(),
        }
    }

    #[test]
    fn detail_serializes_with_populated_references() {
        let detail: DossierDetail = row().into();
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["chambreId"]["nom"], "A-101");
        assert_eq!(json["chambreId"]["pavillonId"]["nom"], "Pavillon A");
        assert_eq!(json["chambreId"]["pavillonId"]["campusId"]["nom"], "Diabir");
        assert_eq!(json["anneeUniversitaireId"]["nom"], "2024-2025");
        assert_eq!(json["etudiant"]["genre"], "F");
        assert_eq!(json["taux_loyer_mensuelle"], 3000.0);
        assert!(json.get("_id").is_some());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let payload = UpdateDossierPayload {
            caution: Some(Decimal::from_str("-1").unwrap()),
            ..Default::default()
        };
        let errors = payload.validate_amounts().unwrap_err();
        assert!(errors.field_errors().contains_key("caution"));

        let ok = UpdateDossierPayload {
            caution: Some(Decimal::ZERO),
            ..Default::default()
        };
        assert!(ok.validate_amounts().is_ok());
    }
}
