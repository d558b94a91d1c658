pub mod allocation;
pub mod annee;
pub mod auth;
pub mod campus;
pub mod chambre;
pub mod dossier;
pub mod equipement;
pub mod etudiant;
pub mod pavillon;
pub mod payement;
pub mod stats;

use validator::ValidationError;

/// Rejeita textos vazios ou só com espaços; os serviços gravam o valor aparado.
pub(crate) fn not_blank(val: &str) -> Result<(), ValidationError> {
    if val.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{campus::CreateCampusPayload, etudiant::UpdateEtudiantPayload};
    use validator::Validate;

    #[test]
    fn blank_names_are_rejected() {
        assert!(not_blank("Diabir").is_ok());
        assert!(not_blank("").is_err());
        assert!(not_blank("   \t").is_err());
    }

    #[test]
    fn whitespace_only_campus_name_fails_validation() {
        let payload = CreateCampusPayload {
            nom: "   ".into(),
            adresse: None,
            latitude: None,
            longitude: None,
            annee_universitaire_id: None,
        };
        let errors = payload.validate().unwrap_err();
        let nom = &errors.field_errors()["nom"];
        assert_eq!(nom[0].message.as_deref(), Some("Le nom est obligatoire."));
    }

    #[test]
    fn optional_fields_are_checked_only_when_present() {
        assert!(UpdateEtudiantPayload::default().validate().is_ok());
        let payload = UpdateEtudiantPayload { ncs: Some(" ".into()), ..Default::default() };
        assert!(payload.validate().unwrap_err().field_errors().contains_key("ncs"));
    }
}
