// src/services/structure_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AnneeRepository, CampusRepository, ChambreRepository, PavillonRepository},
    models::{
        campus::{Campus, CreateCampusPayload, UpdateCampusPayload},
        chambre::{Chambre, CreateChambrePayload, UpdateChambrePayload},
        pavillon::{CreatePavillonPayload, Pavillon, UpdatePavillonPayload},
    },
};

/// Campus, pavillons e chambres: a hierarquia física de um ano universitário.
#[derive(Clone)]
pub struct StructureService {
    pool: PgPool,
    annee_repo: AnneeRepository,
    campus_repo: CampusRepository,
    pavillon_repo: PavillonRepository,
    chambre_repo: ChambreRepository,
}

impl StructureService {
    pub fn new(
        pool: PgPool,
        annee_repo: AnneeRepository,
        campus_repo: CampusRepository,
        pavillon_repo: PavillonRepository,
        chambre_repo: ChambreRepository,
    ) -> Self {
        Self { pool, annee_repo, campus_repo, pavillon_repo, chambre_repo }
    }

    // Ano explícito ou o ativo; sem nenhum dos dois não há onde criar
    async fn annee_for_create(&self, requested: Option<Uuid>) -> Result<Uuid, AppError> {
        match requested {
            Some(id) => self
                .annee_repo
                .find_by_id(&self.pool, id)
                .await?
                .map(|a| a.id)
                .ok_or_else(|| AppError::BadRequest("L'année universitaire indiquée n'existe pas.".into())),
            None => self
                .annee_repo
                .find_active()
                .await?
                .map(|a| a.id)
                .ok_or_else(|| {
                    AppError::BadRequest(
                        "Aucune année universitaire active: précisez anneeUniversitaireId.".into(),
                    )
                }),
        }
    }

    // --- Campus ---

    pub async fn list_campus(&self, annee_id: Option<Uuid>) -> Result<Vec<Campus>, AppError> {
        match annee_id {
            Some(id) => self.campus_repo.list_by_annee(&self.pool, id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn get_campus(&self, id: Uuid) -> Result<Campus, AppError> {
        self.campus_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Campus"))
    }

    pub async fn create_campus(&self, p: CreateCampusPayload) -> Result<Campus, AppError> {
        let annee_id = self.annee_for_create(p.annee_universitaire_id).await?;
        let campus = self
            .campus_repo
            .create(
                &self.pool,
                p.nom.trim(),
                p.adresse.as_deref(),
                p.latitude.as_deref(),
                p.longitude.as_deref(),
                annee_id,
            )
            .await?;
        tracing::info!("Campus créé: {}", campus.nom);
        Ok(campus)
    }

    pub async fn update_campus(&self, id: Uuid, p: UpdateCampusPayload) -> Result<Campus, AppError> {
        self.campus_repo
            .update(
                id,
                p.nom.as_deref().map(str::trim),
                p.adresse.as_deref(),
                p.latitude.as_deref(),
                p.longitude.as_deref(),
            )
            .await?
            .ok_or(AppError::NotFound("Campus"))
    }

    pub async fn delete_campus(&self, id: Uuid) -> Result<Campus, AppError> {
        self.campus_repo
            .delete(id)
            .await?
            .ok_or(AppError::NotFound("Campus"))
    }

    // --- Pavillons ---

    pub async fn list_pavillons(&self, annee_id: Option<Uuid>) -> Result<Vec<Pavillon>, AppError> {
        match annee_id {
            Some(id) => self.pavillon_repo.list_by_annee(&self.pool, id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn list_pavillons_by_campus(&self, campus_id: Uuid) -> Result<Vec<Pavillon>, AppError> {
        self.pavillon_repo.list_by_campus(campus_id).await
    }

    pub async fn get_pavillon(&self, id: Uuid) -> Result<Pavillon, AppError> {
        self.pavillon_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Pavillon"))
    }

    pub async fn create_pavillon(&self, p: CreatePavillonPayload) -> Result<Pavillon, AppError> {
        let campus = self
            .campus_repo
            .find_by_id(&self.pool, p.campus_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Le campus indiqué n'existe pas.".into()))?;
        let annee_id = inherit_annee(campus.annee_universitaire_id, p.annee_universitaire_id)?;

        let pavillon = self
            .pavillon_repo
            .create(&self.pool, p.nom.trim(), campus.id, p.description.as_deref(), annee_id)
            .await?;
        tracing::info!("Pavillon créé: {} ({})", pavillon.nom, campus.nom);
        Ok(pavillon)
    }

    pub async fn update_pavillon(&self, id: Uuid, p: UpdatePavillonPayload) -> Result<Pavillon, AppError> {
        if let Some(campus_id) = p.campus_id {
            let current = self.get_pavillon(id).await?;
            let campus = self
                .campus_repo
                .find_by_id(&self.pool, campus_id)
                .await?
                .ok_or_else(|| AppError::BadRequest("Le campus indiqué n'existe pas.".into()))?;
            inherit_annee(campus.annee_universitaire_id, Some(current.annee_universitaire_id))?;
        }

        self.pavillon_repo
            .update(id, p.nom.as_deref().map(str::trim), p.campus_id, p.description.as_deref())
            .await?
            .ok_or(AppError::NotFound("Pavillon"))
    }

    pub async fn delete_pavillon(&self, id: Uuid) -> Result<Pavillon, AppError> {
        self.pavillon_repo
            .delete(id)
            .await?
            .ok_or(AppError::NotFound("Pavillon"))
    }

    // --- Chambres ---

    pub async fn list_chambres(&self, annee_id: Option<Uuid>) -> Result<Vec<Chambre>, AppError> {
        match annee_id {
            Some(id) => self.chambre_repo.list_by_annee(&self.pool, id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn list_chambres_by_pavillon(&self, pavillon_id: Uuid) -> Result<Vec<Chambre>, AppError> {
        self.chambre_repo.list_by_pavillon(pavillon_id).await
    }

    pub async fn get_chambre(&self, id: Uuid) -> Result<Chambre, AppError> {
        self.chambre_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Chambre"))
    }

    pub async fn create_chambre(&self, p: CreateChambrePayload) -> Result<Chambre, AppError> {
        let pavillon = self
            .pavillon_repo
            .find_by_id(&self.pool, p.pavillon_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("Le pavillon indiqué n'existe pas.".into()))?;
        let annee_id = inherit_annee(pavillon.annee_universitaire_id, p.annee_universitaire_id)?;

        self.chambre_repo
            .create(&self.pool, p.nom.trim(), pavillon.id, p.places, annee_id)
            .await
    }

    pub async fn update_chambre(&self, id: Uuid, p: UpdateChambrePayload) -> Result<Chambre, AppError> {
        if let Some(pavillon_id) = p.pavillon_id {
            let current = self.get_chambre(id).await?;
            let pavillon = self
                .pavillon_repo
                .find_by_id(&self.pool, pavillon_id)
                .await?
                .ok_or_else(|| AppError::BadRequest("Le pavillon indiqué n'existe pas.".into()))?;
            inherit_annee(pavillon.annee_universitaire_id, Some(current.annee_universitaire_id))?;
        }

        self.chambre_repo
            .update(id, p.nom.as_deref().map(str::trim), p.pavillon_id, p.places)
            .await?
            .ok_or(AppError::NotFound("Chambre"))
    }

    pub async fn delete_chambre(&self, id: Uuid) -> Result<Chambre, AppError> {
        self.chambre_repo
            .delete(id)
            .await?
            .ok_or(AppError::NotFound("Chambre"))
    }
}

/// O filho herda o ano do pai; um ano explícito diferente é recusado.
pub(crate) fn inherit_annee(parent: Uuid, requested: Option<Uuid>) -> Result<Uuid, AppError> {
    match requested {
        Some(id) if id != parent => Err(AppError::BadRequest(
            "L'année universitaire ne correspond pas à celle de l'élément parent.".into(),
        )),
        _ => Ok(parent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_inherits_parent_year() {
        let parent = Uuid::new_v4();
        assert_eq!(inherit_annee(parent, None).unwrap(), parent);
        assert_eq!(inherit_annee(parent, Some(parent)).unwrap(), parent);
    }

    #[test]
    fn mismatching_year_is_rejected() {
        let result = inherit_annee(Uuid::new_v4(), Some(Uuid::new_v4()));
        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
