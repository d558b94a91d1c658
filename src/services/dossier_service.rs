// src/services/dossier_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AnneeRepository, ChambreRepository, DossierRepository},
    models::dossier::{CreateDossierPayload, Dossier, DossierDetail, UpdateDossierPayload},
    services::structure_service::inherit_annee,
};

#[derive(Clone)]
pub struct DossierService {
    pool: PgPool,
    annee_repo: AnneeRepository,
    chambre_repo: ChambreRepository,
    dossier_repo: DossierRepository,
}

impl DossierService {
    pub fn new(
        pool: PgPool,
        annee_repo: AnneeRepository,
        chambre_repo: ChambreRepository,
        dossier_repo: DossierRepository,
    ) -> Self {
        Self { pool, annee_repo, chambre_repo, dossier_repo }
    }

    pub async fn list(&self, annee_id: Option<Uuid>) -> Result<Vec<DossierDetail>, AppError> {
        match annee_id {
            Some(id) => self.dossier_repo.list_by_annee(&self.pool, id).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn list_by_annee(&self, annee_id: Uuid) -> Result<Vec<DossierDetail>, AppError> {
        self.annee_repo
            .find_by_id(&self.pool, annee_id)
            .await?
            .ok_or(AppError::NotFound("Année universitaire"))?;
        self.dossier_repo.list_by_annee(&self.pool, annee_id).await
    }

    pub async fn list_by_chambre(&self, chambre_id: Uuid) -> Result<Vec<DossierDetail>, AppError> {
        self.dossier_repo.list_by_chambre(chambre_id).await
    }

    pub async fn list_by_etudiant(&self, etudiant_id: Uuid) -> Result<Vec<DossierDetail>, AppError> {
        self.dossier_repo.list_by_etudiant(etudiant_id).await
    }

    pub async fn get(&self, id: Uuid) -> Result<DossierDetail, AppError> {
        self.dossier_repo
            .find_detail(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Dossier"))
    }

    pub async fn create(&self, p: CreateDossierPayload) -> Result<DossierDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let chambre = self
            .chambre_repo
            .find_by_id(&mut *tx, p.chambre_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("La chambre indiquée n'existe pas.".into()))?;
        let annee_id = inherit_annee(chambre.annee_universitaire_id, p.annee_universitaire_id)?;

        if p.active {
            ensure_chambre_libre(
                self.dossier_repo
                    .count_active_in_chambre(&mut *tx, chambre.id, None)
                    .await?,
                &chambre.nom,
            )?;
        }

        let dossier = self
            .dossier_repo
            .create(
                &mut *tx,
                chambre.id,
                p.etudiant_id,
                annee_id,
                p.active,
                p.caution,
                p.taux_loyer_mensuelle,
            )
            .await?;
        let detail = self
            .dossier_repo
            .find_detail(&mut *tx, dossier.id)
            .await?
            .ok_or(AppError::NotFound("Dossier"))?;

        tx.commit().await?;
        tracing::info!("Dossier {} créé (chambre {})", detail.numero, chambre.nom);
        Ok(detail)
    }

    pub async fn update(&self, id: Uuid, p: UpdateDossierPayload) -> Result<DossierDetail, AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .dossier_repo
            .find_by_id(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Dossier"))?;

        let chambre_id = p.chambre_id.unwrap_or(current.chambre_id);
        let chambre = self
            .chambre_repo
            .find_by_id(&mut *tx, chambre_id)
            .await?
            .ok_or_else(|| AppError::BadRequest("La chambre indiquée n'existe pas.".into()))?;
        if chambre_id != current.chambre_id {
            inherit_annee(chambre.annee_universitaire_id, Some(current.annee_universitaire_id))?;
        }

        if p.active.unwrap_or(current.active) {
            ensure_chambre_libre(
                self.dossier_repo
                    .count_active_in_chambre(&mut *tx, chambre_id, Some(id))
                    .await?,
                &chambre.nom,
            )?;
        }

        self.dossier_repo
            .update(
                &mut *tx,
                id,
                p.chambre_id,
                p.etudiant_id,
                p.active,
                p.caution,
                p.taux_loyer_mensuelle,
            )
            .await?
            .ok_or(AppError::NotFound("Dossier"))?;
        let detail = self
            .dossier_repo
            .find_detail(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Dossier"))?;

        tx.commit().await?;
        Ok(detail)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Dossier, AppError> {
        let dossier = self
            .dossier_repo
            .delete(id)
            .await?
            .ok_or(AppError::NotFound("Dossier"))?;
        tracing::info!("Dossier {} supprimé", dossier.numero);
        Ok(dossier)
    }
}

// Um único dossier ativo por quarto
fn ensure_chambre_libre(actifs: i64, chambre: &str) -> Result<(), AppError> {
    if actifs > 0 {
        return Err(AppError::Conflict(format!(
            "La chambre {} a déjà un dossier actif.",
            chambre
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn occupied_room_is_a_conflict() {
        assert!(ensure_chambre_libre(0, "A-101").is_ok());
        match ensure_chambre_libre(1, "A-101") {
            Err(AppError::Conflict(msg)) => assert!(msg.contains("A-101")),
            other => panic!("expected conflict, got {:?}", other),
        }
    }
}
