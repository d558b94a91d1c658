// src/services/annee_service.rs

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AnneeRepository, CampusRepository, ChambreRepository, PavillonRepository},
    models::{
        annee::{AnneeUniversitaire, CreateAnneePayload, ImportPayload, ImportSummary, UpdateAnneePayload},
        campus::Campus,
        chambre::Chambre,
        pavillon::Pavillon,
    },
};

#[derive(Clone)]
pub struct AnneeService {
    pool: PgPool,
    annee_repo: AnneeRepository,
    campus_repo: CampusRepository,
    pavillon_repo: PavillonRepository,
    chambre_repo: ChambreRepository,
}

impl AnneeService {
    pub fn new(
        pool: PgPool,
        annee_repo: AnneeRepository,
        campus_repo: CampusRepository,
        pavillon_repo: PavillonRepository,
        chambre_repo: ChambreRepository,
    ) -> Self {
        Self { pool, annee_repo, campus_repo, pavillon_repo, chambre_repo }
    }

    pub async fn list(&self) -> Result<Vec<AnneeUniversitaire>, AppError> {
        self.annee_repo.list().await
    }

    pub async fn get(&self, id: Uuid) -> Result<AnneeUniversitaire, AppError> {
        self.annee_repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Année universitaire"))
    }

    pub async fn active(&self) -> Result<AnneeUniversitaire, AppError> {
        self.annee_repo
            .find_active()
            .await?
            .ok_or(AppError::NotFound("Année universitaire active"))
    }

    pub async fn create(&self, payload: CreateAnneePayload) -> Result<AnneeUniversitaire, AppError> {
        let mut tx = self.pool.begin().await?;

        // Só um ano ativo: desliga os outros antes de inserir
        if payload.is_actif {
            self.annee_repo.deactivate_others(&mut *tx, None).await?;
        }
        let annee = self
            .annee_repo
            .create(&mut *tx, payload.nom.trim(), payload.is_actif)
            .await?;

        tx.commit().await?;
        tracing::info!("Année universitaire créée: {} (active: {})", annee.nom, annee.is_actif);
        Ok(annee)
    }

    pub async fn update(&self, id: Uuid, payload: UpdateAnneePayload) -> Result<AnneeUniversitaire, AppError> {
        let mut tx = self.pool.begin().await?;

        if payload.is_actif == Some(true) {
            self.annee_repo.deactivate_others(&mut *tx, Some(id)).await?;
        }
        let annee = self
            .annee_repo
            .update(&mut *tx, id, payload.nom.as_deref().map(str::trim), payload.is_actif)
            .await?
            .ok_or(AppError::NotFound("Année universitaire"))?;

        tx.commit().await?;
        Ok(annee)
    }

    pub async fn delete(&self, id: Uuid) -> Result<AnneeUniversitaire, AppError> {
        let annee = self.get(id).await?;
        if annee.is_actif {
            return Err(AppError::Conflict(
                "Impossible de supprimer l'année universitaire active.".into(),
            ));
        }
        let deleted = self
            .annee_repo
            .delete(id)
            .await?
            .ok_or(AppError::NotFound("Année universitaire"))?;
        tracing::info!("Année universitaire supprimée: {}", deleted.nom);
        Ok(deleted)
    }

    /// Ano usado pelas listagens: o pedido, senão o ativo, senão nenhum.
    pub async fn resolve_scope(&self, requested: Option<Uuid>) -> Result<Option<Uuid>, AppError> {
        match requested {
            Some(id) => Ok(Some(id)),
            None => Ok(self.annee_repo.find_active().await?.map(|a| a.id)),
        }
    }

    /// Copia campus → pavillons → chambres de `anneeFrom` para `anneeTo` numa única transação.
    pub async fn import(&self, payload: ImportPayload) -> Result<ImportSummary, AppError> {
        check_import_request(payload.annee_from, payload.annee_to)?;

        let mut tx = self.pool.begin().await?;

        let from = self
            .annee_repo
            .find_by_id(&mut *tx, payload.annee_from)
            .await?
            .ok_or(AppError::NotFound("Année universitaire source"))?;
        let to = self
            .annee_repo
            .find_by_id_for_update(&mut *tx, payload.annee_to)
            .await?
            .ok_or(AppError::NotFound("Année universitaire de destination"))?;

        if self.annee_repo.count_campus(&mut *tx, to.id).await? > 0 {
            return Err(AppError::Conflict(format!(
                "L'année {} contient déjà des campus; import refusé.",
                to.nom
            )));
        }

        let campus = self.campus_repo.list_by_annee(&mut *tx, from.id).await?;
        let pavillons = self.pavillon_repo.list_by_annee(&mut *tx, from.id).await?;
        let chambres = self.chambre_repo.list_by_annee(&mut *tx, from.id).await?;

        let plan = plan_import(campus, pavillons, chambres);
        let mut summary = ImportSummary::default();

        for campus_copy in plan.campus {
            let c = &campus_copy.source;
            let new_campus = self
                .campus_repo
                .create(
                    &mut *tx,
                    &c.nom,
                    c.adresse.as_deref(),
                    c.latitude.as_deref(),
                    c.longitude.as_deref(),
                    to.id,
                )
                .await?;
            summary.campus += 1;

            for pavillon_copy in campus_copy.pavillons {
                let p = &pavillon_copy.source;
                let new_pavillon = self
                    .pavillon_repo
                    .create(&mut *tx, &p.nom, new_campus.id, p.description.as_deref(), to.id)
                    .await?;
                summary.pavillons += 1;

                for chambre in pavillon_copy.chambres {
                    self.chambre_repo
                        .create(&mut *tx, &chambre.nom, new_pavillon.id, chambre.places, to.id)
                        .await?;
                    summary.chambres += 1;
                }
            }
        }

        tx.commit().await?;
        tracing::info!(
            "Import {} → {}: {} campus, {} pavillons, {} chambres",
            from.nom,
            to.nom,
            summary.campus,
            summary.pavillons,
            summary.chambres
        );
        Ok(summary)
    }
}

pub(crate) fn check_import_request(from: Uuid, to: Uuid) -> Result<(), AppError> {
    if from == to {
        return Err(AppError::BadRequest(
            "L'année source et l'année de destination doivent être différentes.".into(),
        ));
    }
    Ok(())
}

#[derive(Debug)]
pub(crate) struct PavillonCopy {
    pub source: Pavillon,
    pub chambres: Vec<Chambre>,
}

#[derive(Debug)]
pub(crate) struct CampusCopy {
    pub source: Campus,
    pub pavillons: Vec<PavillonCopy>,
}

#[derive(Debug, Default)]
pub(crate) struct ImportPlan {
    pub campus: Vec<CampusCopy>,
}

impl ImportPlan {
    pub fn summary(&self) -> ImportSummary {
        let mut s = ImportSummary { campus: self.campus.len() as i64, ..Default::default() };
        for c in &self.campus {
            s.pavillons += c.pavillons.len() as i64;
            s.chambres += c.pavillons.iter().map(|p| p.chambres.len() as i64).sum::<i64>();
        }
        s
    }
}

/// Árvore a copiar. Filhos cujo pai não está no ano de origem ficam de fora.
pub(crate) fn plan_import(campus: Vec<Campus>, pavillons: Vec<Pavillon>, chambres: Vec<Chambre>) -> ImportPlan {
    let mut chambres_par_pavillon: HashMap<Uuid, Vec<Chambre>> = HashMap::new();
    for chambre in chambres {
        chambres_par_pavillon.entry(chambre.pavillon_id).or_default().push(chambre);
    }

    let mut pavillons_par_campus: HashMap<Uuid, Vec<PavillonCopy>> = HashMap::new();
    for pavillon in pavillons {
        let chambres = chambres_par_pavillon.remove(&pavillon.id).unwrap_or_default();
        pavillons_par_campus
            .entry(pavillon.campus_id)
            .or_default()
            .push(PavillonCopy { source: pavillon, chambres });
    }

    let campus = campus
        .into_iter()
        .map(|c| {
            let pavillons = pavillons_par_campus.remove(&c.id).unwrap_or_default();
            CampusCopy { source: c, pavillons }
        })
        .collect();

    ImportPlan { campus }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn campus(nom: &str, annee: Uuid) -> Campus {
        Campus {
            id: Uuid::new_v4(),
            nom: nom.into(),
            adresse: None,
            latitude: Some("12.58".into()),
            longitude: Some("-16.27".into()),
            annee_universitaire_id: annee,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn pavillon(nom: &str, campus: &Campus) -> Pavillon {
        Pavillon {
            id: Uuid::new_v4(),
            nom: nom.into(),
            campus_id: campus.id,
            description: None,
            annee_universitaire_id: campus.annee_universitaire_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn chambre(nom: &str, pavillon: &Pavillon, places: i32) -> Chambre {
        Chambre {
            id: Uuid::new_v4(),
            nom: nom.into(),
            pavillon_id: pavillon.id,
            places,
            annee_universitaire_id: pavillon.annee_universitaire_id,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn same_year_import_is_a_bad_request() {
        let id = Uuid::new_v4();
        assert!(matches!(check_import_request(id, id), Err(AppError::BadRequest(_))));
        assert!(check_import_request(id, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn plan_keeps_the_whole_tree() {
        let annee = Uuid::new_v4();
        let c1 = campus("Diabir", annee);
        let c2 = campus("Kenya", annee);
        let p1 = pavillon("A", &c1);
        let p2 = pavillon("B", &c1);
        let p3 = pavillon("C", &c2);
        let chambres = vec![
            chambre("A1", &p1, 2),
            chambre("A2", &p1, 2),
            chambre("B1", &p2, 1),
            chambre("C1", &p3, 4),
            chambre("C2", &p3, 3),
        ];

        let plan = plan_import(vec![c1, c2], vec![p1, p2, p3], chambres);
        assert_eq!(plan.summary(), ImportSummary { campus: 2, pavillons: 3, chambres: 5 });

        let diabir = &plan.campus[0];
        assert_eq!(diabir.source.nom, "Diabir");
        assert_eq!(diabir.pavillons.len(), 2);
        let a = diabir.pavillons.iter().find(|p| p.source.nom == "A").unwrap();
        let noms: Vec<_> = a.chambres.iter().map(|c| c.nom.as_str()).collect();
        assert_eq!(noms, vec!["A1", "A2"]);
    }

    #[test]
    fn orphans_are_skipped() {
        let annee = Uuid::new_v4();
        let c1 = campus("Diabir", annee);
        let elsewhere = campus("Ailleurs", Uuid::new_v4());
        let p1 = pavillon("A", &c1);
        let stray = pavillon("X", &elsewhere);
        let chambres = vec![chambre("A1", &p1, 1), chambre("X1", &stray, 1)];

        let plan = plan_import(vec![c1], vec![p1, stray], chambres);
        assert_eq!(plan.summary(), ImportSummary { campus: 1, pavillons: 1, chambres: 1 });
    }

    #[test]
    fn empty_source_gives_empty_plan() {
        let plan = plan_import(vec![], vec![], vec![]);
        assert_eq!(plan.summary(), ImportSummary::default());
    }
}
