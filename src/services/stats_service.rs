// src/services/stats_service.rs

use std::collections::{HashMap, HashSet};

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AnneeRepository, CampusRepository, ChambreRepository, DossierRepository, PavillonRepository},
    models::{
        campus::Campus,
        chambre::Chambre,
        dossier::DossierDetail,
        etudiant::Genre,
        pavillon::Pavillon,
        stats::{
            CampusAvecPavillons, ChambreParCampus, ChambreParPavillon, PavillonChambres,
            PavillonPlaces, PlacesParPavillon, RepartitionGenres, StatsResume, StatsSnapshot,
        },
    },
};

#[derive(Clone)]
pub struct StatsService {
    pool: PgPool,
    annee_repo: AnneeRepository,
    campus_repo: CampusRepository,
    pavillon_repo: PavillonRepository,
    chambre_repo: ChambreRepository,
    dossier_repo: DossierRepository,
}

impl StatsService {
    pub fn new(
        pool: PgPool,
        annee_repo: AnneeRepository,
        campus_repo: CampusRepository,
        pavillon_repo: PavillonRepository,
        chambre_repo: ChambreRepository,
        dossier_repo: DossierRepository,
    ) -> Self {
        Self { pool, annee_repo, campus_repo, pavillon_repo, chambre_repo, dossier_repo }
    }

    pub async fn snapshot(&self, annee_id: Uuid) -> Result<StatsSnapshot, AppError> {
        // Mesma transação para os cinco SELECTs verem o mesmo estado
        let mut tx = self.pool.begin().await?;

        self.annee_repo
            .find_by_id(&mut *tx, annee_id)
            .await?
            .ok_or(AppError::NotFound("Année universitaire"))?;

        let campus = self.campus_repo.list_by_annee(&mut *tx, annee_id).await?;
        let pavillons = self.pavillon_repo.list_by_annee(&mut *tx, annee_id).await?;
        let chambres = self.chambre_repo.list_by_annee(&mut *tx, annee_id).await?;
        let dossiers = self.dossier_repo.list_by_annee(&mut *tx, annee_id).await?;

        tx.commit().await?;
        Ok(aggregate(campus, pavillons, chambres, dossiers))
    }
}

/// Percentagem inteira arredondada; total zero dá zero.
pub fn pourcentage(part: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    (part * 200 + total) / (2 * total)
}

#[derive(Default)]
struct PavillonTotaux {
    chambres: i64,
    places: i64,
    occupees: i64,
}

pub fn aggregate(
    campus: Vec<Campus>,
    pavillons: Vec<Pavillon>,
    chambres: Vec<Chambre>,
    dossiers: Vec<DossierDetail>,
) -> StatsSnapshot {
    let mut totaux: HashMap<Uuid, PavillonTotaux> = HashMap::new();
    for chambre in &chambres {
        let t = totaux.entry(chambre.pavillon_id).or_default();
        t.chambres += 1;
        t.places += i64::from(chambre.places);
    }
    for dossier in dossiers.iter().filter(|d| d.active) {
        totaux.entry(dossier.chambre.pavillon.id).or_default().occupees += 1;
    }

    let mut chambre_par_campus = Vec::with_capacity(campus.len());
    let mut chambre_par_pavillon = Vec::with_capacity(campus.len());
    let mut total_places_par_pavillon = Vec::with_capacity(campus.len());
    let mut campus_avec_pavillons = Vec::with_capacity(campus.len());

    for c in campus {
        let siens: Vec<Pavillon> = pavillons
            .iter()
            .filter(|p| p.campus_id == c.id)
            .cloned()
            .collect();

        let mut nb_chambres = 0;
        let mut par_pavillon = Vec::with_capacity(siens.len());
        let mut places = Vec::with_capacity(siens.len());
        for p in &siens {
            let t = totaux.get(&p.id);
            let n = t.map_or(0, |t| t.chambres);
            nb_chambres += n;
            par_pavillon.push(PavillonChambres { pavillon: p.nom.clone(), chambres: n });
            places.push(PavillonPlaces {
                pavillon: p.nom.clone(),
                places: t.map_or(0, |t| t.places),
                places_occupees: t.map_or(0, |t| t.occupees),
            });
        }

        chambre_par_campus.push(ChambreParCampus { campus: c.nom.clone(), chambres: nb_chambres });
        chambre_par_pavillon.push(ChambreParPavillon { campus: c.nom.clone(), pavillons: par_pavillon });
        total_places_par_pavillon.push(PlacesParPavillon { campus: c.nom.clone(), pavillons: places });
        campus_avec_pavillons.push(CampusAvecPavillons { campus: c, pavillons: siens });
    }

    let total_places: i64 = chambres.iter().map(|c| i64::from(c.places)).sum();
    let total_places_occupees = dossiers.iter().filter(|d| d.active).count() as i64;

    let resume = StatsResume {
        total_chambres: chambres.len() as i64,
        total_places,
        total_places_occupees,
        taux_occupation: pourcentage(total_places_occupees, total_places),
        genres: repartition_genres(&dossiers),
    };

    StatsSnapshot {
        dossiers,
        campus: campus_avec_pavillons,
        chambre_par_campus,
        chambre_par_pavillon,
        total_places_par_pavillon,
        resume,
    }
}

// Cada estudante conta uma vez, mesmo com vários dossiers no ano
fn repartition_genres(dossiers: &[DossierDetail]) -> RepartitionGenres {
    let mut vus = HashSet::new();
    let mut r = RepartitionGenres::default();
    for d in dossiers {
        if !vus.insert(d.etudiant.id) {
            continue;
        }
        match d.etudiant.genre {
            Some(Genre::H) => r.hommes += 1,
            Some(Genre::F) => r.femmes += 1,
            None => r.non_renseigne += 1,
        }
    }
    let total = r.hommes + r.femmes + r.non_renseigne;
    r.pourcentage_hommes = pourcentage(r.hommes, total);
    r.pourcentage_femmes = pourcentage(r.femmes, total);
    r
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::dossier::{AnneeRef, CampusRef, ChambreRef, EtudiantRef, PavillonRef};
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn campus(nom: &str) -> Campus {
        Campus {
            id: Uuid::new_v4(),
            nom: nom.into(),
            adresse: None,
            latitude: None,
            longitude: None,
            annee_universitaire_id: Uuid::nil(),
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
            annee_universitaire_id: Uuid::nil(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn chambre(pavillon: &Pavillon, places: i32) -> Chambre {
        Chambre {
            id: Uuid::new_v4(),
            nom: format!("{}-{}", pavillon.nom, places),
            pavillon_id: pavillon.id,
            places,
            annee_universitaire_id: Uuid::nil(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn dossier(chambre: &Chambre, pavillon: &Pavillon, active: bool, genre: Option<Genre>) -> DossierDetail {
        let etudiant_id = Uuid::new_v4();
        DossierDetail {
            id: Uuid::new_v4(),
            numero: "DOS-000001".into(),
            chambre: ChambreRef {
                id: chambre.id,
                nom: chambre.nom.clone(),
                places: chambre.places,
                pavillon: PavillonRef {
                    id: pavillon.id,
                    nom: pavillon.nom.clone(),
                    campus: CampusRef { id: pavillon.campus_id, nom: String::new() },
                },
            },
            etudiant_id,
            etudiant: EtudiantRef {
                id: etudiant_id,
                nom: "Badji".into(),
                prenom: "Moussa".into(),
                ncs: "2021C0042".into(),
                genre,
            },
            annee_universitaire: AnneeRef { id: Uuid::nil(), nom: "2024-2025".into() },
            active,
            caution: Decimal::ZERO,
            taux_loyer_mensuelle: Decimal::ZERO,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(pourcentage(4, 10), 40);
        assert_eq!(pourcentage(1, 3), 33);
        assert_eq!(pourcentage(2, 3), 67);
        assert_eq!(pourcentage(1, 8), 13);
        assert_eq!(pourcentage(5, 0), 0);
    }

    #[test]
    fn occupancy_counts_only_active_dossiers() {
        let c = campus("Diabir");
        let p = pavillon("A", &c);
        // 5 chambres de 2 places = 10 places
        let chambres: Vec<Chambre> = (0..5).map(|_| chambre(&p, 2)).collect();
        let mut dossiers: Vec<DossierDetail> = chambres
            .iter()
            .take(4)
            .map(|ch| dossier(ch, &p, true, Some(Genre::H)))
            .collect();
        dossiers.push(dossier(&chambres[4], &p, false, Some(Genre::F)));

        let snap = aggregate(vec![c], vec![p], chambres, dossiers);

        let places = &snap.total_places_par_pavillon[0].pavillons[0];
        assert_eq!(places.places, 10);
        assert_eq!(places.places_occupees, 4);
        assert_eq!(snap.resume.total_places, 10);
        assert_eq!(snap.resume.total_places_occupees, 4);
        assert_eq!(snap.resume.taux_occupation, 40);
        assert_eq!(snap.chambre_par_campus[0].chambres, 5);
        assert_eq!(snap.dossiers.len(), 5);
    }

    #[test]
    fn campus_without_rooms_reports_zero() {
        let vide = campus("Vide");
        let p = pavillon("Sans chambres", &vide);

        let snap = aggregate(vec![vide], vec![p], vec![], vec![]);

        assert_eq!(snap.chambre_par_campus[0].campus, "Vide");
        assert_eq!(snap.chambre_par_campus[0].chambres, 0);
        assert_eq!(snap.chambre_par_pavillon[0].pavillons[0].chambres, 0);
        assert_eq!(snap.total_places_par_pavillon[0].pavillons[0].places, 0);
        assert_eq!(snap.resume.taux_occupation, 0);
        assert_eq!(snap.resume.genres, RepartitionGenres::default());
    }

    #[test]
    fn campus_embeds_its_own_pavillons() {
        let c1 = campus("Diabir");
        let c2 = campus("Kenya");
        let a = pavillon("A", &c1);
        let b = pavillon("B", &c1);
        let k = pavillon("K", &c2);

        let snap = aggregate(vec![c1, c2], vec![a, b, k], vec![], vec![]);

        assert_eq!(snap.campus[0].pavillons.len(), 2);
        assert_eq!(snap.campus[1].pavillons.len(), 1);
        let json = serde_json::to_value(&snap.campus[0]).unwrap();
        assert_eq!(json["nom"], "Diabir");
        assert_eq!(json["pavillons"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn gender_split_counts_missing_values_separately() {
        let c = campus("Diabir");
        let p = pavillon("A", &c);
        let ch = chambre(&p, 4);
        let dossiers = vec![
            dossier(&ch, &p, true, Some(Genre::H)),
            dossier(&ch, &p, false, Some(Genre::F)),
            dossier(&ch, &p, false, Some(Genre::F)),
            dossier(&ch, &p, false, None),
        ];

        let snap = aggregate(vec![c], vec![p], vec![ch], dossiers);
        let g = &snap.resume.genres;
        assert_eq!((g.hommes, g.femmes, g.non_renseigne), (1, 2, 1));
        assert_eq!(g.pourcentage_hommes, 25);
        assert_eq!(g.pourcentage_femmes, 50);
    }
}
