// src/services/scenarios.rs
//
// Cenários contra um Postgres real (`DATABASE_URL`); rodar com `cargo test -- --ignored`.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{
        annee_repo::{DEJA_ACTIVE, NOM_EXISTANT},
        AnneeRepository, CampusRepository, ChambreRepository, DossierRepository, EtudiantRepository,
        PavillonRepository, UserRepository,
    },
    models::{
        annee::{CreateAnneePayload, ImportPayload, ImportSummary},
        dossier::CreateDossierPayload,
        etudiant::{CreateEtudiantPayload, Genre},
    },
    services::{
        annee_service::AnneeService, auth::AuthService, dossier_service::DossierService,
        stats_service::StatsService,
    },
};

struct Fixture {
    pool: PgPool,
    annees: AnneeService,
    dossiers: DossierService,
    stats: StatsService,
    annee_repo: AnneeRepository,
    campus_repo: CampusRepository,
    pavillon_repo: PavillonRepository,
    chambre_repo: ChambreRepository,
    etudiant_repo: EtudiantRepository,
    dossier_repo: DossierRepository,
}

impl Fixture {
    fn new(pool: PgPool) -> Self {
        let annee_repo = AnneeRepository::new(pool.clone());
        let campus_repo = CampusRepository::new(pool.clone());
        let pavillon_repo = PavillonRepository::new(pool.clone());
        let chambre_repo = ChambreRepository::new(pool.clone());
        let dossier_repo = DossierRepository::new(pool.clone());

        Self {
            annees: AnneeService::new(
                pool.clone(),
                annee_repo.clone(),
                campus_repo.clone(),
                pavillon_repo.clone(),
                chambre_repo.clone(),
            ),
            dossiers: DossierService::new(
                pool.clone(),
                annee_repo.clone(),
                chambre_repo.clone(),
                dossier_repo.clone(),
            ),
            stats: StatsService::new(
                pool.clone(),
                annee_repo.clone(),
                campus_repo.clone(),
                pavillon_repo.clone(),
                chambre_repo.clone(),
                dossier_repo.clone(),
            ),
            etudiant_repo: EtudiantRepository::new(pool.clone()),
            annee_repo,
            dossier_repo,
            campus_repo,
            pavillon_repo,
            chambre_repo,
            pool,
        }
    }

    async fn annee(&self, nom: &str, is_actif: bool) -> Uuid {
        self.annees
            .create(CreateAnneePayload { nom: nom.into(), is_actif })
            .await
            .unwrap()
            .id
    }

    /// Dois campus, três pavillons, cinco quartos (2+2+2+2+2 lugares).
    async fn structure(&self, annee: Uuid) -> Vec<Uuid> {
        let diabir = self.campus_repo.create(&self.pool, "Diabir", None, None, None, annee).await.unwrap();
        let kenya = self.campus_repo.create(&self.pool, "Kenya", None, None, None, annee).await.unwrap();

        let a = self.pavillon_repo.create(&self.pool, "A", diabir.id, None, annee).await.unwrap();
        let b = self.pavillon_repo.create(&self.pool, "B", diabir.id, None, annee).await.unwrap();
        let c = self.pavillon_repo.create(&self.pool, "C", kenya.id, None, annee).await.unwrap();

        let mut chambres = Vec::new();
        for (nom, pavillon) in [("A1", a.id), ("A2", a.id), ("B1", b.id), ("C1", c.id), ("C2", c.id)] {
            let chambre = self.chambre_repo.create(&self.pool, nom, pavillon, 2, annee).await.unwrap();
            chambres.push(chambre.id);
        }
        chambres
    }

    async fn campus_noms(&self, annee: Uuid) -> Vec<String> {
        let mut noms: Vec<_> = self
            .campus_repo
            .list_by_annee(&self.pool, annee)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.nom)
            .collect();
        noms.sort();
        noms
    }

    async fn etudiant(&self, ncs: &str, genre: Option<Genre>) -> Uuid {
        self.etudiant_repo
            .create(&CreateEtudiantPayload {
                nom: "Ndiaye".into(),
                prenom: "Moussa".into(),
                ncs: ncs.into(),
                cni: None,
                email: None,
                telephone: None,
                avatar: None,
                genre,
            })
            .await
            .unwrap()
            .id
    }

    async fn dossier(&self, chambre: Uuid, etudiant: Uuid) -> Result<Uuid, AppError> {
        let d = self
            .dossiers
            .create(CreateDossierPayload {
                chambre_id: chambre,
                etudiant_id: etudiant,
                annee_universitaire_id: None,
                active: true,
                caution: Decimal::from(15000),
                taux_loyer_mensuelle: Decimal::from(3000),
            })
            .await?;
        Ok(d.id)
    }
}

#[sqlx::test]
#[ignore = "requer Postgres"]
async fn import_copies_the_tree_once(pool: PgPool) {
    let f = Fixture::new(pool);
    let origem = f.annee("2023-2024", false).await;
    let destino = f.annee("2024-2025", true).await;
    let chambres_origem = f.structure(origem).await;
    let etudiant = f.etudiant("2023A0001", Some(Genre::F)).await;
    f.dossier(chambres_origem[0], etudiant).await.unwrap();

    let payload = || ImportPayload { annee_from: origem, annee_to: destino };
    let summary = f.annees.import(payload()).await.unwrap();
    assert_eq!(summary, ImportSummary { campus: 2, pavillons: 3, chambres: 5 });

    let chambres = f.chambre_repo.list_by_annee(&f.pool, destino).await.unwrap();
    assert_eq!(chambres.len(), 5);
    assert!(chambres.iter().all(|c| c.annee_universitaire_id == destino && c.places == 2));

    // Mesmos nomes, ids novos
    assert_eq!(f.campus_noms(destino).await, f.campus_noms(origem).await);

    let pavillons_origem = f.pavillon_repo.list_by_annee(&f.pool, origem).await.unwrap();
    let pavillons_destino = f.pavillon_repo.list_by_annee(&f.pool, destino).await.unwrap();
    let mut noms_origem: Vec<_> = pavillons_origem.iter().map(|p| p.nom.as_str()).collect();
    let mut noms_destino: Vec<_> = pavillons_destino.iter().map(|p| p.nom.as_str()).collect();
    noms_origem.sort();
    noms_destino.sort();
    assert_eq!(noms_destino, vec!["A", "B", "C"]);
    assert_eq!(noms_destino, noms_origem);
    assert!(pavillons_destino.iter().all(|p| pavillons_origem.iter().all(|o| o.id != p.id)));

    // Dossiers não são copiados
    assert!(f.dossier_repo.list_by_annee(&f.pool, destino).await.unwrap().is_empty());
    assert_eq!(f.dossier_repo.list_by_annee(&f.pool, origem).await.unwrap().len(), 1);

    // Segunda vez: destino já tem campus
    let err = f.annees.import(payload()).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(f.campus_repo.list_by_annee(&f.pool, destino).await.unwrap().len(), 2);
}

#[sqlx::test]
#[ignore = "requer Postgres"]
async fn overlapping_imports_copy_the_tree_once(pool: PgPool) {
    let f = Fixture::new(pool);
    let origem = f.annee("2023-2024", false).await;
    let destino = f.annee("2024-2025", true).await;
    f.structure(origem).await;

    let payload = || ImportPayload { annee_from: origem, annee_to: destino };
    let (first, second) = tokio::join!(f.annees.import(payload()), f.annees.import(payload()));

    let results = [first, second];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results.iter().filter(|r| matches!(r, Err(AppError::Conflict(_)))).count(),
        1
    );
    assert_eq!(f.campus_repo.list_by_annee(&f.pool, destino).await.unwrap().len(), 2);
    assert_eq!(f.pavillon_repo.list_by_annee(&f.pool, destino).await.unwrap().len(), 3);
    assert_eq!(f.chambre_repo.list_by_annee(&f.pool, destino).await.unwrap().len(), 5);
}

#[sqlx::test]
#[ignore = "requer Postgres"]
async fn import_rejects_same_or_unknown_year(pool: PgPool) {
    let f = Fixture::new(pool);
    let annee = f.annee("2024-2025", true).await;

    let same = f.annees.import(ImportPayload { annee_from: annee, annee_to: annee }).await;
    assert!(matches!(same, Err(AppError::BadRequest(_))));

    let unknown = f
        .annees
        .import(ImportPayload { annee_from: Uuid::new_v4(), annee_to: annee })
        .await;
    assert!(matches!(unknown, Err(AppError::NotFound(_))));
}

#[sqlx::test]
#[ignore = "requer Postgres"]
async fn activating_a_year_deactivates_the_others(pool: PgPool) {
    let f = Fixture::new(pool);
    let ancienne = f.annee("2023-2024", true).await;
    let nouvelle = f.annee("2024-2025", true).await;

    assert_eq!(f.annees.active().await.unwrap().id, nouvelle);
    assert!(!f.annees.get(ancienne).await.unwrap().is_actif);
}

#[sqlx::test]
#[ignore = "requer Postgres"]
async fn second_active_year_conflict_names_the_activation(pool: PgPool) {
    let f = Fixture::new(pool);
    f.annee("2024-2025", true).await;

    // Sem desativar os outros antes: cai no índice de ano único ativo
    let err = f.annee_repo.create(&f.pool, "2025-2026", true).await.unwrap_err();
    match err {
        AppError::Conflict(msg) => assert_eq!(msg, DEJA_ACTIVE),
        other => panic!("esperava Conflict, veio {:?}", other),
    }

    let err = f.annee_repo.create(&f.pool, "2024-2025", false).await.unwrap_err();
    match err {
        AppError::Conflict(msg) => assert_eq!(msg, NOM_EXISTANT),
        other => panic!("esperava Conflict, veio {:?}", other),
    }
}

#[sqlx::test]
#[ignore = "requer Postgres"]
async fn initial_admin_is_created_once(pool: PgPool) {
    let auth = AuthService::new(UserRepository::new(pool), "secret".into(), 1);

    assert!(auth.ensure_admin("admin@crous.sn", "motdepasse").await.unwrap());
    assert!(!auth.ensure_admin("autre@crous.sn", "motdepasse").await.unwrap());

    let login = auth.login_user("admin@crous.sn", "motdepasse").await.unwrap();
    assert!(!login.token.is_empty());
}

#[sqlx::test]
#[ignore = "requer Postgres"]
async fn delete_rules_for_years(pool: PgPool) {
    let f = Fixture::new(pool);
    let active = f.annee("2024-2025", true).await;
    let referenced = f.annee("2023-2024", false).await;
    let empty = f.annee("2022-2023", false).await;
    f.structure(referenced).await;

    assert!(matches!(f.annees.delete(active).await, Err(AppError::Conflict(_))));
    assert!(matches!(f.annees.delete(referenced).await, Err(AppError::Conflict(_))));
    assert_eq!(f.annees.delete(empty).await.unwrap().id, empty);
    assert!(matches!(f.annees.get(empty).await, Err(AppError::NotFound(_))));
}

#[sqlx::test]
#[ignore = "requer Postgres"]
async fn occupancy_and_single_active_dossier(pool: PgPool) {
    let f = Fixture::new(pool);
    let annee = f.annee("2024-2025", true).await;
    let chambres = f.structure(annee).await;

    let genres = [Some(Genre::H), Some(Genre::F), Some(Genre::F), None];
    for (i, (chambre, genre)) in chambres.iter().zip(genres).enumerate() {
        let etudiant = f.etudiant(&format!("2024A{:04}", i), genre).await;
        f.dossier(*chambre, etudiant).await.unwrap();
    }

    // Quarto já ocupado
    let intrus = f.etudiant("2024A9999", Some(Genre::H)).await;
    let err = f.dossier(chambres[0], intrus).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let snapshot = f.stats.snapshot(annee).await.unwrap();
    assert_eq!(snapshot.resume.total_places, 10);
    assert_eq!(snapshot.resume.total_places_occupees, 4);
    assert_eq!(snapshot.resume.taux_occupation, 40);
    assert_eq!(snapshot.resume.genres.femmes, 2);
    assert_eq!(snapshot.resume.genres.non_renseigne, 1);
    assert_eq!(snapshot.chambre_par_campus.len(), 2);
    assert_eq!(snapshot.dossiers.len(), 4);

    // O dossier herda o ano do quarto
    assert!(snapshot.dossiers.iter().all(|d| d.annee_universitaire.id == annee));
}
