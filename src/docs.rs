// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "CROUS Résidences",
        description = "Gestion des résidences universitaires: structure, dossiers, paiements et matériel"
    ),
    paths(
        // --- Utilisateurs ---
        handlers::auth::login,
        handlers::auth::get_me,
        handlers::auth::list_users,
        handlers::auth::get_user,
        handlers::auth::create_user,
        handlers::auth::update_user,
        handlers::auth::delete_user,

        // --- Années ---
        handlers::annee::list_annees,
        handlers::annee::get_active_annee,
        handlers::annee::get_annee,
        handlers::annee::create_annee,
        handlers::annee::update_annee,
        handlers::annee::delete_annee,
        handlers::annee::import_annee,
        handlers::annee::get_statistiques,

        // --- Structure ---
        handlers::campus::list_campus,
        handlers::campus::get_campus,
        handlers::campus::create_campus,
        handlers::campus::update_campus,
        handlers::campus::delete_campus,
        handlers::pavillon::list_pavillons,
        handlers::pavillon::list_pavillons_by_annee,
        handlers::pavillon::list_pavillons_by_campus,
        handlers::pavillon::get_pavillon,
        handlers::pavillon::create_pavillon,
        handlers::pavillon::update_pavillon,
        handlers::pavillon::delete_pavillon,
        handlers::chambre::list_chambres,
        handlers::chambre::list_chambres_by_annee,
        handlers::chambre::list_chambres_by_pavillon,
        handlers::chambre::get_chambre,
        handlers::chambre::create_chambre,
        handlers::chambre::update_chambre,
        handlers::chambre::delete_chambre,

        // --- Étudiants ---
        handlers::etudiant::list_etudiants,
        handlers::etudiant::get_etudiant,
        handlers::etudiant::get_etudiant_by_ncs,
        handlers::etudiant::create_etudiant,
        handlers::etudiant::update_etudiant,
        handlers::etudiant::delete_etudiant,

        // --- Dossiers ---
        handlers::dossier::list_dossiers,
        handlers::dossier::list_dossiers_by_annee,
        handlers::dossier::list_dossiers_by_chambre,
        handlers::dossier::list_dossiers_by_etudiant,
        handlers::dossier::get_dossier,
        handlers::dossier::generate_dossier_pdf,
        handlers::dossier::create_dossier,
        handlers::dossier::update_dossier,
        handlers::dossier::delete_dossier,

        // --- Paiements ---
        handlers::payement::list_payements,
        handlers::payement::list_payements_by_dossier,
        handlers::payement::get_payement,
        handlers::payement::create_payement,
        handlers::payement::update_payement,
        handlers::payement::delete_payement,

        // --- Matériel ---
        handlers::equipement::list_equipements,
        handlers::equipement::get_equipement,
        handlers::equipement::create_equipement,
        handlers::equipement::update_equipement,
        handlers::equipement::delete_equipement,
        handlers::allocation::list_allocations,
        handlers::allocation::list_allocations_by_dossier,
        handlers::allocation::get_allocation_stats,
        handlers::allocation::get_allocation,
        handlers::allocation::create_allocation,
        handlers::allocation::update_allocation,
        handlers::allocation::delete_allocation,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::Role,
            models::auth::User,
            models::auth::LoginPayload,
            models::auth::LoginResponse,
            models::auth::CreateUserPayload,
            models::auth::UpdateUserPayload,

            // --- Années ---
            models::annee::AnneeUniversitaire,
            models::annee::CreateAnneePayload,
            models::annee::UpdateAnneePayload,
            models::annee::ImportPayload,
            models::annee::ImportSummary,

            // --- Structure ---
            models::campus::Campus,
            models::campus::CreateCampusPayload,
            models::campus::UpdateCampusPayload,
            models::pavillon::Pavillon,
            models::pavillon::CreatePavillonPayload,
            models::pavillon::UpdatePavillonPayload,
            models::chambre::Chambre,
            models::chambre::CreateChambrePayload,
            models::chambre::UpdateChambrePayload,

            // --- Étudiants ---
            models::etudiant::Genre,
            models::etudiant::Etudiant,
            models::etudiant::CreateEtudiantPayload,
            models::etudiant::UpdateEtudiantPayload,

            // --- Dossiers ---
            models::dossier::Dossier,
            models::dossier::DossierDetail,
            models::dossier::CampusRef,
            models::dossier::PavillonRef,
            models::dossier::ChambreRef,
            models::dossier::EtudiantRef,
            models::dossier::AnneeRef,
            models::dossier::CreateDossierPayload,
            models::dossier::UpdateDossierPayload,

            // --- Paiements ---
            models::payement::Mois,
            models::payement::Payement,
            models::payement::CreatePayementPayload,
            models::payement::UpdatePayementPayload,

            // --- Matériel ---
            models::equipement::Equipement,
            models::equipement::CreateEquipementPayload,
            models::equipement::UpdateEquipementPayload,
            models::allocation::EtatMateriel,
            models::allocation::AllocationMateriel,
            models::allocation::AllocationStats,
            models::allocation::CreateAllocationPayload,
            models::allocation::UpdateAllocationPayload,

            // --- Statistiques ---
            models::stats::StatsSnapshot,
            models::stats::StatsResume,
            models::stats::CampusAvecPavillons,
            models::stats::ChambreParCampus,
            models::stats::PavillonChambres,
            models::stats::ChambreParPavillon,
            models::stats::PavillonPlaces,
            models::stats::PlacesParPavillon,
            models::stats::RepartitionGenres,
        )
    ),
    tags(
        (name = "Utilisateurs", description = "Connexion et comptes"),
        (name = "Années universitaires", description = "Années, import de structure et statistiques"),
        (name = "Campus", description = "Campus d'une année"),
        (name = "Pavillons", description = "Pavillons d'un campus"),
        (name = "Chambres", description = "Chambres d'un pavillon"),
        (name = "Étudiants", description = "Registre des étudiants"),
        (name = "Dossiers", description = "Attributions de chambre et fiche PDF"),
        (name = "Paiements", description = "Paiements mensuels d'un dossier"),
        (name = "Équipements", description = "Catalogue du matériel"),
        (name = "Allocations", description = "Matériel remis aux résidents")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
