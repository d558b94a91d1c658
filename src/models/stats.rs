// src/models/stats.rs

use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{campus::Campus, dossier::DossierDetail, pavillon::Pavillon};

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CampusAvecPavillons {
    #[serde(flatten)]
    pub campus: Campus,
    pub pavillons: Vec<Pavillon>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChambreParCampus {
    pub campus: String,
    pub chambres: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PavillonChambres {
    pub pavillon: String,
    pub chambres: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ChambreParPavillon {
    pub campus: String,
    pub pavillons: Vec<PavillonChambres>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PavillonPlaces {
    pub pavillon: String,
    pub places: i64,
    pub places_occupees: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct PlacesParPavillon {
    pub campus: String,
    pub pavillons: Vec<PavillonPlaces>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct RepartitionGenres {
    pub hommes: i64,
    pub femmes: i64,
    pub non_renseigne: i64,
    pub pourcentage_hommes: i64,
    pub pourcentage_femmes: i64,
}

// Os números que o dashboard mostrava nos cartões
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatsResume {
    pub total_chambres: i64,
    pub total_places: i64,
    pub total_places_occupees: i64,
    pub taux_occupation: i64,
    pub genres: RepartitionGenres,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StatsSnapshot {
    pub dossiers: Vec<DossierDetail>,
    pub campus: Vec<CampusAvecPavillons>,
    pub chambre_par_campus: Vec<ChambreParCampus>,
    pub chambre_par_pavillon: Vec<ChambreParPavillon>,
    pub total_places_par_pavillon: Vec<PlacesParPavillon>,
    pub resume: StatsResume,
}
