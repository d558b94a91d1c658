// src/db.rs

pub mod user_repo;
pub use user_repo::UserRepository;
pub mod annee_repo;
pub use annee_repo::AnneeRepository;
pub mod campus_repo;
pub use campus_repo::CampusRepository;
pub mod pavillon_repo;
pub use pavillon_repo::PavillonRepository;
pub mod chambre_repo;
pub use chambre_repo::ChambreRepository;
pub mod etudiant_repo;
pub use etudiant_repo::EtudiantRepository;
pub mod dossier_repo;
pub use dossier_repo::DossierRepository;
pub mod payement_repo;
pub use payement_repo::PayementRepository;
pub mod equipement_repo;
pub use equipement_repo::EquipementRepository;
pub mod allocation_repo;
pub use allocation_repo::AllocationRepository;
