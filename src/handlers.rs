// src/handlers.rs

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
