// src/services.rs

pub mod annee_service;
pub mod auth;
pub mod document_service;
pub mod dossier_service;
pub mod stats_service;
pub mod structure_service;

#[cfg(test)]
mod scenarios;
