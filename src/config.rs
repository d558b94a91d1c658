// src/config.rs

use std::{env, net::SocketAddr, path::PathBuf, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        AllocationRepository, AnneeRepository, CampusRepository, ChambreRepository,
        DossierRepository, EquipementRepository, EtudiantRepository, PavillonRepository,
        PayementRepository, UserRepository,
    },
    services::{
        annee_service::AnneeService, auth::AuthService, document_service::DocumentService,
        dossier_service::DossierService, stats_service::StatsService,
        structure_service::StructureService,
    },
};

/// Configuração lida do ambiente (e do `.env`, se existir).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub server_addr: SocketAddr,
    pub db_max_connections: u32,
    pub fonts_dir: PathBuf,
    pub font_family: String,
    pub cors_origin: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a config a partir de uma função de busca; separado para os testes.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").context("DATABASE_URL deve ser definida")?;
        let jwt_secret = get("JWT_SECRET").context("JWT_SECRET deve ser definido")?;

        let jwt_ttl_hours = match get("JWT_TTL_HOURS") {
            Some(v) => v.parse().context("JWT_TTL_HOURS inválido")?,
            None => 168,
        };
        let server_addr = get("SERVER_ADDR")
            .unwrap_or_else(|| "0.0.0.0:3000".to_string())
            .parse()
            .context("SERVER_ADDR inválido")?;
        let db_max_connections = match get("DB_MAX_CONNECTIONS") {
            Some(v) => v.parse().context("DB_MAX_CONNECTIONS inválido")?,
            None => 5,
        };

        Ok(Self {
            database_url,
            jwt_secret,
            jwt_ttl_hours,
            server_addr,
            db_max_connections,
            fonts_dir: get("FONTS_DIR").unwrap_or_else(|| "./fonts".into()).into(),
            font_family: get("FONT_FAMILY").unwrap_or_else(|| "Roboto".into()),
            cors_origin: get("CORS_ORIGIN"),
            admin_email: get("ADMIN_EMAIL"),
            admin_password: get("ADMIN_PASSWORD"),
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub config: Arc<Config>,
    pub auth_service: AuthService,
    pub annee_service: AnneeService,
    pub structure_service: StructureService,
    pub dossier_service: DossierService,
    pub stats_service: StatsService,
    pub document_service: DocumentService,
    // CRUD simples vai direto ao repositório
    pub etudiant_repo: EtudiantRepository,
    pub payement_repo: PayementRepository,
    pub equipement_repo: EquipementRepository,
    pub allocation_repo: AllocationRepository,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        Ok(Self::from_pool(db_pool, config))
    }

    /// Monta o grafo de dependências sobre um pool já criado.
    pub fn from_pool(db_pool: PgPool, config: Config) -> Self {
        let annee_repo = AnneeRepository::new(db_pool.clone());
        let campus_repo = CampusRepository::new(db_pool.clone());
        let pavillon_repo = PavillonRepository::new(db_pool.clone());
        let chambre_repo = ChambreRepository::new(db_pool.clone());
        let dossier_repo = DossierRepository::new(db_pool.clone());
        let payement_repo = PayementRepository::new(db_pool.clone());
        let allocation_repo = AllocationRepository::new(db_pool.clone());
        let etudiant_repo = EtudiantRepository::new(db_pool.clone());

        let auth_service = AuthService::new(
            UserRepository::new(db_pool.clone()),
            config.jwt_secret.clone(),
            config.jwt_ttl_hours,
        );
        let annee_service = AnneeService::new(
            db_pool.clone(),
            annee_repo.clone(),
            campus_repo.clone(),
            pavillon_repo.clone(),
            chambre_repo.clone(),
        );
        let structure_service = StructureService::new(
            db_pool.clone(),
            annee_repo.clone(),
            campus_repo.clone(),
            pavillon_repo.clone(),
            chambre_repo.clone(),
        );
        let dossier_service = DossierService::new(
            db_pool.clone(),
            annee_repo.clone(),
            chambre_repo.clone(),
            dossier_repo.clone(),
        );
        let stats_service = StatsService::new(
            db_pool.clone(),
            annee_repo,
            campus_repo,
            pavillon_repo,
            chambre_repo,
            dossier_repo.clone(),
        );
        let document_service = DocumentService::new(
            db_pool.clone(),
            dossier_repo,
            etudiant_repo.clone(),
            payement_repo.clone(),
            allocation_repo.clone(),
            config.fonts_dir.clone(),
            config.font_family.clone(),
        );

        Self {
            etudiant_repo,
            equipement_repo: EquipementRepository::new(db_pool.clone()),
            payement_repo,
            allocation_repo,
            auth_service,
            annee_service,
            structure_service,
            dossier_service,
            stats_service,
            document_service,
            config: Arc::new(config),
            db_pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_vars_are_missing() {
        let config = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/crous"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.jwt_ttl_hours, 168);
        assert_eq!(config.server_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.fonts_dir, PathBuf::from("./fonts"));
        assert_eq!(config.font_family, "Roboto");
        assert!(config.cors_origin.is_none());
        assert!(config.admin_email.is_none());
    }

    #[test]
    fn missing_secret_is_an_error() {
        let err = Config::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/crous")]))
            .unwrap_err();
        assert!(err.to_string().contains("JWT_SECRET"));
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        let result = Config::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/crous"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_TTL_HOURS", "forever"),
        ]));
        assert!(result.is_err());
    }
}
