// src/db/etudiant_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::etudiant::{CreateEtudiantPayload, Etudiant, UpdateEtudiantPayload},
};

const NCS_EXISTANT: &str = "Un étudiant avec ce NCS existe déjà.";

#[derive(Clone)]
pub struct EtudiantRepository {
    pool: PgPool,
}

impl EtudiantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Etudiant>, AppError> {
        let etudiants = sqlx::query_as::<_, Etudiant>(
            "SELECT * FROM etudiants ORDER BY nom ASC, prenom ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(etudiants)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Etudiant>, AppError> {
        let etudiant = sqlx::query_as::<_, Etudiant>("SELECT * FROM etudiants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(etudiant)
    }

    pub async fn find_by_ncs(&self, ncs: &str) -> Result<Option<Etudiant>, AppError> {
        let etudiant = sqlx::query_as::<_, Etudiant>("SELECT * FROM etudiants WHERE ncs = $1")
            .bind(ncs.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(etudiant)
    }

    pub async fn create(&self, p: &CreateEtudiantPayload) -> Result<Etudiant, AppError> {
        sqlx::query_as::<_, Etudiant>(
            r#"
            INSERT INTO etudiants (nom, prenom, ncs, cni, email, telephone, avatar, genre)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&p.nom)
        .bind(&p.prenom)
        .bind(p.ncs.trim())
        .bind(&p.cni)
        .bind(&p.email)
        .bind(&p.telephone)
        .bind(&p.avatar)
        .bind(p.genre)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, NCS_EXISTANT))
    }

    pub async fn update(&self, id: Uuid, p: &UpdateEtudiantPayload) -> Result<Option<Etudiant>, AppError> {
        sqlx::query_as::<_, Etudiant>(
            r#"
            UPDATE etudiants SET
                nom = COALESCE($2, nom),
                prenom = COALESCE($3, prenom),
                ncs = COALESCE($4, ncs),
                cni = COALESCE($5, cni),
                email = COALESCE($6, email),
                telephone = COALESCE($7, telephone),
                avatar = COALESCE($8, avatar),
                genre = COALESCE($9, genre),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&p.nom)
        .bind(&p.prenom)
        .bind(p.ncs.as_deref().map(str::trim))
        .bind(&p.cni)
        .bind(&p.email)
        .bind(&p.telephone)
        .bind(&p.avatar)
        .bind(p.genre)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, NCS_EXISTANT))
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Etudiant>, AppError> {
        sqlx::query_as::<_, Etudiant>("DELETE FROM etudiants WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_delete(e, "l'étudiant"))
    }
}
