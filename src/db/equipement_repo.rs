// src/db/equipement_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::equipement::Equipement};

const EQUIPEMENT_EXISTANT: &str = "Un équipement avec ce nom existe déjà.";

#[derive(Clone)]
pub struct EquipementRepository {
    pool: PgPool,
}

impl EquipementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Equipement>, AppError> {
        let equipements = sqlx::query_as::<_, Equipement>("SELECT * FROM equipements ORDER BY nom ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(equipements)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Equipement>, AppError> {
        let equipement = sqlx::query_as::<_, Equipement>("SELECT * FROM equipements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(equipement)
    }

    pub async fn create(&self, nom: &str, description: Option<&str>) -> Result<Equipement, AppError> {
        sqlx::query_as::<_, Equipement>(
            "INSERT INTO equipements (nom, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(nom.trim())
        .bind(description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, EQUIPEMENT_EXISTANT))
    }

    pub async fn update(
        &self,
        id: Uuid,
        nom: Option<&str>,
        description: Option<&str>,
    ) -> Result<Option<Equipement>, AppError> {
        sqlx::query_as::<_, Equipement>(
            r#"
            UPDATE equipements SET
                nom = COALESCE($2, nom),
                description = COALESCE($3, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nom.map(str::trim))
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, EQUIPEMENT_EXISTANT))
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Equipement>, AppError> {
        sqlx::query_as::<_, Equipement>("DELETE FROM equipements WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_delete(e, "l'équipement"))
    }
}
