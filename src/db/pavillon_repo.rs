// src/db/pavillon_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::pavillon::Pavillon};

#[derive(Clone)]
pub struct PavillonRepository {
    pool: PgPool,
}

impl PavillonRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_annee<'e, E>(&self, executor: E, annee_id: Uuid) -> Result<Vec<Pavillon>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pavillons = sqlx::query_as::<_, Pavillon>(
            "SELECT * FROM pavillons WHERE annee_universitaire_id = $1 ORDER BY nom ASC",
        )
        .bind(annee_id)
        .fetch_all(executor)
        .await?;
        Ok(pavillons)
    }

    pub async fn list_by_campus(&self, campus_id: Uuid) -> Result<Vec<Pavillon>, AppError> {
        let pavillons = sqlx::query_as::<_, Pavillon>(
            "SELECT * FROM pavillons WHERE campus_id = $1 ORDER BY nom ASC",
        )
        .bind(campus_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(pavillons)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Pavillon>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let pavillon = sqlx::query_as::<_, Pavillon>("SELECT * FROM pavillons WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(pavillon)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        nom: &str,
        campus_id: Uuid,
        description: Option<&str>,
        annee_id: Uuid,
    ) -> Result<Pavillon, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Pavillon>(
            r#"
            INSERT INTO pavillons (nom, campus_id, description, annee_universitaire_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nom)
        .bind(campus_id)
        .bind(description)
        .bind(annee_id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_write(e, "Ce pavillon existe déjà."))
    }

    pub async fn update(
        &self,
        id: Uuid,
        nom: Option<&str>,
        campus_id: Option<Uuid>,
        description: Option<&str>,
    ) -> Result<Option<Pavillon>, AppError> {
        sqlx::query_as::<_, Pavillon>(
            r#"
            UPDATE pavillons SET
                nom = COALESCE($2, nom),
                campus_id = COALESCE($3, campus_id),
                description = COALESCE($4, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nom)
        .bind(campus_id)
        .bind(description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Ce pavillon existe déjà."))
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Pavillon>, AppError> {
        sqlx::query_as::<_, Pavillon>("DELETE FROM pavillons WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_delete(e, "le pavillon"))
    }
}
