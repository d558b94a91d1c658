// src/db/chambre_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::chambre::Chambre};

#[derive(Clone)]
pub struct ChambreRepository {
    pool: PgPool,
}

impl ChambreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_annee<'e, E>(&self, executor: E, annee_id: Uuid) -> Result<Vec<Chambre>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let chambres = sqlx::query_as::<_, Chambre>(
            "SELECT * FROM chambres WHERE annee_universitaire_id = $1 ORDER BY nom ASC",
        )
        .bind(annee_id)
        .fetch_all(executor)
        .await?;
        Ok(chambres)
    }

    pub async fn list_by_pavillon(&self, pavillon_id: Uuid) -> Result<Vec<Chambre>, AppError> {
        let chambres = sqlx::query_as::<_, Chambre>(
            "SELECT * FROM chambres WHERE pavillon_id = $1 ORDER BY nom ASC",
        )
        .bind(pavillon_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(chambres)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Chambre>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let chambre = sqlx::query_as::<_, Chambre>("SELECT * FROM chambres WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(chambre)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        nom: &str,
        pavillon_id: Uuid,
        places: i32,
        annee_id: Uuid,
    ) -> Result<Chambre, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Chambre>(
            r#"
            INSERT INTO chambres (nom, pavillon_id, places, annee_universitaire_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(nom)
        .bind(pavillon_id)
        .bind(places)
        .bind(annee_id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_write(e, "Cette chambre existe déjà."))
    }

    pub async fn update(
        &self,
        id: Uuid,
        nom: Option<&str>,
        pavillon_id: Option<Uuid>,
        places: Option<i32>,
    ) -> Result<Option<Chambre>, AppError> {
        sqlx::query_as::<_, Chambre>(
            r#"
            UPDATE chambres SET
                nom = COALESCE($2, nom),
                pavillon_id = COALESCE($3, pavillon_id),
                places = COALESCE($4, places),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nom)
        .bind(pavillon_id)
        .bind(places)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Cette chambre existe déjà."))
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Chambre>, AppError> {
        sqlx::query_as::<_, Chambre>("DELETE FROM chambres WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_delete(e, "la chambre"))
    }
}
