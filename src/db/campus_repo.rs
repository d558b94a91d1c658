// src/db/campus_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::campus::Campus};

#[derive(Clone)]
pub struct CampusRepository {
    pool: PgPool,
}

impl CampusRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list_by_annee<'e, E>(&self, executor: E, annee_id: Uuid) -> Result<Vec<Campus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let campus = sqlx::query_as::<_, Campus>(
            "SELECT * FROM campus WHERE annee_universitaire_id = $1 ORDER BY nom ASC",
        )
        .bind(annee_id)
        .fetch_all(executor)
        .await?;
        Ok(campus)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Campus>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let campus = sqlx::query_as::<_, Campus>("SELECT * FROM campus WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(campus)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        nom: &str,
        adresse: Option<&str>,
        latitude: Option<&str>,
        longitude: Option<&str>,
        annee_id: Uuid,
    ) -> Result<Campus, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Campus>(
            r#"
            INSERT INTO campus (nom, adresse, latitude, longitude, annee_universitaire_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(nom)
        .bind(adresse)
        .bind(latitude)
        .bind(longitude)
        .bind(annee_id)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_write(e, "Ce campus existe déjà."))
    }

    pub async fn update(
        &self,
        id: Uuid,
        nom: Option<&str>,
        adresse: Option<&str>,
        latitude: Option<&str>,
        longitude: Option<&str>,
    ) -> Result<Option<Campus>, AppError> {
        sqlx::query_as::<_, Campus>(
            r#"
            UPDATE campus SET
                nom = COALESCE($2, nom),
                adresse = COALESCE($3, adresse),
                latitude = COALESCE($4, latitude),
                longitude = COALESCE($5, longitude),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nom)
        .bind(adresse)
        .bind(latitude)
        .bind(longitude)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Ce campus existe déjà."))
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Campus>, AppError> {
        sqlx::query_as::<_, Campus>("DELETE FROM campus WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_delete(e, "le campus"))
    }
}
