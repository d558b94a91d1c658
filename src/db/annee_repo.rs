// src/db/annee_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::annee::AnneeUniversitaire};

pub(crate) const NOM_EXISTANT: &str = "Une année universitaire porte déjà ce nom.";
pub(crate) const DEJA_ACTIVE: &str =
    "Une autre année universitaire vient d'être activée; réessayez.";

// Índice parcial da migração inicial
const UN_SEUL_ACTIF: &str = "idx_annees_un_seul_actif";

fn map_write(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.constraint() == Some(UN_SEUL_ACTIF) {
            return AppError::Conflict(DEJA_ACTIVE.into());
        }
    }
    AppError::from_write(e, NOM_EXISTANT)
}

#[derive(Clone)]
pub struct AnneeRepository {
    pool: PgPool,
}

impl AnneeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<AnneeUniversitaire>, AppError> {
        let annees = sqlx::query_as::<_, AnneeUniversitaire>(
            "SELECT * FROM annees_universitaires ORDER BY nom DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(annees)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<AnneeUniversitaire>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let annee = sqlx::query_as::<_, AnneeUniversitaire>(
            "SELECT * FROM annees_universitaires WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(annee)
    }

    /// Trava a linha do ano até o fim da transação; serializa imports concorrentes para o mesmo destino.
    pub async fn find_by_id_for_update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<AnneeUniversitaire>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let annee = sqlx::query_as::<_, AnneeUniversitaire>(
            "SELECT * FROM annees_universitaires WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;
        Ok(annee)
    }

    pub async fn find_active(&self) -> Result<Option<AnneeUniversitaire>, AppError> {
        let annee = sqlx::query_as::<_, AnneeUniversitaire>(
            "SELECT * FROM annees_universitaires WHERE is_actif LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(annee)
    }

    /// Desativa todos os anos menos `keep` (ou todos, se `None`).
    pub async fn deactivate_others<'e, E>(&self, executor: E, keep: Option<Uuid>) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE annees_universitaires
            SET is_actif = FALSE, updated_at = NOW()
            WHERE is_actif AND ($1::uuid IS NULL OR id <> $1)
            "#,
        )
        .bind(keep)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        nom: &str,
        is_actif: bool,
    ) -> Result<AnneeUniversitaire, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, AnneeUniversitaire>(
            r#"
            INSERT INTO annees_universitaires (nom, is_actif)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(nom)
        .bind(is_actif)
        .fetch_one(executor)
        .await
        .map_err(map_write)
    }

    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        nom: Option<&str>,
        is_actif: Option<bool>,
    ) -> Result<Option<AnneeUniversitaire>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, AnneeUniversitaire>(
            r#"
            UPDATE annees_universitaires SET
                nom = COALESCE($2, nom),
                is_actif = COALESCE($3, is_actif),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(nom)
        .bind(is_actif)
        .fetch_optional(executor)
        .await
        .map_err(map_write)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<AnneeUniversitaire>, AppError> {
        sqlx::query_as::<_, AnneeUniversitaire>(
            "DELETE FROM annees_universitaires WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_delete(e, "l'année universitaire"))
    }

    pub async fn count_campus<'e, E>(&self, executor: E, annee_id: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM campus WHERE annee_universitaire_id = $1")
            .bind(annee_id)
            .fetch_one(executor)
            .await?;
        Ok(n)
    }
}
