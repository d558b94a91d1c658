// src/db/allocation_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::allocation::{
        AllocationLigne, AllocationMateriel, CreateAllocationPayload, UpdateAllocationPayload,
    },
};

#[derive(Clone)]
pub struct AllocationRepository {
    pool: PgPool,
}

impl AllocationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<AllocationMateriel>, AppError> {
        let allocations = sqlx::query_as::<_, AllocationMateriel>(
            "SELECT * FROM allocations_materiel ORDER BY date DESC, created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(allocations)
    }

    pub async fn list_by_dossier(&self, dossier_id: Uuid) -> Result<Vec<AllocationMateriel>, AppError> {
        let allocations = sqlx::query_as::<_, AllocationMateriel>(
            "SELECT * FROM allocations_materiel WHERE dossier_id = $1 ORDER BY date ASC, created_at ASC",
        )
        .bind(dossier_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(allocations)
    }

    /// Linhas da ficha: alocações do dossier com o nome do equipamento.
    pub async fn lignes_for_dossier<'e, E>(
        &self,
        executor: E,
        dossier_id: Uuid,
    ) -> Result<Vec<AllocationLigne>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let lignes = sqlx::query_as::<_, AllocationLigne>(
            r#"
            SELECT eq.nom AS equipement_nom, a.nombre, a.etat, a.date, a.constatation
            FROM allocations_materiel a
            JOIN equipements eq ON eq.id = a.equipement_id
            WHERE a.dossier_id = $1
            ORDER BY a.date ASC, eq.nom ASC
            "#,
        )
        .bind(dossier_id)
        .fetch_all(executor)
        .await?;
        Ok(lignes)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AllocationMateriel>, AppError> {
        let allocation = sqlx::query_as::<_, AllocationMateriel>(
            "SELECT * FROM allocations_materiel WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(allocation)
    }

    pub async fn create(&self, p: &CreateAllocationPayload) -> Result<AllocationMateriel, AppError> {
        sqlx::query_as::<_, AllocationMateriel>(
            r#"
            INSERT INTO allocations_materiel
                (date, dossier_id, equipement_id, nombre, description, constatation, etat)
            VALUES (COALESCE($1, CURRENT_DATE), $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(p.date)
        .bind(p.dossier_id)
        .bind(p.equipement_id)
        .bind(p.nombre)
        .bind(&p.description)
        .bind(&p.constatation)
        .bind(p.etat)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Cette allocation existe déjà."))
    }

    pub async fn update(
        &self,
        id: Uuid,
        p: &UpdateAllocationPayload,
    ) -> Result<Option<AllocationMateriel>, AppError> {
        sqlx::query_as::<_, AllocationMateriel>(
            r#"
            UPDATE allocations_materiel SET
                date = COALESCE($2, date),
                dossier_id = COALESCE($3, dossier_id),
                equipement_id = COALESCE($4, equipement_id),
                nombre = COALESCE($5, nombre),
                description = COALESCE($6, description),
                constatation = COALESCE($7, constatation),
                etat = COALESCE($8, etat),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(p.date)
        .bind(p.dossier_id)
        .bind(p.equipement_id)
        .bind(p.nombre)
        .bind(&p.description)
        .bind(&p.constatation)
        .bind(p.etat)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, "Cette allocation existe déjà."))
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<AllocationMateriel>, AppError> {
        sqlx::query_as::<_, AllocationMateriel>(
            "DELETE FROM allocations_materiel WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_delete(e, "l'allocation"))
    }
}
