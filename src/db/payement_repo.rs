// src/db/payement_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::payement::{CreatePayementPayload, Payement, UpdatePayementPayload},
};

const FACTURE_EXISTANTE: &str = "Ce numéro de facture existe déjà.";

#[derive(Clone)]
pub struct PayementRepository {
    pool: PgPool,
}

impl PayementRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Payement>, AppError> {
        let payements = sqlx::query_as::<_, Payement>(
            "SELECT * FROM payements ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(payements)
    }

    pub async fn list_by_dossier(&self, dossier_id: Uuid) -> Result<Vec<Payement>, AppError> {
        let payements = sqlx::query_as::<_, Payement>(
            "SELECT * FROM payements WHERE dossier_id = $1 ORDER BY created_at ASC",
        )
        .bind(dossier_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(payements)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Payement>, AppError> {
        let payement = sqlx::query_as::<_, Payement>("SELECT * FROM payements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(payement)
    }

    pub async fn create(&self, p: &CreatePayementPayload) -> Result<Payement, AppError> {
        sqlx::query_as::<_, Payement>(
            r#"
            INSERT INTO payements (dossier_id, montant, mois, numero_facture)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(p.dossier_id)
        .bind(p.montant)
        .bind(p.mois)
        .bind(p.numero_facture.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, FACTURE_EXISTANTE))
    }

    pub async fn update(&self, id: Uuid, p: &UpdatePayementPayload) -> Result<Option<Payement>, AppError> {
        sqlx::query_as::<_, Payement>(
            r#"
            UPDATE payements SET
                dossier_id = COALESCE($2, dossier_id),
                montant = COALESCE($3, montant),
                mois = COALESCE($4, mois),
                numero_facture = COALESCE($5, numero_facture),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(p.dossier_id)
        .bind(p.montant)
        .bind(p.mois)
        .bind(p.numero_facture.as_deref().map(str::trim))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::from_write(e, FACTURE_EXISTANTE))
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Payement>, AppError> {
        sqlx::query_as::<_, Payement>("DELETE FROM payements WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_delete(e, "le payement"))
    }
}
