// src/db/dossier_repo.rs

use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dossier::{Dossier, DossierDetail, DossierDetailRow},
};

// dossier → chambre → pavillon → campus, + étudiant e année
const DETAIL_SELECT: &str = r#"
    SELECT
        d.id, d.numero, d.active, d.caution, d.taux_loyer_mensuelle, d.created_at, d.updated_at,
        c.id AS chambre_id, c.nom AS chambre_nom, c.places AS chambre_places,
        p.id AS pavillon_id, p.nom AS pavillon_nom,
        cp.id AS campus_id, cp.nom AS campus_nom,
        e.id AS etudiant_id, e.nom AS etudiant_nom, e.prenom AS etudiant_prenom,
        e.ncs AS etudiant_ncs, e.genre AS etudiant_genre,
        a.id AS annee_universitaire_id, a.nom AS annee_nom
    FROM dossiers d
    JOIN chambres c ON c.id = d.chambre_id
    JOIN pavillons p ON p.id = c.pavillon_id
    JOIN campus cp ON cp.id = p.campus_id
    JOIN etudiants e ON e.id = d.etudiant_id
    JOIN annees_universitaires a ON a.id = d.annee_universitaire_id
"#;

const CHAMBRE_OCCUPEE: &str = "Cette chambre a déjà un dossier actif.";

#[derive(Clone)]
pub struct DossierRepository {
    pool: PgPool,
}

impl DossierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_details<'e, E>(
        &self,
        executor: E,
        filter: &str,
        id: Uuid,
    ) -> Result<Vec<DossierDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{DETAIL_SELECT} WHERE {filter} = $1 ORDER BY d.numero ASC");
        let rows = sqlx::query_as::<_, DossierDetailRow>(&sql)
            .bind(id)
            .fetch_all(executor)
            .await?;
        Ok(rows.into_iter().map(DossierDetail::from).collect())
    }

    pub async fn list_by_annee<'e, E>(&self, executor: E, annee_id: Uuid) -> Result<Vec<DossierDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.fetch_details(executor, "d.annee_universitaire_id", annee_id).await
    }

    pub async fn list_by_chambre(&self, chambre_id: Uuid) -> Result<Vec<DossierDetail>, AppError> {
        self.fetch_details(&self.pool, "d.chambre_id", chambre_id).await
    }

    pub async fn list_by_etudiant(&self, etudiant_id: Uuid) -> Result<Vec<DossierDetail>, AppError> {
        self.fetch_details(&self.pool, "d.etudiant_id", etudiant_id).await
    }

    pub async fn find_detail<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<DossierDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        Ok(self.fetch_details(executor, "d.id", id).await?.into_iter().next())
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Dossier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let dossier = sqlx::query_as::<_, Dossier>("SELECT * FROM dossiers WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(dossier)
    }

    /// Dossiers ativos no quarto, ignorando `exclude` (o próprio dossier num update).
    pub async fn count_active_in_chambre<'e, E>(
        &self,
        executor: E,
        chambre_id: Uuid,
        exclude: Option<Uuid>,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let n: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM dossiers
            WHERE chambre_id = $1 AND active AND ($2::uuid IS NULL OR id <> $2)
            "#,
        )
        .bind(chambre_id)
        .bind(exclude)
        .fetch_one(executor)
        .await?;
        Ok(n)
    }

    pub async fn create<'e, E>(
        &self,
        executor: E,
        chambre_id: Uuid,
        etudiant_id: Uuid,
        annee_id: Uuid,
        active: bool,
        caution: Decimal,
        taux_loyer_mensuelle: Decimal,
    ) -> Result<Dossier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Dossier>(
            r#"
            INSERT INTO dossiers (chambre_id, etudiant_id, annee_universitaire_id, active, caution, taux_loyer_mensuelle)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(chambre_id)
        .bind(etudiant_id)
        .bind(annee_id)
        .bind(active)
        .bind(caution)
        .bind(taux_loyer_mensuelle)
        .fetch_one(executor)
        .await
        .map_err(|e| AppError::from_write(e, CHAMBRE_OCCUPEE))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        chambre_id: Option<Uuid>,
        etudiant_id: Option<Uuid>,
        active: Option<bool>,
        caution: Option<Decimal>,
        taux_loyer_mensuelle: Option<Decimal>,
    ) -> Result<Option<Dossier>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Dossier>(
            r#"
            UPDATE dossiers SET
                chambre_id = COALESCE($2, chambre_id),
                etudiant_id = COALESCE($3, etudiant_id),
                active = COALESCE($4, active),
                caution = COALESCE($5, caution),
                taux_loyer_mensuelle = COALESCE($6, taux_loyer_mensuelle),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(chambre_id)
        .bind(etudiant_id)
        .bind(active)
        .bind(caution)
        .bind(taux_loyer_mensuelle)
        .fetch_optional(executor)
        .await
        .map_err(|e| AppError::from_write(e, CHAMBRE_OCCUPEE))
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Dossier>, AppError> {
        sqlx::query_as::<_, Dossier>("DELETE FROM dossiers WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::from_delete(e, "le dossier"))
    }
}
