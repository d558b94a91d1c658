// src/db/user_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::auth::User};

// O repositório de usuários, responsável por todas as interações com a tabela 'users'
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

fn map_email_conflict(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            return AppError::EmailAlreadyExists;
        }
    }
    e.into()
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE lower(email) = lower($1)")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        let users = sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY nom ASC, prenom ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    pub async fn create(
        &self,
        prenom: &str,
        nom: &str,
        email: &str,
        password_hash: &str,
        role: &[String],
        is_actif: bool,
    ) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (prenom, nom, email, password_hash, role, is_actif)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(prenom)
        .bind(nom)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(is_actif)
        .fetch_one(&self.pool)
        .await
        .map_err(map_email_conflict)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update(
        &self,
        id: Uuid,
        prenom: Option<&str>,
        nom: Option<&str>,
        email: Option<&str>,
        password_hash: Option<&str>,
        role: Option<&[String]>,
        is_actif: Option<bool>,
    ) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                prenom = COALESCE($2, prenom),
                nom = COALESCE($3, nom),
                email = COALESCE($4, email),
                password_hash = COALESCE($5, password_hash),
                role = COALESCE($6, role),
                is_actif = COALESCE($7, is_actif),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(prenom)
        .bind(nom)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .bind(is_actif)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_email_conflict)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>("DELETE FROM users WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }
}
