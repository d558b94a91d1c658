// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::UserRepository,
    models::auth::{Claims, CreateUserPayload, LoginResponse, Role, UpdateUserPayload, User},
};

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    jwt_secret: String,
    jwt_ttl_hours: i64,
}

impl AuthService {
    pub fn new(user_repo: UserRepository, jwt_secret: String, jwt_ttl_hours: i64) -> Self {
        Self { user_repo, jwt_secret, jwt_ttl_hours }
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<LoginResponse, AppError> {
        let user = self
            .user_repo
            .find_by_email(email.trim())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }

        // Senha certa mas conta desativada: 403, não 401
        if !user.is_actif {
            return Err(AppError::InactiveAccount);
        }

        let token = encode_token(&self.jwt_secret, &user, self.jwt_ttl_hours)?;
        tracing::info!("Connexion de {}", user.email);
        Ok(LoginResponse { id: user.id, token })
    }

    /// Valida o JWT e recarrega o usuário (o papel atual vem do banco, não do token).
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(&self.jwt_secret, token)?;

        let user = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::InvalidToken)?;

        if !user.is_actif {
            return Err(AppError::InactiveAccount);
        }
        Ok(user)
    }

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list().await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Utilisateur"))
    }

    pub async fn create_user(&self, payload: CreateUserPayload) -> Result<User, AppError> {
        let password_hash = hash_password(&payload.password).await?;
        let user = self
            .user_repo
            .create(
                payload.prenom.trim(),
                payload.nom.trim(),
                payload.email.trim(),
                &password_hash,
                &normalize_roles(&payload.role),
                payload.is_actif,
            )
            .await?;
        tracing::info!("Utilisateur créé: {}", user.email);
        Ok(user)
    }

    pub async fn update_user(&self, id: Uuid, payload: UpdateUserPayload) -> Result<User, AppError> {
        let password_hash = match &payload.password {
            Some(p) => Some(hash_password(p).await?),
            None => None,
        };
        let roles = payload.role.as_deref().map(normalize_roles);

        self.user_repo
            .update(
                id,
                payload.prenom.as_deref().map(str::trim),
                payload.nom.as_deref().map(str::trim),
                payload.email.as_deref().map(str::trim),
                password_hash.as_deref(),
                roles.as_deref(),
                payload.is_actif,
            )
            .await?
            .ok_or(AppError::NotFound("Utilisateur"))
    }

    pub async fn delete_user(&self, id: Uuid, current: &User) -> Result<User, AppError> {
        if id == current.id {
            return Err(AppError::Conflict(
                "Vous ne pouvez pas supprimer votre propre compte.".into(),
            ));
        }
        self.user_repo
            .delete(id)
            .await?
            .ok_or(AppError::NotFound("Utilisateur"))
    }

    /// Cria o administrador inicial quando a tabela está vazia.
    /// Devolve `true` se um usuário foi criado.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<bool, AppError> {
        if self.user_repo.count().await? > 0 {
            return Ok(false);
        }
        let password_hash = hash_password(password).await?;
        self.user_repo
            .create(
                "Admin",
                "CROUS",
                email.trim(),
                &password_hash,
                &[Role::Admin.as_str().to_string()],
                true,
            )
            .await?;
        tracing::info!("👤 Administrateur initial créé: {}", email);
        Ok(true)
    }
}

fn normalize_roles(roles: &[String]) -> Vec<String> {
    roles
        .iter()
        .filter_map(|r| Role::parse(r))
        .map(|r| r.as_str().to_string())
        .collect()
}

// bcrypt é CPU-bound: roda fora do executor assíncrono
async fn hash_password(password: &str) -> Result<String, AppError> {
    let password = password.to_owned();
    let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
    Ok(hashed)
}

async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AppError> {
    let password = password.to_owned();
    let password_hash = password_hash.to_owned();
    let valid = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
        .await
        .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
    Ok(valid)
}

pub(crate) fn encode_token(secret: &str, user: &User, ttl_hours: i64) -> Result<String, AppError> {
    let now = Utc::now();
    let expires_at = now + chrono::Duration::hours(ttl_hours);

    let claims = Claims {
        sub: user.id,
        role: user.effective_role().as_str().to_string(),
        exp: expires_at.timestamp() as usize,
        iat: now.timestamp() as usize,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

pub(crate) fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::InvalidToken)?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(roles: &[&str]) -> User {
        User {
            id: Uuid::new_v4(),
            prenom: "Awa".into(),
            nom: "Diatta".into(),
            email: "awa@crous.sn".into(),
            password_hash: String::new(),
            role: roles.iter().map(|r| r.to_string()).collect(),
            is_actif: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn token_carries_user_id_and_effective_role() {
        let u = user(&["manager", "admin"]);
        let token = encode_token("secret", &u, 1).unwrap();
        let claims = decode_token("secret", &token).unwrap();
        assert_eq!(claims.sub, u.id);
        assert_eq!(claims.role, "manager");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = encode_token("secret", &user(&["user"]), 1).unwrap();
        assert!(matches!(decode_token("other", &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = encode_token("secret", &user(&["admin"]), -2).unwrap();
        assert!(matches!(decode_token("secret", &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn roles_are_normalized_to_lowercase_known_values() {
        let roles = normalize_roles(&["Admin".into(), "bogus".into(), " user ".into()]);
        assert_eq!(roles, vec!["admin".to_string(), "user".to_string()]);
    }

    #[tokio::test]
    async fn password_hash_round_trip() {
        let hashed = hash_password("motdepasse").await.unwrap();
        assert!(verify_password("motdepasse", &hashed).await.unwrap());
        assert!(!verify_password("autre", &hashed).await.unwrap());
    }
}
