// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, middleware::auth::AuthenticatedUser, models::auth::Role};

/// Conjunto de papéis aceitos por uma rota.
pub trait RoleDef: Send + Sync + 'static {
    fn allowed() -> &'static [Role];
}

/// Gestão de contas de usuário.
pub struct AdminOnly;

impl RoleDef for AdminOnly {
    fn allowed() -> &'static [Role] {
        &[Role::Admin]
    }
}

/// Escrita na estrutura (anos, campus, pavillons, chambres, catálogo) e exclusões.
pub struct Gestion;

impl RoleDef for Gestion {
    fn allowed() -> &'static [Role] {
        &[Role::Admin, Role::Manager]
    }
}

pub fn role_allows(role: Role, allowed: &[Role]) -> bool {
    allowed.contains(&role)
}

/// Guardião: rejeita com 403 quando o papel efetivo não está em `T::allowed()`.
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or(AppError::InvalidToken)?;

        let role = user.0.effective_role();
        if !role_allows(role, T::allowed()) {
            tracing::warn!("Accès refusé à {} (rôle {})", user.0.email, role.as_str());
            return Err(AppError::Forbidden);
        }

        Ok(RequireRole(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_only_excludes_manager() {
        assert!(role_allows(Role::Admin, AdminOnly::allowed()));
        assert!(!role_allows(Role::Manager, AdminOnly::allowed()));
        assert!(!role_allows(Role::User, AdminOnly::allowed()));
    }

    #[test]
    fn gestion_is_admin_or_manager() {
        assert!(role_allows(Role::Admin, Gestion::allowed()));
        assert!(role_allows(Role::Manager, Gestion::allowed()));
        assert!(!role_allows(Role::User, Gestion::allowed()));
    }
}
