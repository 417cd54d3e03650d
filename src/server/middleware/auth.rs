use axum::http::{header::AUTHORIZATION, HeaderMap};
use sea_orm::DatabaseConnection;

use crate::server::{
    error::{auth::AuthError, AppError},
    model::{permission::Permission, user::User},
    service::{auth::AuthService, user_role::UserRoleService},
    state::JwtConfig,
};

/// Authenticates a request from its bearer token and enforces catalog permissions.
pub struct AuthGuard<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtConfig,
    headers: &'a HeaderMap,
}

impl<'a> AuthGuard<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtConfig, headers: &'a HeaderMap) -> Self {
        Self { db, jwt, headers }
    }

    /// Resolves the caller and checks that they hold every permission in `permissions`.
    ///
    /// # Returns
    /// - `Ok(User)` - The authenticated caller
    /// - `Err(AppError::AuthErr(MissingToken | InvalidToken | UserNotInDatabase | UserInactive))` - 401
    /// - `Err(AppError::AuthErr(AccessDenied))` - A required permission is missing
    pub async fn require(&self, permissions: &[Permission]) -> Result<User, AppError> {
        let token = bearer_token(self.headers).ok_or(AuthError::MissingToken)?;

        let user = AuthService::new(self.db, self.jwt)
            .authenticate(token)
            .await?;

        let user_roles = UserRoleService::new(self.db);
        for permission in permissions {
            if !user_roles.has_permission(user.id, *permission).await? {
                return Err(AuthError::AccessDenied(
                    user.id,
                    format!("missing {}", permission),
                )
                .into());
            }
        }

        Ok(user)
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
