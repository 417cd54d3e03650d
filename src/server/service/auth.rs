//! Dashboard bearer tokens.
//!
//! Tokens are HS256 JWTs issued to a guild member through the `/dashboard` command and
//! presented on every API request. Role ids are embedded for display only; permission
//! checks always consult the current role links.

use chrono::Utc;
use dioxus_logger::tracing;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};

use crate::server::{
    data::{user::UserRepository, user_role::UserRoleRepository},
    error::{auth::AuthError, AppError},
    model::user::User,
    state::JwtConfig,
};

/// JWT claims carried by a dashboard token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Local user id.
    pub sub: i32,
    pub discord_id: String,
    /// Role ids held when the token was issued.
    pub roles: Vec<i32>,
    /// Issued at (Unix timestamp).
    pub iat: i64,
    /// Expiration time (Unix timestamp).
    pub exp: i64,
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    jwt: &'a JwtConfig,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a DatabaseConnection, jwt: &'a JwtConfig) -> Self {
        Self { db, jwt }
    }

    /// Issues a token for a user.
    ///
    /// # Returns
    /// - `Ok(String)` - Encoded token
    /// - `Err(AppError::NotFound)` - The user does not exist
    /// - `Err(AppError::AuthErr)` - The user is deactivated
    pub async fn issue_token(&self, user_id: i32) -> Result<String, AppError> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
        if !user.is_active {
            return Err(AuthError::UserInactive(user.id).into());
        }
        let roles = UserRoleRepository::new(self.db)
            .role_ids_for_user(user_id)
            .await?;

        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            discord_id: user.discord_id.to_string(),
            roles,
            iat: now.timestamp(),
            exp: (now + self.jwt.token_ttl).timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt.secret.as_bytes()),
        )
        .map_err(AuthError::from)?;

        tracing::info!("Issued dashboard token for user {}", user.id);

        Ok(token)
    }

    /// Validates signature and expiry of a token.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(data.claims)
    }

    /// Resolves a token to the user it was issued for.
    ///
    /// # Returns
    /// - `Ok(User)` - The authenticated user
    /// - `Err(AppError::AuthErr)` - Invalid token, or the user no longer exists or is
    ///   deactivated
    pub async fn authenticate(&self, token: &str) -> Result<User, AppError> {
        let claims = self.verify_token(token)?;

        let user = UserRepository::new(self.db)
            .find_by_id(claims.sub)
            .await?
            .ok_or(AuthError::UserNotInDatabase(claims.sub))?;
        if !user.is_active {
            return Err(AuthError::UserInactive(user.id).into());
        }

        Ok(user)
    }
}
