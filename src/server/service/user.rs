//! Users mirrored from guild members.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::server::{data::user::UserRepository, error::AppError, model::user::User};

pub struct UserService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a guild member, refreshing the display name if already known.
    pub async fn upsert_member(&self, discord_id: u64, name: String) -> Result<User, AppError> {
        let user = UserRepository::new(self.db).upsert(discord_id, name).await?;

        tracing::debug!("Upserted user {} ({})", user.name, user.id);

        Ok(user)
    }

    /// Gets a user by id.
    ///
    /// # Returns
    /// - `Ok(User)` - The user
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn get_user(&self, id: i32) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    /// Deactivates a user so their dashboard tokens stop authenticating.
    ///
    /// Role links and owned resources are kept. Deactivating twice is a no-op.
    ///
    /// # Returns
    /// - `Ok(User)` - The deactivated user
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn deactivate_user(&self, id: i32) -> Result<User, AppError> {
        let user = self.set_active(id, false).await?;

        tracing::info!("Deactivated user {} ({})", user.name, user.id);

        Ok(user)
    }

    /// Reactivates a previously deactivated user.
    ///
    /// # Returns
    /// - `Ok(User)` - The active user
    /// - `Err(AppError::NotFound)` - No user with that id
    pub async fn activate_user(&self, id: i32) -> Result<User, AppError> {
        let user = self.set_active(id, true).await?;

        tracing::info!("Activated user {} ({})", user.name, user.id);

        Ok(user)
    }

    async fn set_active(&self, id: i32, is_active: bool) -> Result<User, AppError> {
        UserRepository::new(self.db)
            .set_active(id, is_active)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))
    }

    pub async fn get_by_discord_id(&self, discord_id: u64) -> Result<Option<User>, AppError> {
        Ok(UserRepository::new(self.db)
            .find_by_discord_id(discord_id)
            .await?)
    }

    /// Gets every known user ordered by name.
    pub async fn get_all_users(&self) -> Result<Vec<User>, AppError> {
        Ok(UserRepository::new(self.db).get_all().await?)
    }
}
