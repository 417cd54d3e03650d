//! User-role assignment and permission resolution.
//!
//! A user's effective permissions are the union of the permissions of every role they
//! hold. Role `level` never participates in permission checks.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{role::RoleRepository, user::UserRepository, user_role::UserRoleRepository},
    error::AppError,
    model::{permission::Permission, role::Role},
};

pub struct UserRoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRoleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Links a user to a role. Assigning a held role changes nothing.
    ///
    /// # Returns
    /// - `Ok(())` - The user holds the role
    /// - `Err(AppError::NotFound)` - The user or role does not exist
    pub async fn assign_role_to_user(&self, user_id: i32, role_id: i32) -> Result<(), AppError> {
        self.ensure_user(user_id).await?;

        if !RoleRepository::new(self.db).exists(role_id).await? {
            return Err(AppError::NotFound(format!("Role {} not found", role_id)));
        }

        UserRoleRepository::new(self.db)
            .create(user_id, role_id)
            .await?;

        tracing::info!("Assigned role {} to user {}", role_id, user_id);

        Ok(())
    }

    /// Unlinks a user from a role. Removing a role the user lacks is not an error.
    ///
    /// # Returns
    /// - `Ok(true)` - A link was removed
    /// - `Ok(false)` - The user did not hold the role
    pub async fn remove_role_from_user(&self, user_id: i32, role_id: i32) -> Result<bool, AppError> {
        let removed = UserRoleRepository::new(self.db)
            .delete(user_id, role_id)
            .await?;

        if removed {
            tracing::info!("Removed role {} from user {}", role_id, user_id);
        }

        Ok(removed)
    }

    /// Gets the roles a user holds, ordered by level then name.
    ///
    /// Links pointing at roles that no longer exist are skipped.
    ///
    /// # Returns
    /// - `Ok(Vec<Role>)` - The user's roles
    /// - `Err(AppError::NotFound)` - The user does not exist
    pub async fn get_user_roles(&self, user_id: i32) -> Result<Vec<Role>, AppError> {
        self.ensure_user(user_id).await?;

        let role_ids = self.get_user_role_ids(user_id).await?;

        Ok(RoleRepository::new(self.db).find_by_ids(&role_ids).await?)
    }

    /// Gets the raw ids of the roles linked to a user, for visibility checks.
    pub async fn get_user_role_ids(&self, user_id: i32) -> Result<Vec<i32>, AppError> {
        Ok(UserRoleRepository::new(self.db)
            .role_ids_for_user(user_id)
            .await?)
    }

    /// Whether any role held by the user grants `permission`.
    ///
    /// # Returns
    /// - `Ok(bool)` - Result of the check
    /// - `Err(AppError::NotFound)` - The user does not exist
    pub async fn has_permission(
        &self,
        user_id: i32,
        permission: Permission,
    ) -> Result<bool, AppError> {
        let roles = self.get_user_roles(user_id).await?;

        Ok(roles.iter().any(|role| role.has_permission(permission)))
    }

    /// Replaces a member's role links with the mirrored roles matching `discord_role_ids`.
    ///
    /// Discord roles that have not been mirrored are ignored.
    pub async fn sync_member_roles(
        &self,
        user_id: i32,
        discord_role_ids: &[u64],
    ) -> Result<Vec<Role>, AppError> {
        self.ensure_user(user_id).await?;

        let roles = RoleRepository::new(self.db)
            .find_by_discord_ids(discord_role_ids)
            .await?;
        let role_ids: Vec<i32> = roles.iter().map(|role| role.id).collect();

        UserRoleRepository::new(self.db)
            .sync(user_id, &role_ids)
            .await?;

        tracing::debug!("Synced {} role(s) for user {}", role_ids.len(), user_id);

        Ok(roles)
    }

    async fn ensure_user(&self, user_id: i32) -> Result<(), AppError> {
        if !UserRepository::new(self.db).exists(user_id).await? {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        Ok(())
    }
}
