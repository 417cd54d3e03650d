//! Role management and Discord role mirroring.

use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{role::RoleRepository, user_role::UserRoleRepository},
    error::AppError,
    model::{
        permission::Permission,
        role::{CreateRoleParams, Role, UpdateRoleParams},
    },
};

/// Highest counter appended when mirrored role names collide.
const MAX_NAME_SUFFIX: u32 = 100;

pub struct RoleService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RoleService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates a role.
    ///
    /// # Returns
    /// - `Ok(Role)` - The created role
    /// - `Err(AppError::BadRequest)` - The level is out of range
    /// - `Err(AppError::Duplicate)` - The name or Discord role is already taken
    pub async fn create_role(&self, params: CreateRoleParams) -> Result<Role, AppError> {
        params.validate()?;
        let repo = RoleRepository::new(self.db);

        if repo.find_by_name(&params.name).await?.is_some() {
            return Err(AppError::Duplicate(format!(
                "Role '{}' already exists",
                params.name
            )));
        }

        let role = repo.create(params).await.map_err(|e| {
            AppError::from_unique_violation(e, "A role is already bound to this Discord role")
        })?;

        tracing::info!("Created role {} ({})", role.name, role.id);

        Ok(role)
    }

    /// Gets a role by id.
    ///
    /// # Returns
    /// - `Ok(Role)` - The role
    /// - `Err(AppError::NotFound)` - No role with that id
    pub async fn get_role(&self, id: i32) -> Result<Role, AppError> {
        RoleRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Role {} not found", id)))
    }

    /// Gets every role ordered by level, then name.
    pub async fn get_all_roles(&self) -> Result<Vec<Role>, AppError> {
        Ok(RoleRepository::new(self.db).get_all().await?)
    }

    /// Applies a shallow patch to a role.
    ///
    /// # Returns
    /// - `Ok(Role)` - The updated role
    /// - `Err(AppError::NotFound)` - No role with that id
    /// - `Err(AppError::BadRequest)` - The new level is out of range
    /// - `Err(AppError::Duplicate)` - The new name or Discord role is taken by another role
    pub async fn update_role(&self, id: i32, patch: UpdateRoleParams) -> Result<Role, AppError> {
        patch.validate()?;
        let repo = RoleRepository::new(self.db);
        let mut role = self.get_role(id).await?;

        if let Some(name) = &patch.name {
            if let Some(existing) = repo.find_by_name(name).await? {
                if existing.id != id {
                    return Err(AppError::Duplicate(format!(
                        "Role '{}' already exists",
                        name
                    )));
                }
            }
        }

        role.apply(patch);

        let role = repo.save(&role).await.map_err(|e| {
            AppError::from_unique_violation(e, "A role is already bound to this Discord role")
        })?;

        tracing::info!("Updated role {} ({})", role.name, role.id);

        Ok(role)
    }

    /// Deletes a role nobody holds.
    ///
    /// # Returns
    /// - `Ok(())` - Role deleted
    /// - `Err(AppError::NotFound)` - No role with that id
    /// - `Err(AppError::Conflict)` - At least one user holds the role
    pub async fn delete_role(&self, id: i32) -> Result<(), AppError> {
        let role = self.get_role(id).await?;

        let holders = UserRoleRepository::new(self.db)
            .count_users_with_role(id)
            .await?;
        if holders > 0 {
            return Err(AppError::Conflict(format!(
                "Role '{}' is in use by {} user(s)",
                role.name, holders
            )));
        }

        RoleRepository::new(self.db).delete(id).await?;

        tracing::info!("Deleted role {} ({})", role.name, id);

        Ok(())
    }

    /// Grants a permission to a role. Granting a held permission changes nothing.
    pub async fn add_permission(&self, id: i32, permission: Permission) -> Result<Role, AppError> {
        let mut role = self.get_role(id).await?;

        if !role.add_permission(permission) {
            return Ok(role);
        }

        let role = RoleRepository::new(self.db).save(&role).await?;

        tracing::info!("Granted {} to role {} ({})", permission, role.name, id);

        Ok(role)
    }

    /// Revokes a permission from a role. Revoking a missing permission changes nothing.
    pub async fn remove_permission(
        &self,
        id: i32,
        permission: Permission,
    ) -> Result<Role, AppError> {
        let mut role = self.get_role(id).await?;

        if !role.remove_permission(permission) {
            return Ok(role);
        }

        let role = RoleRepository::new(self.db).save(&role).await?;

        tracing::info!("Revoked {} from role {} ({})", permission, role.name, id);

        Ok(role)
    }

    /// Mirrors a Discord guild role.
    ///
    /// New roles take their permissions from the Discord permission bits and start at
    /// level 0. Existing roles only get their name and color refreshed, so permissions
    /// edited through the dashboard are kept.
    pub async fn sync_discord_role(&self, discord_role: &serenity::all::Role) -> Result<Role, AppError> {
        let repo = RoleRepository::new(self.db);
        let discord_role_id = discord_role.id.get();
        let color = format!("#{}", discord_role.colour.hex());
        let name = self
            .available_name(&discord_role.name, discord_role_id)
            .await?;

        match repo.find_by_discord_id(discord_role_id).await? {
            Some(mut role) => {
                if role.name == name && role.color == color {
                    return Ok(role);
                }

                role.name = name;
                role.color = color;
                let role = repo.save(&role).await?;

                tracing::debug!("Refreshed mirrored role {} ({})", role.name, role.id);

                Ok(role)
            }
            None => {
                let mut params = CreateRoleParams::new(
                    name,
                    discord_role_id,
                    Permission::from_discord(discord_role.permissions),
                );
                params.color = color;

                let role = repo.create(params).await?;

                tracing::info!("Mirrored new role {} ({})", role.name, role.id);

                Ok(role)
            }
        }
    }

    /// Removes a mirrored role after unlinking every holder.
    ///
    /// # Returns
    /// - `Ok(true)` - The role existed and was removed
    /// - `Ok(false)` - No role is bound to that Discord role
    pub async fn remove_discord_role(&self, discord_role_id: u64) -> Result<bool, AppError> {
        let txn = self.db.begin().await?;

        let Some(role) = RoleRepository::new(&txn)
            .find_by_discord_id(discord_role_id)
            .await?
        else {
            return Ok(false);
        };

        let unlinked = UserRoleRepository::new(&txn).delete_by_role(role.id).await?;
        RoleRepository::new(&txn).delete(role.id).await?;

        txn.commit().await?;

        tracing::info!(
            "Removed mirrored role {} ({}), unlinked {} user(s)",
            role.name,
            role.id,
            unlinked
        );

        Ok(true)
    }

    /// Picks a unique local name for a mirrored role.
    ///
    /// Discord allows several roles with the same name. A clash with a role bound to a
    /// different Discord role is resolved by appending the Discord role id, then a counter
    /// until the name is free.
    ///
    /// # Returns
    /// - `Ok(String)` - A name that is free or already held by this Discord role
    /// - `Err(AppError::Duplicate)` - Every candidate up to [`MAX_NAME_SUFFIX`] is taken
    async fn available_name(&self, name: &str, discord_role_id: u64) -> Result<String, AppError> {
        let repo = RoleRepository::new(self.db);

        for attempt in 0..=MAX_NAME_SUFFIX {
            let candidate = match attempt {
                0 => name.to_string(),
                1 => format!("{} ({})", name, discord_role_id),
                n => format!("{} ({}) {}", name, discord_role_id, n),
            };

            match repo.find_by_name(&candidate).await? {
                Some(existing) if existing.discord_role_id != discord_role_id => continue,
                _ => return Ok(candidate),
            }
        }

        Err(AppError::Duplicate(format!(
            "No free name for Discord role {} ({})",
            name, discord_role_id
        )))
    }
}
