//! Role event handlers for Discord guild roles.
//!
//! Every Discord role is mirrored as a role record linked through its Discord id.
//! New roles receive the catalog permissions derived from their Discord bits. Updates
//! only refresh the name and color so that permissions edited on the dashboard stick.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildId, Role, RoleId};

use crate::server::service::role::RoleService;

/// Handles the guild_role_create event when a role is created in a guild.
///
/// # Arguments
/// - `db` - Database connection for creating the role record
/// - `_ctx` - Discord context (unused, required by event handler signature)
/// - `new` - The newly created role from Discord
pub async fn handle_guild_role_create(db: &DatabaseConnection, _ctx: Context, new: Role) {
    match RoleService::new(db).sync_discord_role(&new).await {
        Ok(role) => tracing::info!("Mirrored new role {} ({})", role.name, role.id),
        Err(e) => tracing::error!(
            "Failed to mirror new role {} in guild {}: {:?}",
            new.name,
            new.guild_id,
            e
        ),
    }
}

/// Handles the guild_role_update event when a role is updated in a guild.
pub async fn handle_guild_role_update(
    db: &DatabaseConnection,
    _ctx: Context,
    _old: Option<Role>,
    new: Role,
) {
    match RoleService::new(db).sync_discord_role(&new).await {
        Ok(role) => tracing::debug!("Refreshed role {} ({})", role.name, role.id),
        Err(e) => tracing::error!(
            "Failed to refresh role {} in guild {}: {:?}",
            new.name,
            new.guild_id,
            e
        ),
    }
}

/// Handles the guild_role_delete event when a role is deleted from a guild.
///
/// The mirrored role is removed together with every user link to it.
pub async fn handle_guild_role_delete(
    db: &DatabaseConnection,
    _ctx: Context,
    guild_id: GuildId,
    removed_role_id: RoleId,
    _removed_role_data_if_in_cache: Option<Role>,
) {
    match RoleService::new(db)
        .remove_discord_role(removed_role_id.get())
        .await
    {
        Ok(true) => tracing::info!("Removed role {} from guild {}", removed_role_id, guild_id),
        Ok(false) => tracing::debug!("Deleted role {} was not mirrored", removed_role_id),
        Err(e) => tracing::error!(
            "Failed to remove role {} from guild {}: {:?}",
            removed_role_id,
            guild_id,
            e
        ),
    }
}
