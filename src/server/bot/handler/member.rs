use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{Context, GuildMemberUpdateEvent, Member};

use crate::server::{
    error::AppError,
    model::user::User,
    service::{user::UserService, user_role::UserRoleService},
};

/// Records a guild member and replaces their mirrored role links.
///
/// Roles created on the dashboard are left untouched; Discord roles that are not
/// mirrored yet are skipped.
///
/// # Arguments
/// - `db` - Database connection
/// - `discord_id` - Discord user id of the member
/// - `name` - Display name of the member
/// - `discord_role_ids` - Discord role ids the member currently holds
pub async fn mirror_member(
    db: &DatabaseConnection,
    discord_id: u64,
    name: String,
    discord_role_ids: &[u64],
) -> Result<User, AppError> {
    let user = UserService::new(db).upsert_member(discord_id, name).await?;

    UserRoleService::new(db)
        .sync_member_roles(user.id, discord_role_ids)
        .await?;

    Ok(user)
}

/// Handles the guild_member_addition event when a member joins a guild
pub async fn handle_guild_member_addition(db: &DatabaseConnection, _ctx: Context, new_member: Member) {
    let role_ids: Vec<u64> = new_member.roles.iter().map(|id| id.get()).collect();

    match mirror_member(
        db,
        new_member.user.id.get(),
        new_member.display_name().to_string(),
        &role_ids,
    )
    .await
    {
        Ok(user) => tracing::info!("Member {} joined guild {}", user.name, new_member.guild_id),
        Err(e) => tracing::error!("Failed to mirror new member {}: {:?}", new_member.user.id, e),
    }
}

/// Handles the guild_member_update event when a member is updated in a guild (roles, nickname, etc.)
pub async fn handle_guild_member_update(
    db: &DatabaseConnection,
    _ctx: Context,
    _old: Option<Member>,
    new: Option<Member>,
    event: GuildMemberUpdateEvent,
) {
    let name = new
        .as_ref()
        .map(|member| member.display_name().to_string())
        .or_else(|| event.nick.clone())
        .unwrap_or_else(|| event.user.name.clone());
    let role_ids: Vec<u64> = event.roles.iter().map(|id| id.get()).collect();

    if let Err(e) = mirror_member(db, event.user.id.get(), name, &role_ids).await {
        tracing::error!(
            "Failed to sync roles for member {} in guild {}: {:?}",
            event.user.id,
            event.guild_id,
            e
        );
    } else {
        tracing::debug!(
            "Synced {} role memberships for member {} in guild {}",
            role_ids.len(),
            event.user.id,
            event.guild_id
        );
    }
}
