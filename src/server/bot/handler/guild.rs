//! Guild event handler for Discord guild synchronization.
//!
//! `guild_create` fires on bot startup for each guild, when the bot joins a guild and
//! when a guild becomes available again after an outage. Each time, every role and
//! every member is mirrored so that changes missed while offline are picked up.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{Context, Guild, Member};

use crate::server::{bot::handler::member::mirror_member, service::role::RoleService};

/// Maximum number of members to fetch per API request.
///
/// Discord's API supports up to 1000 members per request.
static MEMBERS_PER_REQUEST: u64 = 1000;

/// Handles the guild_create event when a guild becomes available or the bot joins a new guild.
///
/// Roles are mirrored first so member role links can resolve. Members are fetched
/// page by page from the API (requires the `GUILD_MEMBERS` intent); if the API
/// refuses, the members cached on the guild payload are used instead.
///
/// The `@everyone` role is not mirrored since every member holds it implicitly.
///
/// # Arguments
/// - `db` - Database connection for storing guild data
/// - `ctx` - Discord context for making API requests
/// - `guild` - Guild data from Discord including roles and partial member list
/// - `_is_new` - Whether this is a new guild join (unused)
pub async fn handle_guild_create(
    db: &DatabaseConnection,
    ctx: Context,
    guild: Guild,
    _is_new: Option<bool>,
) {
    let guild_id = guild.id.get();

    tracing::debug!(
        "Guild create event: {} ({}) - member_count: {}",
        guild.name,
        guild_id,
        guild.member_count,
    );

    let role_service = RoleService::new(db);
    let mut mirrored_roles = 0;
    for role in guild.roles.values() {
        if role.id.get() == guild_id {
            continue;
        }

        match role_service.sync_discord_role(role).await {
            Ok(_) => mirrored_roles += 1,
            Err(e) => tracing::error!("Failed to mirror role {} ({}): {:?}", role.name, role.id, e),
        }
    }

    tracing::debug!("Mirrored {} roles for guild {}", mirrored_roles, guild_id);

    let members = match fetch_members(&ctx, guild_id).await {
        Ok(members) => members,
        Err(e) => {
            tracing::warn!(
                "Failed to fetch guild {} members from API, using cached members: {:?}",
                guild_id,
                e
            );
            guild.members.values().cloned().collect()
        }
    };

    let mut mirrored_members = 0;
    for member in &members {
        let role_ids: Vec<u64> = member.roles.iter().map(|id| id.get()).collect();

        match mirror_member(
            db,
            member.user.id.get(),
            member.display_name().to_string(),
            &role_ids,
        )
        .await
        {
            Ok(_) => mirrored_members += 1,
            Err(e) => tracing::error!("Failed to mirror member {}: {:?}", member.user.id, e),
        }
    }

    tracing::info!(
        "Synced guild {} ({}): {} roles, {} members",
        guild.name,
        guild_id,
        mirrored_roles,
        mirrored_members
    );
}

/// Fetches all guild members with pagination.
async fn fetch_members(ctx: &Context, guild_id: u64) -> Result<Vec<Member>, serenity::Error> {
    let mut all_members = Vec::new();
    let mut after: Option<u64> = None;

    loop {
        let members = ctx
            .http
            .get_guild_members(guild_id.into(), Some(MEMBERS_PER_REQUEST), after)
            .await?;

        let fetched_count = members.len();
        after = members.last().map(|m| m.user.id.get());
        all_members.extend(members);

        if fetched_count < MEMBERS_PER_REQUEST as usize {
            break;
        }
    }

    Ok(all_members)
}
