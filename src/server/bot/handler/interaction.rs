//! Slash commands.
//!
//! - `/dashboard` replies with a bearer token for the HTTP API
//! - `/track-channel [private]` starts mirroring the current channel (`MANAGE_CHANNELS`)
//! - `/rsvp event status` records the caller's answer to an event
//!
//! Replies are ephemeral. Failures are translated with [`AppError::user_message`].

use dioxus_logger::tracing;
use serenity::all::{
    ChannelType, CommandDataOption, CommandInteraction, CommandOptionType, Context, CreateCommand,
    CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseMessage, Interaction,
};

use crate::server::{
    bot::handler::{member::mirror_member, Handler},
    error::{auth::AuthError, AppError},
    model::{
        channel::{ChannelKind, ChannelSettings, CreateChannelParams},
        event::ParticipantStatus,
        permission::Permission,
        user::User,
    },
    service::{
        auth::AuthService, channel::ChannelService, event::EventService,
        user_role::UserRoleService,
    },
};

/// Definitions registered with Discord on ready.
pub fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new("dashboard").description("Get a sign-in token for the dashboard"),
        CreateCommand::new("track-channel")
            .description("Mirror this channel on the dashboard")
            .add_option(
                CreateCommandOption::new(
                    CommandOptionType::Boolean,
                    "private",
                    "Restrict the channel to explicitly allowed roles and users",
                )
                .required(false),
            ),
        CreateCommand::new("rsvp")
            .description("Answer an event invitation")
            .add_option(
                CreateCommandOption::new(CommandOptionType::Integer, "event", "Event id")
                    .required(true),
            )
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, "status", "Your answer")
                    .required(true)
                    .add_string_choice("Attending", "attending")
                    .add_string_choice("Maybe", "maybe")
                    .add_string_choice("Not attending", "not_attending"),
            ),
    ]
}

/// Dispatches slash commands and replies with the outcome.
pub async fn handle_interaction(handler: &Handler, ctx: Context, interaction: Interaction) {
    let Interaction::Command(command) = interaction else {
        return;
    };

    let result = match command.data.name.as_str() {
        "dashboard" => dashboard(handler, &command).await,
        "track-channel" => track_channel(handler, &ctx, &command).await,
        "rsvp" => rsvp(handler, &command).await,
        other => {
            tracing::warn!("Received unknown command /{}", other);
            return;
        }
    };

    let content = match result {
        Ok(content) => {
            tracing::info!("Command /{} executed by {}", command.data.name, command.user.id);
            content
        }
        Err(e) => {
            tracing::warn!("Command /{} failed for {}: {}", command.data.name, command.user.id, e);
            e.user_message()
        }
    };

    let response = CreateInteractionResponse::Message(
        CreateInteractionResponseMessage::new()
            .content(content)
            .ephemeral(true),
    );

    if let Err(e) = command.create_response(&ctx.http, response).await {
        tracing::error!("Failed to reply to /{}: {:?}", command.data.name, e);
    }
}

/// Records the invoking member, refreshing their role links when invoked in a guild.
async fn invoker(handler: &Handler, command: &CommandInteraction) -> Result<User, AppError> {
    let member = command.member.as_deref();
    let name = member
        .map(|m| m.display_name().to_string())
        .unwrap_or_else(|| command.user.name.clone());
    let role_ids: Vec<u64> = member
        .map(|m| m.roles.iter().map(|id| id.get()).collect())
        .unwrap_or_default();

    mirror_member(&handler.db, command.user.id.get(), name, &role_ids).await
}

fn option<'a>(command: &'a CommandInteraction, name: &str) -> Option<&'a CommandDataOption> {
    command.data.options.iter().find(|o| o.name == name)
}

async fn dashboard(handler: &Handler, command: &CommandInteraction) -> Result<String, AppError> {
    let user = invoker(handler, command).await?;
    let token = AuthService::new(&handler.db, &handler.jwt)
        .issue_token(user.id)
        .await?;

    Ok(format!(
        "Dashboard: {}\nToken (valid for {} hours):\n```{}```",
        handler.app_url,
        handler.jwt.token_ttl.num_hours(),
        token
    ))
}

async fn track_channel(
    handler: &Handler,
    ctx: &Context,
    command: &CommandInteraction,
) -> Result<String, AppError> {
    let user = invoker(handler, command).await?;

    if !UserRoleService::new(&handler.db)
        .has_permission(user.id, Permission::ManageChannels)
        .await?
    {
        return Err(AuthError::AccessDenied(
            user.id,
            format!("missing {}", Permission::ManageChannels),
        )
        .into());
    }

    let Some(channel) = command.channel_id.to_channel(ctx).await?.guild() else {
        return Err(AppError::BadRequest(
            "Only guild channels can be tracked.".to_string(),
        ));
    };

    let kind = match channel.kind {
        ChannelType::Voice | ChannelType::Stage => ChannelKind::Voice,
        ChannelType::Category => ChannelKind::Category,
        ChannelType::News => ChannelKind::Announcement,
        _ => ChannelKind::Text,
    };

    let category = match channel.parent_id {
        Some(parent_id) => parent_id
            .to_channel(ctx)
            .await
            .ok()
            .and_then(|parent| parent.guild())
            .map(|parent| parent.name),
        None => None,
    };

    let is_private = option(command, "private")
        .and_then(|o| o.value.as_bool())
        .unwrap_or(false);

    let tracked = ChannelService::new(&handler.db)
        .create_channel(CreateChannelParams {
            discord_channel_id: channel.id.get(),
            name: channel.name.clone(),
            kind,
            category,
            topic: channel.topic.clone(),
            is_private,
            settings: ChannelSettings {
                nsfw: channel.nsfw,
                ..ChannelSettings::default()
            },
            created_by: user.id,
        })
        .await?;

    Ok(format!(
        "Now tracking #{}{}.",
        tracked.name,
        if tracked.is_private { " (private)" } else { "" }
    ))
}

async fn rsvp(handler: &Handler, command: &CommandInteraction) -> Result<String, AppError> {
    let event_id = option(command, "event")
        .and_then(|o| o.value.as_i64())
        .and_then(|id| i32::try_from(id).ok())
        .ok_or_else(|| AppError::BadRequest("Invalid event id.".to_string()))?;
    let status: ParticipantStatus = option(command, "status")
        .and_then(|o| o.value.as_str())
        .unwrap_or("attending")
        .parse()?;

    let user = invoker(handler, command).await?;
    let event = EventService::new(&handler.db)
        .add_participant(event_id, user.id, status, user.id)
        .await?;

    Ok(format!("Recorded {} for {}.", status, event.name))
}
