//! Message mirroring for tracked channels.
//!
//! Only channels registered through `/track-channel` or the API are mirrored. Authors
//! are recorded as users on first sight.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{
    ChannelId, Context, GuildId, Message, MessageId, MessageType, MessageUpdateEvent,
};

use crate::server::{
    error::AppError,
    model::message::{CreateMessageParams, MessageKind},
    service::{channel::ChannelService, message::MessageService, user::UserService},
};

fn message_kind(message: &Message) -> MessageKind {
    match message.kind {
        MessageType::ChatInputCommand | MessageType::ContextMenuCommand => MessageKind::Command,
        MessageType::Regular | MessageType::InlineReply if !message.embeds.is_empty() => {
            MessageKind::Embed
        }
        MessageType::Regular | MessageType::InlineReply => MessageKind::Text,
        _ => MessageKind::System,
    }
}

async fn mirror_message(db: &DatabaseConnection, message: &Message) -> Result<bool, AppError> {
    let Some(channel) = ChannelService::new(db)
        .get_channel_by_discord_id(message.channel_id.get())
        .await?
    else {
        return Ok(false);
    };

    let author = UserService::new(db)
        .upsert_member(message.author.id.get(), message.author.name.clone())
        .await?;

    MessageService::new(db)
        .create_message(CreateMessageParams {
            discord_message_id: message.id.get(),
            channel_id: channel.id,
            author_id: author.id,
            content: message.content.clone(),
            kind: message_kind(message),
            created_at: message.timestamp.to_utc(),
        })
        .await?;

    Ok(true)
}

/// Handle message creation in a channel
pub async fn handle_message(db: &DatabaseConnection, _ctx: Context, message: Message) {
    // Only track messages in guild channels (not DMs)
    if message.guild_id.is_none() {
        return;
    }

    match mirror_message(db, &message).await {
        Ok(true) => tracing::debug!(
            "Mirrored message {} in channel {}",
            message.id,
            message.channel_id
        ),
        Ok(false) => {}
        Err(e) => tracing::error!("Failed to mirror message {}: {:?}", message.id, e),
    }
}

/// Handle message edits, appending the previous content to the edit history
pub async fn handle_message_update(
    db: &DatabaseConnection,
    _ctx: Context,
    _old: Option<Message>,
    _new: Option<Message>,
    event: MessageUpdateEvent,
) {
    // Embed-only updates carry no content
    let Some(content) = event.content else {
        return;
    };

    match MessageService::new(db)
        .mirror_edit(event.id.get(), content)
        .await
    {
        Ok(Some(message)) => tracing::debug!("Mirrored edit of message {}", message.id),
        Ok(None) => {}
        Err(e) => tracing::error!("Failed to mirror edit of message {}: {:?}", event.id, e),
    }
}

/// Handle message deletion
pub async fn handle_message_delete(
    db: &DatabaseConnection,
    _ctx: Context,
    channel_id: ChannelId,
    deleted_message_id: MessageId,
    _guild_id: Option<GuildId>,
) {
    if let Err(e) = MessageService::new(db)
        .forget_message(deleted_message_id.get())
        .await
    {
        tracing::error!(
            "Failed to forget message {} in channel {}: {:?}",
            deleted_message_id,
            channel_id,
            e
        );
    }
}
