use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use serenity::all::{Context, Reaction};

use crate::server::{
    error::AppError,
    model::{message::Message, user::User},
    service::{message::MessageService, user::UserService},
};

/// Resolves the mirrored message and reacting user of a reaction event.
///
/// # Returns
/// - `Ok(Some((message, user)))` - Both are known
/// - `Ok(None)` - The message is not mirrored or the user cannot be identified
async fn resolve(
    db: &DatabaseConnection,
    reaction: &Reaction,
) -> Result<Option<(Message, User)>, AppError> {
    let Some(message) = MessageService::new(db)
        .get_by_discord_id(reaction.message_id.get())
        .await?
    else {
        return Ok(None);
    };

    let user_service = UserService::new(db);
    let user = match (&reaction.member, reaction.user_id) {
        (Some(member), _) => Some(
            user_service
                .upsert_member(member.user.id.get(), member.display_name().to_string())
                .await?,
        ),
        (None, Some(user_id)) => user_service.get_by_discord_id(user_id.get()).await?,
        (None, None) => None,
    };

    Ok(user.map(|user| (message, user)))
}

/// Handle a reaction added to a mirrored message
pub async fn handle_reaction_add(db: &DatabaseConnection, _ctx: Context, reaction: Reaction) {
    let emoji = reaction.emoji.to_string();

    let result = match resolve(db, &reaction).await {
        Ok(Some((message, user))) => MessageService::new(db)
            .add_reaction(message.id, &emoji, user.id)
            .await
            .map(|_| ()),
        Ok(None) => Ok(()),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(
            "Failed to mirror reaction {} on message {}: {:?}",
            emoji,
            reaction.message_id,
            e
        );
    }
}

/// Handle a reaction removed from a mirrored message
pub async fn handle_reaction_remove(db: &DatabaseConnection, _ctx: Context, reaction: Reaction) {
    let emoji = reaction.emoji.to_string();

    let result = match resolve(db, &reaction).await {
        Ok(Some((message, user))) => MessageService::new(db)
            .remove_reaction(message.id, &emoji, user.id)
            .await
            .map(|_| ()),
        Ok(None) => Ok(()),
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::error!(
            "Failed to mirror reaction removal {} on message {}: {:?}",
            emoji,
            reaction.message_id,
            e
        );
    }
}
