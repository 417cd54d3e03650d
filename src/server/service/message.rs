//! Message history, reactions and pins for tracked channels.

use chrono::{DateTime, Utc};
use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{channel::ChannelRepository, message::MessageRepository, user::UserRepository},
    error::{auth::AuthError, AppError},
    model::{
        access::{can_access, require_owner},
        message::{CreateMessageParams, Message},
        permission::Permission,
    },
    service::{channel::ChannelService, user_role::UserRoleService},
};

/// Page size for channel history and search results.
pub const DEFAULT_MESSAGE_LIMIT: u64 = 50;

pub struct MessageService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> MessageService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a message posted in a tracked channel.
    ///
    /// # Returns
    /// - `Ok(Message)` - The recorded message
    /// - `Err(AppError::NotFound)` - The channel or author does not exist
    /// - `Err(AppError::Duplicate)` - The Discord message is already recorded
    pub async fn create_message(&self, params: CreateMessageParams) -> Result<Message, AppError> {
        if !ChannelRepository::new(self.db)
            .exists(params.channel_id)
            .await?
        {
            return Err(AppError::NotFound(format!(
                "Channel {} not found",
                params.channel_id
            )));
        }
        if !UserRepository::new(self.db).exists(params.author_id).await? {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                params.author_id
            )));
        }

        let message = MessageRepository::new(self.db)
            .create(params)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "Message is already recorded"))?;

        tracing::debug!(
            "Recorded message {} in channel {}",
            message.id,
            message.channel_id
        );

        Ok(message)
    }

    /// Gets a message by id.
    ///
    /// # Returns
    /// - `Ok(Message)` - The message with reactions and edit history
    /// - `Err(AppError::NotFound)` - No message with that id
    pub async fn get_message(&self, id: i32) -> Result<Message, AppError> {
        MessageRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Message {} not found", id)))
    }

    pub async fn get_by_discord_id(&self, discord_message_id: u64) -> Result<Option<Message>, AppError> {
        Ok(MessageRepository::new(self.db)
            .find_by_discord_id(discord_message_id)
            .await?)
    }

    /// Gets a page of channel history, newest first.
    pub async fn get_channel_messages(
        &self,
        channel_id: i32,
        limit: Option<u64>,
        before: Option<DateTime<Utc>>,
    ) -> Result<Vec<Message>, AppError> {
        Ok(MessageRepository::new(self.db)
            .get_by_channel(channel_id, limit.unwrap_or(DEFAULT_MESSAGE_LIMIT), before)
            .await?)
    }

    /// Gets the pinned messages of a channel, newest first.
    pub async fn get_pinned_messages(&self, channel_id: i32) -> Result<Vec<Message>, AppError> {
        Ok(MessageRepository::new(self.db).get_pinned(channel_id).await?)
    }

    /// Searches message content, optionally within one channel.
    ///
    /// # Returns
    /// - `Ok(Vec<Message>)` - Up to [`DEFAULT_MESSAGE_LIMIT`] matches, newest first
    /// - `Err(AppError::BadRequest)` - The query is blank
    pub async fn search_messages(
        &self,
        query: &str,
        channel_id: Option<i32>,
    ) -> Result<Vec<Message>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::BadRequest("Search query must not be empty".to_string()));
        }

        Ok(MessageRepository::new(self.db)
            .search(query, channel_id, DEFAULT_MESSAGE_LIMIT)
            .await?)
    }

    /// Searches message content in the channels `viewer_id` may see.
    ///
    /// Visibility is applied before the limit, so matches in hidden channels never
    /// take a slot.
    ///
    /// # Returns
    /// - `Ok(Vec<Message>)` - Up to [`DEFAULT_MESSAGE_LIMIT`] visible matches, newest first
    /// - `Err(AppError::BadRequest)` - The query is blank
    /// - `Err(AppError::NotFound)` - `channel_id` is missing or hidden from the viewer
    pub async fn search_visible_messages(
        &self,
        query: &str,
        channel_id: Option<i32>,
        viewer_id: i32,
    ) -> Result<Vec<Message>, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::BadRequest("Search query must not be empty".to_string()));
        }

        let channel_ids = match channel_id {
            Some(channel_id) => {
                ChannelService::new(self.db)
                    .get_visible_channel(channel_id, viewer_id)
                    .await?;
                vec![channel_id]
            }
            None => self.visible_channel_ids(viewer_id).await?,
        };

        Ok(MessageRepository::new(self.db)
            .search_in_channels(query, &channel_ids, DEFAULT_MESSAGE_LIMIT)
            .await?)
    }

    /// Gets a message whose channel `viewer_id` may see.
    ///
    /// Messages in hidden channels are reported as missing.
    ///
    /// # Returns
    /// - `Ok(Message)` - The visible message
    /// - `Err(AppError::NotFound)` - No such message, or its channel is hidden
    pub async fn get_visible_message(&self, id: i32, viewer_id: i32) -> Result<Message, AppError> {
        let message = self.get_message(id).await?;

        let granted = ChannelService::new(self.db)
            .check_user_access(message.channel_id, viewer_id)
            .await?;
        if !granted {
            return Err(AppError::NotFound(format!("Message {} not found", id)));
        }

        Ok(message)
    }

    async fn visible_channel_ids(&self, viewer_id: i32) -> Result<Vec<i32>, AppError> {
        let role_ids = UserRoleService::new(self.db)
            .get_user_role_ids(viewer_id)
            .await?;

        Ok(ChannelService::new(self.db)
            .get_all_channels()
            .await?
            .iter()
            .filter(|channel| can_access(*channel, viewer_id, &role_ids))
            .map(|channel| channel.id)
            .collect())
    }

    /// Replaces the content of a message on behalf of its author.
    ///
    /// The replaced content is appended to the edit history.
    ///
    /// # Returns
    /// - `Ok(Message)` - The edited message
    /// - `Err(AppError::NotFound)` - No message with that id
    /// - `Err(AppError::AuthErr)` - The caller is not the author
    pub async fn update_message(
        &self,
        id: i32,
        content: String,
        caller_id: i32,
    ) -> Result<Message, AppError> {
        let message = self.get_message(id).await?;
        require_owner(message.author_id, caller_id, "edit this message")?;

        self.apply_edit(message, content).await
    }

    /// Mirrors an edit made on Discord, where authorship is already enforced.
    ///
    /// # Returns
    /// - `Ok(Some(Message))` - The edited message
    /// - `Ok(None)` - The Discord message is not recorded
    pub async fn mirror_edit(
        &self,
        discord_message_id: u64,
        content: String,
    ) -> Result<Option<Message>, AppError> {
        let Some(message) = self.get_by_discord_id(discord_message_id).await? else {
            return Ok(None);
        };

        if message.content == content {
            return Ok(Some(message));
        }

        self.apply_edit(message, content).await.map(Some)
    }

    /// Deletes a message on behalf of its author.
    pub async fn delete_message(&self, id: i32, caller_id: i32) -> Result<(), AppError> {
        let message = self.get_message(id).await?;
        require_owner(message.author_id, caller_id, "delete this message")?;

        MessageRepository::new(self.db).delete(id).await?;

        tracing::info!("Deleted message {}", id);

        Ok(())
    }

    /// Drops the record of a message deleted on Discord.
    ///
    /// # Returns
    /// - `Ok(true)` - A record was removed
    /// - `Ok(false)` - The Discord message was not recorded
    pub async fn forget_message(&self, discord_message_id: u64) -> Result<bool, AppError> {
        let Some(message) = self.get_by_discord_id(discord_message_id).await? else {
            return Ok(false);
        };

        MessageRepository::new(self.db).delete(message.id).await?;

        tracing::debug!("Forgot message {}", message.id);

        Ok(true)
    }

    /// Adds a reaction. Reacting twice with the same emoji changes nothing.
    pub async fn add_reaction(
        &self,
        id: i32,
        emoji: &str,
        user_id: i32,
    ) -> Result<Message, AppError> {
        let mut message = self.get_message(id).await?;

        if !message.add_reaction(emoji, user_id) {
            return Ok(message);
        }

        let message = MessageRepository::new(self.db).save(&message).await?;

        tracing::debug!("User {} reacted {} to message {}", user_id, emoji, id);

        Ok(message)
    }

    /// Withdraws a reaction. Withdrawing a missing reaction changes nothing.
    pub async fn remove_reaction(
        &self,
        id: i32,
        emoji: &str,
        user_id: i32,
    ) -> Result<Message, AppError> {
        let mut message = self.get_message(id).await?;

        if !message.remove_reaction(emoji, user_id) {
            return Ok(message);
        }

        let message = MessageRepository::new(self.db).save(&message).await?;

        tracing::debug!("User {} withdrew {} from message {}", user_id, emoji, id);

        Ok(message)
    }

    /// Pins a message on behalf of a caller holding `MANAGE_MESSAGES`.
    pub async fn pin_message(&self, id: i32, caller_id: i32) -> Result<Message, AppError> {
        self.set_pinned(id, true, caller_id).await
    }

    pub async fn unpin_message(&self, id: i32, caller_id: i32) -> Result<Message, AppError> {
        self.set_pinned(id, false, caller_id).await
    }

    /// Pins or unpins a message. The caller needs `MANAGE_MESSAGES` and must see the channel.
    ///
    /// # Returns
    /// - `Ok(Message)` - The message after the change
    /// - `Err(AppError::NotFound)` - The message or caller does not exist, or the channel
    ///   is hidden from the caller
    /// - `Err(AppError::AuthErr)` - The caller lacks `MANAGE_MESSAGES`
    async fn set_pinned(
        &self,
        id: i32,
        pinned: bool,
        caller_id: i32,
    ) -> Result<Message, AppError> {
        let permitted = UserRoleService::new(self.db)
            .has_permission(caller_id, Permission::ManageMessages)
            .await?;
        if !permitted {
            return Err(AuthError::AccessDenied(
                caller_id,
                format!("missing {}", Permission::ManageMessages),
            )
            .into());
        }

        let mut message = self.get_visible_message(id, caller_id).await?;
        if message.is_pinned == pinned {
            return Ok(message);
        }

        message.is_pinned = pinned;
        let message = MessageRepository::new(self.db).save(&message).await?;

        tracing::info!(
            "Message {} {} by user {}",
            id,
            if pinned { "pinned" } else { "unpinned" },
            caller_id
        );

        Ok(message)
    }

    async fn apply_edit(&self, mut message: Message, content: String) -> Result<Message, AppError> {
        let edit = message.edit(content, Utc::now());

        let txn = self.db.begin().await?;
        let repo = MessageRepository::new(&txn);
        repo.append_edit(message.id, &edit).await?;
        let message = repo.save(&message).await?;
        txn.commit().await?;

        tracing::info!(
            "Message {} edited ({} prior version(s))",
            message.id,
            message.edit_history.len()
        );

        Ok(message)
    }
}
