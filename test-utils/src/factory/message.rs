//! Message factory for creating test message entities.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test messages in a channel.
///
/// # Example
///
/// ```rust,ignore
/// let message = MessageFactory::new(&db, channel.id, author.id)
///     .content("hello")
///     .pinned(true)
///     .build()
///     .await?;
/// ```
pub struct MessageFactory<'a> {
    db: &'a DatabaseConnection,
    channel_id: i32,
    author_id: i32,
    discord_message_id: String,
    content: String,
    is_pinned: bool,
    created_at: DateTime<Utc>,
}

impl<'a> MessageFactory<'a> {
    /// Creates a new MessageFactory with default values.
    ///
    /// Defaults: unpinned text message `"Message {id}"` created now.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `channel_id` - Local id of the channel the message belongs to
    /// - `author_id` - Local user id of the author
    ///
    /// # Returns
    /// - `MessageFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, channel_id: i32, author_id: i32) -> Self {
        let id = next_id();
        Self {
            db,
            channel_id,
            author_id,
            discord_message_id: (700_000_000 + id).to_string(),
            content: format!("Message {}", id),
            is_pinned: false,
            created_at: Utc::now(),
        }
    }

    /// Sets the Discord message ID.
    ///
    /// # Arguments
    /// - `discord_message_id` - Discord message ID as a numeric string
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn discord_message_id(mut self, discord_message_id: impl Into<String>) -> Self {
        self.discord_message_id = discord_message_id.into();
        self
    }

    /// Sets the message content.
    ///
    /// # Arguments
    /// - `content` - Message text
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets whether the message is pinned.
    ///
    /// # Arguments
    /// - `is_pinned` - Pin flag
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn pinned(mut self, is_pinned: bool) -> Self {
        self.is_pinned = is_pinned;
        self
    }

    /// Sets the creation timestamp.
    ///
    /// # Arguments
    /// - `created_at` - Creation time, used for newest-first ordering
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the message entity.
    pub async fn build(self) -> Result<entity::message::Model, DbErr> {
        entity::message::ActiveModel {
            discord_message_id: ActiveValue::Set(self.discord_message_id),
            channel_id: ActiveValue::Set(self.channel_id),
            author_id: ActiveValue::Set(self.author_id),
            content: ActiveValue::Set(self.content),
            kind: ActiveValue::Set("text".to_string()),
            is_edited: ActiveValue::Set(false),
            is_pinned: ActiveValue::Set(self.is_pinned),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a default message in `channel_id` written by `author_id`.
pub async fn create_message(
    db: &DatabaseConnection,
    channel_id: i32,
    author_id: i32,
) -> Result<entity::message::Model, DbErr> {
    MessageFactory::new(db, channel_id, author_id).build().await
}
