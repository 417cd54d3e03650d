//! Channel factory for creating test channel entities.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test channels owned by a given user.
///
/// # Example
///
/// ```rust,ignore
/// let channel = ChannelFactory::new(&db, user.id)
///     .name("staff")
///     .private(true)
///     .build()
///     .await?;
/// ```
pub struct ChannelFactory<'a> {
    db: &'a DatabaseConnection,
    created_by: i32,
    discord_channel_id: String,
    name: String,
    kind: String,
    category: Option<String>,
    is_private: bool,
}

impl<'a> ChannelFactory<'a> {
    /// Creates a new ChannelFactory with default values.
    ///
    /// Defaults: public text channel named `"channel-{id}"` with no category.
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    /// - `created_by` - Local user id of the channel creator
    ///
    /// # Returns
    /// - `ChannelFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection, created_by: i32) -> Self {
        let id = next_id();
        Self {
            db,
            created_by,
            discord_channel_id: (500_000_000 + id).to_string(),
            name: format!("channel-{}", id),
            kind: "text".to_string(),
            category: None,
            is_private: false,
        }
    }

    /// Sets the Discord channel ID.
    ///
    /// # Arguments
    /// - `discord_channel_id` - Discord channel ID as a numeric string
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn discord_channel_id(mut self, discord_channel_id: impl Into<String>) -> Self {
        self.discord_channel_id = discord_channel_id.into();
        self
    }

    /// Sets the channel name.
    ///
    /// # Arguments
    /// - `name` - Channel name
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the channel kind.
    ///
    /// # Arguments
    /// - `kind` - Stored kind, e.g. `"text"` or `"voice"`
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Sets the category name.
    ///
    /// # Arguments
    /// - `category` - Category the channel is grouped under
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Marks the channel as private.
    ///
    /// # Arguments
    /// - `is_private` - `true` to restrict the channel to its allow-lists
    ///
    /// # Returns
    /// - `Self` - Factory instance for method chaining
    pub fn private(mut self, is_private: bool) -> Self {
        self.is_private = is_private;
        self
    }

    /// Builds and inserts the channel entity.
    pub async fn build(self) -> Result<entity::channel::Model, DbErr> {
        let now = Utc::now();
        entity::channel::ActiveModel {
            discord_channel_id: ActiveValue::Set(self.discord_channel_id),
            name: ActiveValue::Set(self.name),
            kind: ActiveValue::Set(self.kind),
            category: ActiveValue::Set(self.category),
            topic: ActiveValue::Set(None),
            is_private: ActiveValue::Set(self.is_private),
            slow_mode: ActiveValue::Set(0),
            nsfw: ActiveValue::Set(false),
            auto_archive_duration: ActiveValue::Set(1440),
            created_by: ActiveValue::Set(self.created_by),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a public text channel owned by `created_by`.
pub async fn create_channel(
    db: &DatabaseConnection,
    created_by: i32,
) -> Result<entity::channel::Model, DbErr> {
    ChannelFactory::new(db, created_by).build().await
}
