//! Channel registry and visibility allow-lists.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{channel::ChannelRepository, role::RoleRepository, user::UserRepository},
    error::AppError,
    model::{
        access::can_access,
        channel::{Channel, CreateChannelParams, UpdateChannelParams, UpdateChannelSettingsParams},
    },
    service::user_role::UserRoleService,
};

pub struct ChannelService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ChannelService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Registers a Discord channel for tracking.
    ///
    /// # Returns
    /// - `Ok(Channel)` - The created channel
    /// - `Err(AppError::NotFound)` - The creating user does not exist
    /// - `Err(AppError::Duplicate)` - The Discord channel is already tracked
    pub async fn create_channel(&self, params: CreateChannelParams) -> Result<Channel, AppError> {
        let repo = ChannelRepository::new(self.db);

        if !UserRepository::new(self.db).exists(params.created_by).await? {
            return Err(AppError::NotFound(format!(
                "User {} not found",
                params.created_by
            )));
        }

        if repo
            .find_by_discord_id(params.discord_channel_id)
            .await?
            .is_some()
        {
            return Err(AppError::Duplicate(format!(
                "Channel {} is already tracked",
                params.discord_channel_id
            )));
        }

        let channel = repo
            .create(params)
            .await
            .map_err(|e| AppError::from_unique_violation(e, "Channel is already tracked"))?;

        tracing::info!("Created channel {} ({})", channel.name, channel.id);

        Ok(channel)
    }

    /// Gets a channel by id.
    ///
    /// # Returns
    /// - `Ok(Channel)` - The channel
    /// - `Err(AppError::NotFound)` - No channel with that id
    pub async fn get_channel(&self, id: i32) -> Result<Channel, AppError> {
        ChannelRepository::new(self.db)
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Channel {} not found", id)))
    }

    /// Gets the channel tracking a Discord channel, if any.
    pub async fn get_channel_by_discord_id(
        &self,
        discord_channel_id: u64,
    ) -> Result<Option<Channel>, AppError> {
        Ok(ChannelRepository::new(self.db)
            .find_by_discord_id(discord_channel_id)
            .await?)
    }

    /// Gets every channel ordered by category, then name.
    pub async fn get_all_channels(&self) -> Result<Vec<Channel>, AppError> {
        Ok(ChannelRepository::new(self.db).get_all().await?)
    }

    /// Gets the channels in a category, ordered by name.
    pub async fn get_channels_by_category(&self, category: &str) -> Result<Vec<Channel>, AppError> {
        Ok(ChannelRepository::new(self.db)
            .get_by_category(category)
            .await?)
    }

    /// Applies a shallow patch to a channel.
    pub async fn update_channel(
        &self,
        id: i32,
        patch: UpdateChannelParams,
    ) -> Result<Channel, AppError> {
        let mut channel = self.get_channel(id).await?;
        channel.apply(patch);

        let channel = ChannelRepository::new(self.db).save(&channel).await?;

        tracing::info!("Updated channel {} ({})", channel.name, id);

        Ok(channel)
    }

    /// Merges the given setting fields into the channel settings.
    pub async fn update_channel_settings(
        &self,
        id: i32,
        patch: UpdateChannelSettingsParams,
    ) -> Result<Channel, AppError> {
        let mut channel = self.get_channel(id).await?;
        channel.settings.merge(patch);

        let channel = ChannelRepository::new(self.db).save(&channel).await?;

        tracing::info!("Updated settings of channel {} ({})", channel.name, id);

        Ok(channel)
    }

    /// Stops tracking a channel. Its messages are removed with it.
    pub async fn delete_channel(&self, id: i32) -> Result<(), AppError> {
        if !ChannelRepository::new(self.db).delete(id).await? {
            return Err(AppError::NotFound(format!("Channel {} not found", id)));
        }

        tracing::info!("Deleted channel {}", id);

        Ok(())
    }

    /// Adds a role to the channel's allow-list. Adding a listed role changes nothing.
    ///
    /// # Returns
    /// - `Ok(Channel)` - The channel after the change
    /// - `Err(AppError::NotFound)` - The channel or role does not exist
    pub async fn add_allowed_role(&self, channel_id: i32, role_id: i32) -> Result<Channel, AppError> {
        let mut channel = self.get_channel(channel_id).await?;
        self.ensure_role(role_id).await?;

        if !channel.add_allowed_role(role_id) {
            return Ok(channel);
        }

        let channel = ChannelRepository::new(self.db).save(&channel).await?;

        tracing::info!("Allowed role {} in channel {}", role_id, channel_id);

        Ok(channel)
    }

    /// Removes a role from the channel's allow-list. Removing an unlisted role changes
    /// nothing.
    pub async fn remove_allowed_role(
        &self,
        channel_id: i32,
        role_id: i32,
    ) -> Result<Channel, AppError> {
        let mut channel = self.get_channel(channel_id).await?;
        self.ensure_role(role_id).await?;

        if !channel.remove_allowed_role(role_id) {
            return Ok(channel);
        }

        let channel = ChannelRepository::new(self.db).save(&channel).await?;

        tracing::info!("Disallowed role {} in channel {}", role_id, channel_id);

        Ok(channel)
    }

    /// Adds a user to the channel's allow-list. Adding a listed user changes nothing.
    pub async fn add_allowed_user(&self, channel_id: i32, user_id: i32) -> Result<Channel, AppError> {
        let mut channel = self.get_channel(channel_id).await?;
        self.ensure_user(user_id).await?;

        if !channel.add_allowed_user(user_id) {
            return Ok(channel);
        }

        let channel = ChannelRepository::new(self.db).save(&channel).await?;

        tracing::info!("Allowed user {} in channel {}", user_id, channel_id);

        Ok(channel)
    }

    /// Removes a user from the channel's allow-list. Removing an unlisted user changes
    /// nothing.
    pub async fn remove_allowed_user(
        &self,
        channel_id: i32,
        user_id: i32,
    ) -> Result<Channel, AppError> {
        let mut channel = self.get_channel(channel_id).await?;
        self.ensure_user(user_id).await?;

        if !channel.remove_allowed_user(user_id) {
            return Ok(channel);
        }

        let channel = ChannelRepository::new(self.db).save(&channel).await?;

        tracing::info!("Disallowed user {} in channel {}", user_id, channel_id);

        Ok(channel)
    }

    /// Evaluates whether a user may see a channel.
    ///
    /// # Returns
    /// - `Ok(bool)` - Result of the visibility check
    /// - `Err(AppError::NotFound)` - The channel or user does not exist
    pub async fn check_user_access(&self, channel_id: i32, user_id: i32) -> Result<bool, AppError> {
        let channel = self.get_channel(channel_id).await?;
        self.ensure_user(user_id).await?;

        let role_ids = UserRoleService::new(self.db)
            .get_user_role_ids(user_id)
            .await?;

        let granted = can_access(&channel, user_id, &role_ids);

        tracing::debug!(
            "Access to channel {} for user {}: {}",
            channel_id,
            user_id,
            granted
        );

        Ok(granted)
    }

    /// Fails with `NotFound` unless the user may see the channel.
    ///
    /// Hidden channels are reported as missing so their existence is not revealed.
    pub async fn get_visible_channel(&self, channel_id: i32, user_id: i32) -> Result<Channel, AppError> {
        if !self.check_user_access(channel_id, user_id).await? {
            return Err(AppError::NotFound(format!("Channel {} not found", channel_id)));
        }

        self.get_channel(channel_id).await
    }

    async fn ensure_role(&self, role_id: i32) -> Result<(), AppError> {
        if !RoleRepository::new(self.db).exists(role_id).await? {
            return Err(AppError::NotFound(format!("Role {} not found", role_id)));
        }

        Ok(())
    }

    async fn ensure_user(&self, user_id: i32) -> Result<(), AppError> {
        if !UserRepository::new(self.db).exists(user_id).await? {
            return Err(AppError::NotFound(format!("User {} not found", user_id)));
        }

        Ok(())
    }
}
