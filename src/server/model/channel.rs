//! Channel domain models and parameters.
//!
//! Channels mirror tracked Discord channels. Private channels are visible only through
//! their role and user allow-lists (see [`crate::server::model::access`]).

use chrono::{DateTime, Utc};
use sea_orm::DbErr;
use std::{collections::BTreeSet, fmt, str::FromStr};

use crate::{
    model::channel::{
        ChannelDto, ChannelSettingsDto, CreateChannelDto, UpdateChannelDto,
        UpdateChannelSettingsDto,
    },
    server::{
        error::AppError,
        model::access::{AccessScope, Restricted},
        util::parse::{parse_snowflake, parse_stored_snowflake},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Text,
    Voice,
    Category,
    Announcement,
}

impl ChannelKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ChannelKind::Text => "text",
            ChannelKind::Voice => "voice",
            ChannelKind::Category => "category",
            ChannelKind::Announcement => "announcement",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(ChannelKind::Text),
            "voice" => Ok(ChannelKind::Voice),
            "category" => Ok(ChannelKind::Category),
            "announcement" => Ok(ChannelKind::Announcement),
            other => Err(AppError::BadRequest(format!(
                "Unknown channel kind '{}'",
                other
            ))),
        }
    }
}

/// Per-channel moderation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelSettings {
    /// Seconds between messages per user, 0 disables slow mode.
    pub slow_mode: i32,
    pub nsfw: bool,
    /// Minutes of inactivity before threads archive.
    pub auto_archive_duration: i32,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            slow_mode: 0,
            nsfw: false,
            auto_archive_duration: 1440,
        }
    }
}

impl ChannelSettings {
    /// Merges the fields present in `patch`, keeping the rest.
    pub fn merge(&mut self, patch: UpdateChannelSettingsParams) {
        if let Some(slow_mode) = patch.slow_mode {
            self.slow_mode = slow_mode;
        }
        if let Some(nsfw) = patch.nsfw {
            self.nsfw = nsfw;
        }
        if let Some(auto_archive_duration) = patch.auto_archive_duration {
            self.auto_archive_duration = auto_archive_duration;
        }
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.slow_mode < 0 || self.auto_archive_duration < 0 {
            return Err(AppError::BadRequest(
                "Channel settings must not be negative".to_string(),
            ));
        }
        Ok(())
    }

    fn into_dto(self) -> ChannelSettingsDto {
        ChannelSettingsDto {
            slow_mode: self.slow_mode,
            nsfw: self.nsfw,
            auto_archive_duration: self.auto_archive_duration,
        }
    }
}

/// Tracked Discord channel with its visibility allow-lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: i32,
    pub discord_channel_id: u64,
    pub name: String,
    pub kind: ChannelKind,
    pub category: Option<String>,
    pub topic: Option<String>,
    pub is_private: bool,
    pub allowed_roles: BTreeSet<i32>,
    pub allowed_users: BTreeSet<i32>,
    pub settings: ChannelSettings,
    /// User who registered the channel.
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Channel {
    /// Converts a channel row and its allow-list rows to a domain model.
    ///
    /// # Returns
    /// - `Ok(Channel)` - Successfully converted domain model
    /// - `Err(DbErr::Custom)` - Stored snowflake or kind is invalid
    pub fn from_entity(
        entity: entity::channel::Model,
        allowed_roles: Vec<entity::channel_allowed_role::Model>,
        allowed_users: Vec<entity::channel_allowed_user::Model>,
    ) -> Result<Self, DbErr> {
        let discord_channel_id =
            parse_stored_snowflake(&entity.discord_channel_id, "discord_channel_id")?;
        let kind = entity
            .kind
            .parse::<ChannelKind>()
            .map_err(|e| DbErr::Custom(format!("Failed to parse channel kind: {}", e)))?;

        Ok(Self {
            id: entity.id,
            discord_channel_id,
            name: entity.name,
            kind,
            category: entity.category,
            topic: entity.topic,
            is_private: entity.is_private,
            allowed_roles: allowed_roles.into_iter().map(|row| row.role_id).collect(),
            allowed_users: allowed_users.into_iter().map(|row| row.user_id).collect(),
            settings: ChannelSettings {
                slow_mode: entity.slow_mode,
                nsfw: entity.nsfw,
                auto_archive_duration: entity.auto_archive_duration,
            },
            created_by: entity.created_by,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Adds a role to the allow-list. Returns whether the set changed.
    pub fn add_allowed_role(&mut self, role_id: i32) -> bool {
        self.allowed_roles.insert(role_id)
    }

    /// Removes a role from the allow-list. Returns whether the set changed.
    pub fn remove_allowed_role(&mut self, role_id: i32) -> bool {
        self.allowed_roles.remove(&role_id)
    }

    /// Adds a user to the allow-list. Returns whether the set changed.
    pub fn add_allowed_user(&mut self, user_id: i32) -> bool {
        self.allowed_users.insert(user_id)
    }

    /// Removes a user from the allow-list. Returns whether the set changed.
    pub fn remove_allowed_user(&mut self, user_id: i32) -> bool {
        self.allowed_users.remove(&user_id)
    }

    /// Overwrites every field present in `patch`.
    pub fn apply(&mut self, patch: UpdateChannelParams) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        if let Some(topic) = patch.topic {
            self.topic = Some(topic);
        }
        if let Some(is_private) = patch.is_private {
            self.is_private = is_private;
        }
    }

    pub fn into_dto(self) -> ChannelDto {
        ChannelDto {
            id: self.id,
            discord_channel_id: self.discord_channel_id.to_string(),
            name: self.name,
            kind: self.kind.as_str().to_string(),
            category: self.category,
            topic: self.topic,
            is_private: self.is_private,
            allowed_roles: self.allowed_roles.into_iter().collect(),
            allowed_users: self.allowed_users.into_iter().collect(),
            settings: self.settings.into_dto(),
            created_by: self.created_by,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Restricted for Channel {
    fn access_scope(&self) -> AccessScope {
        AccessScope {
            owner_id: self.created_by,
            is_private: self.is_private,
            allowed_users: self.allowed_users.clone(),
            allowed_roles: self.allowed_roles.clone(),
        }
    }
}

/// Parameters for registering a channel.
#[derive(Debug, Clone)]
pub struct CreateChannelParams {
    pub discord_channel_id: u64,
    pub name: String,
    pub kind: ChannelKind,
    pub category: Option<String>,
    pub topic: Option<String>,
    pub is_private: bool,
    pub settings: ChannelSettings,
    pub created_by: i32,
}

impl CreateChannelParams {
    pub fn from_dto(created_by: i32, dto: CreateChannelDto) -> Result<Self, AppError> {
        let settings = dto
            .settings
            .map(|s| ChannelSettings {
                slow_mode: s.slow_mode,
                nsfw: s.nsfw,
                auto_archive_duration: s.auto_archive_duration,
            })
            .unwrap_or_default();
        settings.validate()?;

        Ok(Self {
            discord_channel_id: parse_snowflake(&dto.discord_channel_id, "discord channel id")?,
            name: dto.name,
            kind: dto
                .kind
                .as_deref()
                .map(str::parse)
                .transpose()?
                .unwrap_or(ChannelKind::Text),
            category: dto.category,
            topic: dto.topic,
            is_private: dto.is_private,
            settings,
            created_by,
        })
    }
}

/// Shallow patch for a channel. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateChannelParams {
    pub name: Option<String>,
    pub kind: Option<ChannelKind>,
    pub category: Option<String>,
    pub topic: Option<String>,
    pub is_private: Option<bool>,
}

impl UpdateChannelParams {
    pub fn from_dto(dto: UpdateChannelDto) -> Result<Self, AppError> {
        Ok(Self {
            name: dto.name,
            kind: dto.kind.as_deref().map(str::parse).transpose()?,
            category: dto.category,
            topic: dto.topic,
            is_private: dto.is_private,
        })
    }
}

/// Per-field patch for channel settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateChannelSettingsParams {
    pub slow_mode: Option<i32>,
    pub nsfw: Option<bool>,
    pub auto_archive_duration: Option<i32>,
}

impl UpdateChannelSettingsParams {
    pub fn from_dto(dto: UpdateChannelSettingsDto) -> Result<Self, AppError> {
        let negative = dto.slow_mode.is_some_and(|v| v < 0)
            || dto.auto_archive_duration.is_some_and(|v| v < 0);
        if negative {
            return Err(AppError::BadRequest(
                "Channel settings must not be negative".to_string(),
            ));
        }

        Ok(Self {
            slow_mode: dto.slow_mode,
            nsfw: dto.nsfw,
            auto_archive_duration: dto.auto_archive_duration,
        })
    }
}
