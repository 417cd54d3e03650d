use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSettingsDto {
    pub slow_mode: i32,
    pub nsfw: bool,
    pub auto_archive_duration: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelDto {
    pub id: i32,
    pub discord_channel_id: String,
    pub name: String,
    pub kind: String,
    pub category: Option<String>,
    pub topic: Option<String>,
    pub is_private: bool,
    pub allowed_roles: Vec<i32>,
    pub allowed_users: Vec<i32>,
    pub settings: ChannelSettingsDto,
    pub created_by: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateChannelDto {
    pub discord_channel_id: String,
    pub name: String,
    pub kind: Option<String>,
    pub category: Option<String>,
    pub topic: Option<String>,
    #[serde(default)]
    pub is_private: bool,
    pub settings: Option<ChannelSettingsDto>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateChannelDto {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub category: Option<String>,
    pub topic: Option<String>,
    pub is_private: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateChannelSettingsDto {
    pub slow_mode: Option<i32>,
    pub nsfw: Option<bool>,
    pub auto_archive_duration: Option<i32>,
}
