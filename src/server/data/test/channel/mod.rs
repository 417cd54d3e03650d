use crate::server::{
    data::channel::ChannelRepository,
    model::channel::{ChannelKind, ChannelSettings, CreateChannelParams},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod get_all;
mod save;

fn params(created_by: i32, discord_channel_id: u64, name: &str) -> CreateChannelParams {
    CreateChannelParams {
        discord_channel_id,
        name: name.to_string(),
        kind: ChannelKind::Text,
        category: None,
        topic: None,
        is_private: false,
        settings: ChannelSettings::default(),
        created_by,
    }
}
