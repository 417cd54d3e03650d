//! SeaORM entity models for the guildwarden database.
//!
//! One module per table. Discord snowflakes are stored as strings and parsed into `u64`
//! by the repositories that consume these models.

pub mod prelude;

pub mod channel;
pub mod channel_allowed_role;
pub mod channel_allowed_user;
pub mod event;
pub mod event_participant;
pub mod message;
pub mod message_edit;
pub mod message_reaction;
pub mod role;
pub mod role_permission;
pub mod user;
pub mod user_role;
