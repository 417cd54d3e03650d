//! Discord bot integration mirroring guild state into the RBAC store.
//!
//! The bot keeps roles, members and tracked channels in sync with Discord and offers
//! slash commands that act on the same services as the HTTP API. It runs in its own
//! tokio task next to the HTTP server.
//!
//! # Gateway Intents
//!
//! - `GUILDS` - Guild availability and role events
//! - `GUILD_MEMBERS` - Member updates (privileged intent)
//! - `GUILD_MESSAGES` and `MESSAGE_CONTENT` - Message mirroring for tracked channels
//! - `GUILD_MESSAGE_REACTIONS` - Reaction mirroring
//!
//! `GUILD_MEMBERS` and `MESSAGE_CONTENT` are privileged and must be enabled in the
//! Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
