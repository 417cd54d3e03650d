//! Ready event handler for bot initialization.
//!
//! Fired once per gateway connection after the handshake. Registers the global slash
//! commands so Discord always carries the current definitions.

use dioxus_logger::tracing;
use serenity::all::{Command, Context, Ready};

use crate::server::bot::handler::interaction;

/// Handles the ready event when the bot connects to Discord.
///
/// # Arguments
/// - `ctx` - Discord context used to register slash commands
/// - `ready` - Ready event data containing bot user information
pub async fn handle_ready(ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    match Command::set_global_commands(&ctx.http, interaction::commands()).await {
        Ok(commands) => tracing::info!("Registered {} slash commands", commands.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {:?}", e),
    }
}
