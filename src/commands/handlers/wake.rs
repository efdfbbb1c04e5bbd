//! Wake-up command handler
//!
//! Handles: good_morning

use anyhow::Result;
use async_trait::async_trait;
use log::{error, info};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::respond;
use crate::features::voice::{self, VoiceError};

/// Handler for /good_morning - lift the requester's server mute
///
/// Independent of the timer store by design: waking up never consults or
/// clears a scheduled timer.
pub struct WakeHandler;

#[async_trait]
impl SlashCommandHandler for WakeHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["good_morning"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let user_id = command.user.id;

        let reply = match voice::connected_channel(serenity_ctx, ctx.guild_id, user_id) {
            Ok(_) => {
                match voice::set_server_mute(&serenity_ctx.http, ctx.guild_id, user_id, false)
                    .await
                {
                    Ok(()) => {
                        info!("Unmuted user {user_id} via /good_morning");
                        "☀️ Good morning! You're unmuted - welcome back!".to_string()
                    }
                    Err(e) => {
                        error!("Failed to unmute user {user_id}: {e}");
                        "❌ I couldn't lift your mute. Please try again in a moment.".to_string()
                    }
                }
            }
            Err(VoiceError::NotInVoice) => {
                "❌ You're not in a voice channel, so there's nothing to unmute.".to_string()
            }
            Err(VoiceError::GuildUnavailable) => {
                "❌ I can't find the configured server right now.".to_string()
            }
        };

        respond(serenity_ctx, command, reply).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wake_handler_commands() {
        let handler = WakeHandler;
        assert_eq!(handler.command_names(), &["good_morning"]);
    }
}
