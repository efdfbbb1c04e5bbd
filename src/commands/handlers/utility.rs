//! Utility command handlers
//!
//! Handles: help

use anyhow::Result;
use async_trait::async_trait;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::respond;

/// Handler for /help
pub struct HelpHandler;

#[async_trait]
impl SlashCommandHandler for HelpHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["help"]
    }

    async fn handle(
        &self,
        _ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let help_text = r#"**Available Slash Commands:**
`/set_sleep <time> [user]` - Set a sleep timer (24-hour `HH:MM`, Japan time). When it fires you get server-muted so you can actually sleep.
`/good_morning` - Wake up! Lifts your server mute while you're in voice.
`/not_set_time [user]` - Cancel a sleep timer.
`/set_time_now` - Show your current sleep timer.
`/set_time_past` - Show the last timer you set (same as above - fired timers leave no trace).
`/help` - Show this help message.

Setting or cancelling a timer for *someone else* needs the admin role.
Timers live in memory only: if I restart, they're gone."#;

        respond(serenity_ctx, command, help_text).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_handler_commands() {
        let handler = HelpHandler;
        assert_eq!(handler.command_names(), &["help"]);
    }
}
