//! Top-level slash command dispatch

use anyhow::Result;
use log::{info, warn};
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use super::context::CommandContext;
use super::handlers::{HelpHandler, SleepHandler, WakeHandler};
use super::registry::CommandRegistry;

/// Routes incoming slash commands to their registered handlers
#[derive(Clone)]
pub struct CommandHandler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
}

impl CommandHandler {
    /// Build the dispatcher with all bot commands registered
    pub fn new(context: CommandContext) -> Self {
        let mut registry = CommandRegistry::new();
        registry.register(Arc::new(SleepHandler));
        registry.register(Arc::new(WakeHandler));
        registry.register(Arc::new(HelpHandler));

        CommandHandler {
            registry,
            context: Arc::new(context),
        }
    }

    /// Dispatch one slash command invocation
    ///
    /// Handlers convert every expected failure into a reply themselves;
    /// anything returned as `Err` here is unexpected and the caller replies
    /// with a generic apology.
    pub async fn handle_slash_command(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let name = command.data.name.as_str();

        info!(
            "[{request_id}] 📥 /{name} | User: {} | Channel: {}",
            command.user.id, command.channel_id
        );

        match self.registry.get(name) {
            Some(handler) => {
                handler
                    .handle(Arc::clone(&self.context), ctx, command)
                    .await?;
                info!("[{request_id}] ✅ /{name} completed");
                Ok(())
            }
            None => {
                warn!("[{request_id}] Unknown command /{name} - ignoring");
                Ok(())
            }
        }
    }
}
