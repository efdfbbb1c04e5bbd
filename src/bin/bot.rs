use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::{GuildId, RoleId};
use serenity::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use oyasumi::commands::{register_guild_commands, CommandContext, CommandHandler};
use oyasumi::core::Config;
use oyasumi::features::sleep::{SleepSweeper, TimerStore};

struct Handler {
    command_handler: Arc<CommandHandler>,
    timers: TimerStore,
    guild_id: GuildId,
    sweeper_started: AtomicBool,
}

impl Handler {
    fn new(command_handler: CommandHandler, timers: TimerStore, guild_id: GuildId) -> Self {
        Handler {
            command_handler: Arc::new(command_handler),
            timers,
            guild_id,
            sweeper_started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());

        if let Err(e) = register_guild_commands(&ctx, self.guild_id).await {
            error!("❌ Failed to register guild slash commands: {e}");
        } else {
            info!(
                "✅ Successfully registered slash commands for guild {} (instant update)",
                self.guild_id
            );
        }

        // Ready fires again on gateway reconnect; the sweeper must only
        // ever be spawned once.
        if !self.sweeper_started.swap(true, Ordering::SeqCst) {
            let sweeper = SleepSweeper::new(self.timers.clone(), self.guild_id);
            tokio::spawn(async move {
                sweeper.run(ctx).await;
            });
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                if let Err(e) = self
                    .command_handler
                    .handle_slash_command(&ctx, &command)
                    .await
                {
                    error!(
                        "Error handling slash command '{}': {}",
                        command.data.name, e
                    );

                    let _ = command
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| {
                                    message.content(
                                        "❌ Sorry, I encountered an error processing your command. Please try again.",
                                    )
                                })
                        })
                        .await;
                }
            }
            Interaction::Ping(_) => {
                info!("Ping interaction received - Discord health check");
            }
            _ => {}
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Oyasumi sleep-timer bot...");

    let guild_id = GuildId(config.guild_id);
    let timers = TimerStore::new();

    let command_handler = CommandHandler::new(CommandContext::new(
        timers.clone(),
        guild_id,
        RoleId(config.admin_role_id),
    ));

    let handler = Handler::new(command_handler, timers, guild_id);

    // GUILD_VOICE_STATES keeps the cached voice map current; GUILD_MEMBERS
    // lets the mute edits resolve members.
    let intents =
        GatewayIntents::GUILDS | GatewayIntents::GUILD_MEMBERS | GatewayIntents::GUILD_VOICE_STATES;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        error!("This could be due to:");
        error!("  - Invalid bot token");
        error!("  - Network connectivity issues");
        error!("  - Missing required permissions");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
