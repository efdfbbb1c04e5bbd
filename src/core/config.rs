//! Environment-based configuration
//!
//! All settings come from the process environment (a `.env` file is loaded
//! by the binary before this runs). The bot serves exactly one guild, so the
//! guild and admin-role ids are required up front.

use anyhow::{Context, Result};

/// Runtime configuration for the bot
#[derive(Debug, Clone)]
pub struct Config {
    /// Discord bot token
    pub discord_token: String,
    /// The single guild this bot serves
    pub guild_id: u64,
    /// Role allowed to set/cancel timers for other users
    pub admin_role_id: u64,
    /// Default log filter (overridable via RUST_LOG)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Required: `DISCORD_TOKEN`, `GUILD_ID`, `ADMIN_ROLE_ID`.
    /// Optional: `LOG_LEVEL` (defaults to "info").
    pub fn from_env() -> Result<Self> {
        let discord_token =
            std::env::var("DISCORD_TOKEN").context("DISCORD_TOKEN is not set")?;

        let guild_id = std::env::var("GUILD_ID")
            .context("GUILD_ID is not set")?
            .parse()
            .context("GUILD_ID must be a numeric guild id")?;

        let admin_role_id = std::env::var("ADMIN_ROLE_ID")
            .context("ADMIN_ROLE_ID is not set")?
            .parse()
            .context("ADMIN_ROLE_ID must be a numeric role id")?;

        let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            discord_token,
            guild_id,
            admin_role_id,
            log_level,
        })
    }
}
