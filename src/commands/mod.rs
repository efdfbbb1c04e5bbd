//! # Command System
//!
//! Slash command (/) handling for Discord interactions.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod context;
pub mod dispatcher;
pub mod handler;
pub mod handlers;
pub mod registry;
pub mod slash;

pub use context::CommandContext;
pub use dispatcher::CommandHandler;
pub use handler::SlashCommandHandler;
pub use registry::CommandRegistry;
pub use slash::{
    create_slash_commands, get_string_option, get_user_option, register_guild_commands,
};
