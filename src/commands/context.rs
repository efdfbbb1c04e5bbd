//! Shared context for command handlers

use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::id::{GuildId, RoleId};

use crate::features::sleep::TimerStore;

/// Shared state handed to every command handler
///
/// Carries the in-memory timer store plus the two pieces of guild
/// configuration the handlers need: which guild the bot serves and which
/// role may manage other users' timers.
#[derive(Clone)]
pub struct CommandContext {
    pub timers: TimerStore,
    pub guild_id: GuildId,
    pub admin_role_id: RoleId,
}

impl CommandContext {
    pub fn new(timers: TimerStore, guild_id: GuildId, admin_role_id: RoleId) -> Self {
        Self {
            timers,
            guild_id,
            admin_role_id,
        }
    }

    /// Whether the invoking member holds the configured admin role
    ///
    /// Interactions outside a guild carry no member and are never admin.
    pub fn is_admin(&self, command: &ApplicationCommandInteraction) -> bool {
        command
            .member
            .as_ref()
            .map(|member| member.roles.contains(&self.admin_role_id))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_is_clone() {
        // Handlers share the context behind an Arc but Clone keeps setup simple
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
