//! Sleep timer command handlers
//!
//! Handles: set_sleep, not_set_time, set_time_now, set_time_past

use anyhow::Result;
use async_trait::async_trait;
use log::info;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::prelude::Context;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::handlers::respond;
use crate::commands::slash::{get_string_option, get_user_option};
use crate::features::sleep::{self, CancelError, ScheduleError, SleepTimer};

/// Handler for the timer lifecycle commands
pub struct SleepHandler;

#[async_trait]
impl SlashCommandHandler for SleepHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["set_sleep", "not_set_time", "set_time_now", "set_time_past"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        match command.data.name.as_str() {
            "set_sleep" => self.handle_set_sleep(&ctx, serenity_ctx, command).await,
            "not_set_time" => self.handle_cancel(&ctx, serenity_ctx, command).await,
            "set_time_now" => self.handle_query(&ctx, serenity_ctx, command, false).await,
            "set_time_past" => self.handle_query(&ctx, serenity_ctx, command, true).await,
            _ => Ok(()),
        }
    }
}

impl SleepHandler {
    /// Handle /set_sleep - schedule a timer for the target (default: self)
    async fn handle_set_sleep(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let requester_id = command.user.id.0;
        let target_id = get_user_option(&command.data.options, "user").unwrap_or(requester_id);
        let time = get_string_option(&command.data.options, "time")
            .ok_or_else(|| anyhow::anyhow!("Missing time parameter"))?;

        let result = sleep::schedule(
            &ctx.timers,
            requester_id,
            ctx.is_admin(command),
            target_id,
            command.channel_id.0,
            &time,
            sleep::now_local(),
        );

        let reply = match result {
            Ok(timer) => {
                info!(
                    "Scheduled sleep timer for user {} at {} (requested by {})",
                    target_id,
                    timer.deadline.format("%Y-%m-%d %H:%M"),
                    requester_id
                );
                format!(
                    "⏰ Sleep timer for <@{target_id}> set for **{}** Japan time. Sweet dreams!",
                    format_deadline(&timer)
                )
            }
            Err(ScheduleError::Unauthorized) => {
                "❌ You need the admin role to set a sleep timer for someone else.".to_string()
            }
            Err(ScheduleError::InvalidFormat) => {
                "❌ Invalid time format. Use 24-hour `HH:MM`, e.g. `23:30`.".to_string()
            }
            Err(ScheduleError::AlreadyScheduled(existing)) => format!(
                "⏰ <@{target_id}> already has a sleep timer for **{}**. Cancel it first with `/not_set_time`.",
                format_deadline(&existing)
            ),
        };

        respond(serenity_ctx, command, reply).await
    }

    /// Handle /not_set_time - cancel the target's timer (default: self)
    async fn handle_cancel(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let requester_id = command.user.id.0;
        let target_id = get_user_option(&command.data.options, "user").unwrap_or(requester_id);

        let reply = match sleep::cancel(
            &ctx.timers,
            requester_id,
            ctx.is_admin(command),
            target_id,
        ) {
            Ok(timer) => {
                info!(
                    "Cancelled sleep timer for user {} (was {}, requested by {})",
                    target_id,
                    timer.deadline.format("%Y-%m-%d %H:%M"),
                    requester_id
                );
                format!("✅ Cancelled the sleep timer for <@{target_id}>.")
            }
            Err(CancelError::Unauthorized) => {
                "❌ You need the admin role to cancel someone else's sleep timer.".to_string()
            }
            Err(CancelError::NotFound) => {
                format!("❌ <@{target_id}> doesn't have a sleep timer set.")
            }
        };

        respond(serenity_ctx, command, reply).await
    }

    /// Handle /set_time_now and /set_time_past
    ///
    /// Both look up the requester's own entry. There is no history store, so
    /// the "past" variant is the same lookup with different phrasing: once a
    /// timer fires or is cancelled it leaves no trace.
    async fn handle_query(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        past_phrasing: bool,
    ) -> Result<()> {
        let reply = match ctx.timers.get(command.user.id.0) {
            Some(timer) if past_phrasing => format!(
                "🕰️ The last sleep timer you set is for **{}** Japan time.",
                format_deadline(&timer)
            ),
            Some(timer) => format!(
                "⏰ Your sleep timer is set for **{}** Japan time.",
                format_deadline(&timer)
            ),
            None => "❌ You don't have a sleep timer set.".to_string(),
        };

        respond(serenity_ctx, command, reply).await
    }
}

fn format_deadline(timer: &SleepTimer) -> String {
    timer.deadline.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::sleep::{TimerStore, BOT_TIMEZONE};
    use chrono::TimeZone;

    #[test]
    fn test_sleep_handler_commands() {
        let handler = SleepHandler;
        let names = handler.command_names();

        assert!(names.contains(&"set_sleep"));
        assert!(names.contains(&"not_set_time"));
        assert!(names.contains(&"set_time_now"));
        assert!(names.contains(&"set_time_past"));
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn test_format_deadline_is_clock_time() {
        let store = TimerStore::new();
        let now = BOT_TIMEZONE.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let timer = sleep::schedule(&store, 1, false, 1, 900, "23:30", now).unwrap();

        assert_eq!(format_deadline(&timer), "23:30");
    }
}
