//! Expiry sweeper
//!
//! A single periodic task that drains expired timers and mutes whoever is
//! still sitting in voice. Spawned once from the `ready` handler and runs
//! for the life of the process.

use log::{debug, info, warn};
use serenity::model::id::{GuildId, UserId};
use serenity::prelude::Context;
use std::time::Duration;

use super::schedule::now_local;
use super::store::TimerStore;
use crate::features::voice;

/// Fixed sweep cadence; deadlines are minute-granular so 60s is enough
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Periodic task that expires due sleep timers
pub struct SleepSweeper {
    store: TimerStore,
    guild_id: GuildId,
}

impl SleepSweeper {
    pub fn new(store: TimerStore, guild_id: GuildId) -> Self {
        SleepSweeper { store, guild_id }
    }

    /// Run the sweep loop forever
    pub async fn run(self, ctx: Context) {
        info!(
            "💤 Sleep sweeper started (every {}s, guild {})",
            SWEEP_INTERVAL.as_secs(),
            self.guild_id
        );

        let mut interval = tokio::time::interval(SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            self.sweep(&ctx).await;
        }
    }

    /// One sweep tick: remove every due timer, then best-effort mute
    ///
    /// Removal is unconditional once the deadline has passed. A user who
    /// already left voice is simply not muted; a failed mute request is
    /// logged and never retried.
    async fn sweep(&self, ctx: &Context) {
        let due = self.store.take_due(now_local());
        if due.is_empty() {
            return;
        }

        debug!("{} sleep timer(s) due this tick", due.len());

        for timer in due {
            let user_id = UserId(timer.user_id);
            match voice::connected_channel(ctx, self.guild_id, user_id) {
                Ok(channel_id) => {
                    match voice::set_server_mute(&ctx.http, self.guild_id, user_id, true).await {
                        Ok(()) => info!(
                            "🔇 Muted user {} in channel {} (timer from channel {})",
                            user_id, channel_id, timer.channel_id
                        ),
                        Err(e) => warn!("Failed to mute user {user_id}: {e}"),
                    }
                }
                Err(reason) => debug!(
                    "Timer for user {user_id} expired without a mute ({reason:?})"
                ),
            }
        }
    }
}
