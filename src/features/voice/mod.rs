//! # Voice Feature
//!
//! Voice-presence lookups and server-mute control for the configured guild.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::Result;
use serenity::http::Http;
use serenity::model::id::{ChannelId, GuildId, UserId};
use serenity::prelude::Context;

/// Why a voice-presence lookup produced nothing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceError {
    /// The configured guild is not resolvable from the cache
    GuildUnavailable,
    /// The user is not connected to any voice channel
    NotInVoice,
}

/// Find the voice channel a user is currently connected to
///
/// Reads the gateway cache only; no HTTP request is made.
pub fn connected_channel(
    ctx: &Context,
    guild_id: GuildId,
    user_id: UserId,
) -> Result<ChannelId, VoiceError> {
    let guild = ctx
        .cache
        .guild(guild_id)
        .ok_or(VoiceError::GuildUnavailable)?;

    guild
        .voice_states
        .get(&user_id)
        .and_then(|state| state.channel_id)
        .ok_or(VoiceError::NotInVoice)
}

/// Set or clear the server-mute flag on a member's voice presence
///
/// Fire-and-forget from the caller's perspective: the request may not take
/// effect, and failures carry no retry.
pub async fn set_server_mute(
    http: &Http,
    guild_id: GuildId,
    user_id: UserId,
    mute: bool,
) -> Result<()> {
    guild_id
        .edit_member(http, user_id, |member| member.mute(mute))
        .await?;
    Ok(())
}
