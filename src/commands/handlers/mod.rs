//! Per-area slash command handlers

pub mod sleep;
pub mod utility;
pub mod wake;

pub use sleep::SleepHandler;
pub use utility::HelpHandler;
pub use wake::WakeHandler;

use anyhow::Result;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::prelude::Context;

/// Send the single textual reply every command invocation produces
pub(crate) async fn respond(
    serenity_ctx: &Context,
    command: &ApplicationCommandInteraction,
    text: impl Into<String>,
) -> Result<()> {
    let text = text.into();
    command
        .create_interaction_response(&serenity_ctx.http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(text))
        })
        .await?;
    Ok(())
}
