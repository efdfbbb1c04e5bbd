//! Slash command definitions: /set_sleep, /not_set_time, /set_time_now, /set_time_past, /good_morning, /help

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

/// Creates the sleep-timer commands
pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_set_sleep_command(),
        create_not_set_time_command(),
        create_set_time_now_command(),
        create_set_time_past_command(),
        create_good_morning_command(),
        create_help_command(),
    ]
}

/// Creates the set_sleep command
fn create_set_sleep_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("set_sleep")
        .description("Set a sleep timer - you get muted when it fires")
        .create_option(|option| {
            option
                .name("time")
                .description("When to sleep, 24-hour HH:MM (Japan time)")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("user")
                .description("Who to set the timer for (defaults to you; admin role required)")
                .kind(CommandOptionType::User)
                .required(false)
        })
        .to_owned()
}

/// Creates the not_set_time command
fn create_not_set_time_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("not_set_time")
        .description("Cancel a sleep timer")
        .create_option(|option| {
            option
                .name("user")
                .description("Whose timer to cancel (defaults to you; admin role required)")
                .kind(CommandOptionType::User)
                .required(false)
        })
        .to_owned()
}

/// Creates the set_time_now command
fn create_set_time_now_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("set_time_now")
        .description("Show your current sleep timer")
        .to_owned()
}

/// Creates the set_time_past command
fn create_set_time_past_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("set_time_past")
        .description("Show the last sleep timer you set")
        .to_owned()
}

/// Creates the good_morning command
fn create_good_morning_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("good_morning")
        .description("Good morning! Lift your mute after waking up")
        .to_owned()
}

/// Creates the help command
fn create_help_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("help")
        .description("How to use the sleep-timer bot")
        .to_owned()
}
