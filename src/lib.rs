// Core layer - configuration
pub mod core;

// Features layer - sleep timers and voice control
pub mod features;

// Application layer - slash command handling
pub mod commands;

// Re-export the items the binary and tests reach for most
pub use crate::commands::{CommandContext, CommandHandler};
pub use crate::core::Config;
pub use crate::features::sleep::{SleepSweeper, SleepTimer, TimerStore};
