//! Tally Channels — Chat Adapters
//!
//! Telegram adapter (via teloxide) for the Tally usage-tracking bot:
//! command parsing, reply formatting, and the long-polling dispatch
//! loop that bridges chat messages to the usage tracker.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod reply;
pub mod telegram;

pub use command::Command;
pub use error::{Error, Result};

// Re-export Telegram adapter
pub use telegram::{TelegramAdapter, TelegramConfig};
