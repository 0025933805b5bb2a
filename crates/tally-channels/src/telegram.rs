//! Telegram — teloxide adapter
//!
//! Long-polling bot that maps slash commands onto the usage tracker.
//! The chat id doubles as the tracker's user id, matching the one
//! counter per conversation model.

use crate::command::Command;
use crate::error::{Error, Result};
use crate::reply;
use chrono::Utc;
use std::sync::Arc;
use tally_core::UsageTracker;
use teloxide::{
    payloads::SendMessageSetters,
    prelude::*,
    types::{Message as TelegramMessage, ReplyParameters},
};
use tracing::{debug, error, info, instrument};

/// Telegram bot configuration
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token
    pub bot_token: String,
    /// Allowed user IDs (empty = allow all)
    pub allowed_users: Vec<i64>,
}

impl TelegramConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| Error::Telegram("TELEGRAM_BOT_TOKEN not set".to_string()))?;

        let allowed_users: Vec<i64> = std::env::var("TELEGRAM_ALLOWED_USERS")
            .ok()
            .map(|s| {
                s.split(',')
                    .filter_map(|id| id.trim().parse().ok())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            bot_token,
            allowed_users,
        })
    }

    /// Create with a bot token
    #[must_use]
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            allowed_users: Vec::new(),
        }
    }

    /// Set allowed users
    #[must_use]
    pub fn with_allowed_users(mut self, users: Vec<i64>) -> Self {
        self.allowed_users = users;
        self
    }
}

/// Telegram bot adapter
pub struct TelegramAdapter {
    bot: Bot,
    config: TelegramConfig,
}

impl TelegramAdapter {
    /// Create a new Telegram adapter
    #[must_use]
    pub fn new(config: TelegramConfig) -> Self {
        let bot = Bot::new(&config.bot_token);
        Self { bot, config }
    }

    /// Create from environment
    pub fn from_env() -> Result<Self> {
        let config = TelegramConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Get the underlying bot
    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Check if a user is allowed
    pub fn is_user_allowed(&self, user_id: i64) -> bool {
        self.config.allowed_users.is_empty() || self.config.allowed_users.contains(&user_id)
    }

    /// Start the bot with the given tracker
    #[instrument(skip(self, tracker))]
    pub async fn run(self: Arc<Self>, tracker: Arc<UsageTracker>) -> Result<()> {
        info!("Starting Telegram bot");

        let bot = self.bot.clone();
        let adapter = self.clone();

        let handler = Update::filter_message().endpoint(move |bot: Bot, msg: TelegramMessage| {
            let adapter = adapter.clone();
            let tracker = tracker.clone();
            async move { Self::handle_message(adapter, tracker, bot, msg).await }
        });

        Dispatcher::builder(bot, handler)
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;

        Ok(())
    }

    /// Handle an incoming message
    async fn handle_message(
        adapter: Arc<Self>,
        tracker: Arc<UsageTracker>,
        bot: Bot,
        msg: TelegramMessage,
    ) -> ResponseResult<()> {
        let Some(text) = msg.text() else {
            return Ok(());
        };
        let Some(user) = msg.from.as_ref() else {
            return Ok(());
        };

        if !adapter.is_user_allowed(user.id.0 as i64) {
            debug!(user_id = %user.id, "User not allowed");
            return Ok(());
        }

        let trimmed = text.trim();
        if !trimmed.starts_with('/') {
            // Non-command chatter is ignored
            return Ok(());
        }

        let Some(command) = Command::parse(trimmed) else {
            let _ = bot
                .send_message(msg.chat.id, reply::help_text())
                .reply_parameters(ReplyParameters::new(msg.id))
                .await;
            return Ok(());
        };

        info!(
            chat_id = %msg.chat.id,
            command = ?command,
            "Received command"
        );

        // The chat id is the counter key; "today" is fixed here, once,
        // in UTC, so everything below stays clock-free.
        let user_id = msg.chat.id.0;
        let today = Utc::now().date_naive();

        let response = match Self::dispatch(&tracker, command, user_id, today).await {
            Ok(text) => text,
            Err(e) => {
                // Log full error internally, show the user a sanitized one
                error!(error = %e, chat_id = %msg.chat.id, "Command failed");
                user_facing_error(&e).to_string()
            }
        };

        let _ = bot
            .send_message(msg.chat.id, &response)
            .reply_parameters(ReplyParameters::new(msg.id))
            .await;

        Ok(())
    }

    /// Map a command to a tracker call and format the reply.
    async fn dispatch(
        tracker: &UsageTracker,
        command: Command,
        user_id: i64,
        today: chrono::NaiveDate,
    ) -> Result<String> {
        Ok(match command {
            Command::Track => reply::track_reply(tracker.track(user_id, today).await?),
            Command::Today => reply::daily_reply(tracker.today_total(user_id, today).await?),
            Command::Week => reply::weekly_reply(&tracker.weekly_report(user_id, today).await?),
            Command::Month => reply::monthly_reply(tracker.monthly_total(user_id, today).await?),
            Command::Undo => reply::undo_reply(tracker.undo(user_id, today).await?),
            Command::Reset => reply::reset_reply(tracker.reset(user_id).await?),
            Command::Start | Command::Help => reply::help_text().to_string(),
        })
    }
}

/// User-visible message for a failed command. Never leaks SQL, paths,
/// or tokens.
fn user_facing_error(error: &Error) -> &'static str {
    match error {
        Error::Tracker(_) => "A storage error occurred. Please try again later.",
        Error::Telegram(_) => "A network error occurred. Please try again later.",
    }
}
