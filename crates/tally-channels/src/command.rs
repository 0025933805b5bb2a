//! Chat command parsing.

/// A parsed slash command, mapped 1:1 to a tracker operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Record one event for today (`/track`, `/t`)
    Track,
    /// Today's count (`/today`)
    Today,
    /// 7-day breakdown (`/week`)
    Week,
    /// 30-day total (`/month`)
    Month,
    /// Undo the most recent event (`/undo`)
    Undo,
    /// Purge the user's entire history (`/reset`)
    Reset,
    /// Greeting / onboarding (`/start`)
    Start,
    /// Usage help (`/help`)
    Help,
}

impl Command {
    /// Parse message text into a command.
    ///
    /// Returns `None` both for non-command chatter and for unknown slash
    /// commands; the caller distinguishes the two by the leading `/`.
    /// An `@botname` suffix is stripped before matching (e.g.
    /// `/track@my_tally_bot`), and anything after the first whitespace is
    /// ignored — no command takes arguments.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let command = text.split_whitespace().next()?;
        // Strip @bot_username suffix from commands (e.g. /track@mybot)
        let command = command.split('@').next().unwrap_or(command);

        match command {
            "/track" | "/t" => Some(Self::Track),
            "/today" => Some(Self::Today),
            "/week" => Some(Self::Week),
            "/month" => Some(Self::Month),
            "/undo" => Some(Self::Undo),
            "/reset" => Some(Self::Reset),
            "/start" => Some(Self::Start),
            "/help" => Some(Self::Help),
            _ => None,
        }
    }
}
