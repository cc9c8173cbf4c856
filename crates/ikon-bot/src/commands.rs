//! Slash commands and inline-button callbacks.

/// A request the bot knows how to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Profile,
    Quests,
    Leaderboard,
    Help,
}

impl BotCommand {
    /// Parses a message text such as `/quests` or `/start@IkonGrindBot ref`.
    ///
    /// Returns `None` for plain text and unknown commands.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.split_whitespace().next()?.strip_prefix('/')?;
        let name = word.split('@').next().unwrap_or(word);
        Self::from_name(&name.to_ascii_lowercase())
    }

    /// Maps the `callback_data` of an inline button.
    #[must_use]
    pub fn from_callback(data: &str) -> Option<Self> {
        match Self::from_name(data)? {
            // The welcome keyboard never carries a start button.
            Self::Start => None,
            command => Some(command),
        }
    }

    /// The `callback_data` carried by the button for this command.
    #[must_use]
    pub const fn callback_data(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Profile => "profile",
            Self::Quests => "quests",
            Self::Leaderboard => "leaderboard",
            Self::Help => "help",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "profile" => Some(Self::Profile),
            "quests" => Some(Self::Quests),
            "leaderboard" => Some(Self::Leaderboard),
            "help" => Some(Self::Help),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(BotCommand::parse("/start"), Some(BotCommand::Start));
        assert_eq!(BotCommand::parse("  /Quests  "), Some(BotCommand::Quests));
        assert_eq!(BotCommand::parse("/leaderboard@IkonGrindBot"), Some(BotCommand::Leaderboard));
        assert_eq!(BotCommand::parse("/start ref_ABCD1234"), Some(BotCommand::Start));
    }

    #[test]
    fn test_parse_rejects_plain_text_and_unknown() {
        assert_eq!(BotCommand::parse("hello"), None);
        assert_eq!(BotCommand::parse("/shop"), None);
        assert_eq!(BotCommand::parse(""), None);
    }

    #[test]
    fn test_callbacks() {
        assert_eq!(BotCommand::from_callback("profile"), Some(BotCommand::Profile));
        assert_eq!(BotCommand::from_callback("help"), Some(BotCommand::Help));
        assert_eq!(BotCommand::from_callback("start"), None);
        assert_eq!(BotCommand::from_callback("nope"), None);
        assert_eq!(BotCommand::from_callback(BotCommand::Quests.callback_data()), Some(BotCommand::Quests));
    }
}
