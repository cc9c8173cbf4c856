//! Reply texts (Telegram legacy Markdown).

use crate::commands::BotCommand;
use crate::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use ikon_core::domain::SeasonInfo;
use ikon_service::{LeaderboardEntryResponse, QuestResponse, UserResponse};
use std::fmt::Write;

const MEDALS: [&str; 3] = ["🥇", "🥈", "🥉"];

/// Escapes characters that legacy Markdown treats as markup.
#[must_use]
pub fn escape_markdown(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '_' | '*' | '`' | '[') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Keyboard attached to the welcome message.
#[must_use]
pub fn welcome_keyboard(mini_app_url: &str) -> InlineKeyboardMarkup {
    let button = |label: &str, command: BotCommand| InlineKeyboardButton::callback(label, command.callback_data());
    InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![InlineKeyboardButton::web_app("🎮 Open game", mini_app_url)],
            vec![
                button("📋 Quests", BotCommand::Quests),
                button("🏆 Leaderboard", BotCommand::Leaderboard),
            ],
            vec![button("👤 Profile", BotCommand::Profile), button("❓ Help", BotCommand::Help)],
        ],
    }
}

#[must_use]
pub fn welcome(user: &UserResponse) -> String {
    format!(
        "🎮 Welcome to *IkonGrind*!\n\n\
         Level up your hero, clear daily quests, win mini-games and climb the season leaderboard.\n\n\
         *Your progress*\n\
         ⭐ Level: {}\n\
         💰 Gold: {}\n\
         📈 Experience: {}\n\
         🔥 Login streak: {}\n\n\
         Open the game and start your legend!",
        user.level, user.gold, user.experience, user.login_streak
    )
}

#[must_use]
pub fn profile(user: &UserResponse) -> String {
    let stats = &user.statistics;
    format!(
        "👤 *Player profile*\n\n\
         *{}*\n\
         📊 Level: {}\n\
         📈 Experience: {}\n\
         💰 Gold: {}\n\
         💎 Gems: {}\n\n\
         📊 *Statistics*\n\
         🎮 Games played: {}\n\
         🏆 Wins: {}\n\
         📋 Quests completed: {}\n\
         💵 Gold earned: {}\n\n\
         🔥 Login streak: {} days",
        escape_markdown(&user.first_name),
        user.level,
        user.experience,
        user.gold,
        user.gems,
        stats.total_games_played,
        stats.total_games_won,
        stats.total_quests_completed,
        stats.total_gold_earned,
        user.login_streak,
    )
}

#[must_use]
pub fn quests(quests: &[QuestResponse]) -> String {
    let mut text = String::from("📋 *Daily quests*\n");
    if quests.is_empty() {
        text.push_str("\nNo quests available right now.\n");
    }
    for (index, quest) in quests.iter().enumerate() {
        let _ = write!(
            text,
            "\n{}. *{}*\n   {}\n   Difficulty: {}\n   Reward: {} 💰 + {} 📈\n",
            index + 1,
            escape_markdown(&quest.title),
            escape_markdown(&quest.description),
            quest.difficulty,
            quest.rewards.gold,
            quest.rewards.experience,
        );
    }
    text.push_str("\n_Open the game to complete your quests_");
    text
}

#[must_use]
pub fn leaderboard(entries: &[LeaderboardEntryResponse], season: &SeasonInfo) -> String {
    let mut text = format!(
        "🏆 *Leaderboard - Season {}*\n\nDays remaining: {}\n",
        season.season_number, season.days_remaining
    );
    if entries.is_empty() {
        text.push_str("\nNo ranked players yet.\n");
    }
    for (index, entry) in entries.iter().enumerate() {
        let medal = MEDALS
            .get(index)
            .map_or_else(|| format!("#{}", index + 1), |medal| (*medal).to_string());
        let _ = write!(
            text,
            "\n{medal} *{}* (Level {})\n   Score: {}\n",
            escape_markdown(&entry.username),
            entry.level,
            entry.score,
        );
    }
    text
}

#[must_use]
pub fn help() -> String {
    "❓ *Help*\n\n\
     /start - Start the game\n\
     /profile - Show your profile\n\
     /quests - Daily quests\n\
     /leaderboard - Season leaderboard\n\
     /help - This message\n\n\
     🎮 *How to play*\n\
     1. Tap \"🎮 Open game\" to launch the Mini App\n\
     2. Complete your daily quests\n\
     3. Play mini-games to earn rewards\n\
     4. Level up your character\n\
     5. Climb the leaderboard!\n\n\
     💡 Log in every day to keep your streak bonus."
        .to_string()
}

/// Short reply sent when a command fails.
#[must_use]
pub const fn error(command: BotCommand) -> &'static str {
    match command {
        BotCommand::Start => "❌ Could not start the game. Please try again later.",
        BotCommand::Profile => "❌ Could not load your profile. Send /start first.",
        BotCommand::Quests => "❌ Could not load your quests. Send /start first.",
        BotCommand::Leaderboard => "❌ Could not load the leaderboard.",
        BotCommand::Help => "❌ Something went wrong.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ikon_core::UserId;

    fn entry(rank: u32, username: &str) -> LeaderboardEntryResponse {
        LeaderboardEntryResponse {
            user_id: UserId::new(),
            username: username.to_string(),
            level: 3,
            total_experience: 250,
            season_number: 1,
            rank,
            score: 1000 - i64::from(rank),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("cool_player*1"), "cool\\_player\\*1");
        assert_eq!(escape_markdown("plain"), "plain");
    }

    #[test]
    fn test_leaderboard_medals_then_ranks() {
        let entries: Vec<_> = (1..=5).map(|rank| entry(rank, &format!("p{rank}"))).collect();
        let season = SeasonInfo::at(Utc::now()).unwrap();
        let text = leaderboard(&entries, &season);

        assert!(text.contains(&format!("Season {}", season.season_number)));
        assert!(text.contains("🥇 *p1*"));
        assert!(text.contains("🥈 *p2*"));
        assert!(text.contains("🥉 *p3*"));
        assert!(text.contains("#4 *p4*"));
        assert!(text.contains("#5 *p5*"));
    }

    #[test]
    fn test_empty_leaderboard() {
        let season = SeasonInfo::at(Utc::now()).unwrap();
        assert!(leaderboard(&[], &season).contains("No ranked players yet"));
    }

    #[test]
    fn test_welcome_keyboard_layout() {
        let keyboard = welcome_keyboard("https://play.example.com");
        assert_eq!(keyboard.inline_keyboard.len(), 3);
        let open = &keyboard.inline_keyboard[0][0];
        assert_eq!(open.web_app.as_ref().unwrap().url, "https://play.example.com");
        let data: Vec<_> = keyboard.inline_keyboard[1..]
            .iter()
            .flatten()
            .filter_map(|b| b.callback_data.clone())
            .collect();
        assert_eq!(data, ["quests", "leaderboard", "profile", "help"]);
    }

    #[test]
    fn test_help_lists_commands() {
        let text = help();
        for command in ["/start", "/profile", "/quests", "/leaderboard", "/help"] {
            assert!(text.contains(command));
        }
    }
}
