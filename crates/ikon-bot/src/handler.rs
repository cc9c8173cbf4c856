//! Command handling on top of the game services.

use crate::commands::BotCommand;
use crate::messages;
use crate::types::{InlineKeyboardMarkup, TelegramUser};
use ikon_core::domain::TelegramProfile;
use ikon_core::IkonResult;
use ikon_service::{LeaderboardService, QuestService, UserService};
use std::sync::Arc;
use tracing::info;

const LEADERBOARD_SIZE: u32 = 10;

/// A message to send back to the chat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
}

impl Reply {
    fn text(text: String) -> Self {
        Self { text, keyboard: None }
    }
}

/// Turns bot commands into replies.
pub struct CommandHandler {
    user_service: Arc<dyn UserService>,
    quest_service: Arc<dyn QuestService>,
    leaderboard_service: Arc<dyn LeaderboardService>,
    mini_app_url: String,
}

impl CommandHandler {
    pub fn new(
        user_service: Arc<dyn UserService>,
        quest_service: Arc<dyn QuestService>,
        leaderboard_service: Arc<dyn LeaderboardService>,
        mini_app_url: impl Into<String>,
    ) -> Self {
        Self {
            user_service,
            quest_service,
            leaderboard_service,
            mini_app_url: mini_app_url.into(),
        }
    }

    /// Runs `command` on behalf of `sender`.
    pub async fn handle(&self, command: BotCommand, sender: &TelegramUser) -> IkonResult<Reply> {
        match command {
            BotCommand::Start => self.start(sender).await,
            BotCommand::Profile => {
                let user = self.user_service.get_user_by_telegram_id(sender.id).await?;
                Ok(Reply::text(messages::profile(&user)))
            }
            BotCommand::Quests => {
                let user = self.user_service.get_user_by_telegram_id(sender.id).await?;
                let quests = self.quest_service.generate_daily_quests(user.id).await?;
                Ok(Reply::text(messages::quests(&quests)))
            }
            BotCommand::Leaderboard => {
                let top = self.leaderboard_service.get_top_players(Some(LEADERBOARD_SIZE)).await?;
                let season = self.leaderboard_service.get_season_info().await?;
                Ok(Reply::text(messages::leaderboard(&top, &season)))
            }
            BotCommand::Help => Ok(Reply::text(messages::help())),
        }
    }

    async fn start(&self, sender: &TelegramUser) -> IkonResult<Reply> {
        let profile = TelegramProfile::from(sender);
        let user = self.user_service.create_or_update_user(&profile).await?;
        let login = self.user_service.add_login_streak(user.id).await?;

        info!(
            telegram_id = sender.id,
            user_id = %login.user.id,
            streak = login.streak,
            "Player started the bot"
        );

        Ok(Reply {
            text: messages::welcome(&login.user),
            keyboard: Some(messages::welcome_keyboard(&self.mini_app_url)),
        })
    }
}

impl std::fmt::Debug for CommandHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHandler")
            .field("mini_app_url", &self.mini_app_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use ikon_core::IkonError;
    use ikon_repository::{
        InMemoryCharacterRepository, InMemoryLeaderboardRepository, InMemoryQuestRepository, InMemoryUserRepository,
        UserRepository,
    };
    use ikon_service::{LeaderboardServiceComponent, QuestServiceComponent, UserServiceComponent};

    fn handler() -> CommandHandler {
        handler_with(Arc::new(InMemoryUserRepository::new()))
    }

    fn handler_with(users: Arc<InMemoryUserRepository>) -> CommandHandler {
        let characters = Arc::new(InMemoryCharacterRepository::new());
        let quests = Arc::new(InMemoryQuestRepository::new());
        let leaderboard = Arc::new(InMemoryLeaderboardRepository::new());

        CommandHandler::new(
            Arc::new(UserServiceComponent::new(users.clone(), characters.clone())),
            Arc::new(QuestServiceComponent::new(quests, users.clone(), characters.clone())),
            Arc::new(LeaderboardServiceComponent::new(leaderboard, users)),
            "https://play.example.com",
        )
    }

    fn sender() -> TelegramUser {
        TelegramUser {
            id: 4242,
            is_bot: false,
            first_name: "Ada".to_string(),
            last_name: None,
            username: Some("ada".to_string()),
        }
    }

    #[tokio::test]
    async fn test_start_registers_player_with_keyboard() {
        let handler = handler();

        let reply = handler.handle(BotCommand::Start, &sender()).await.unwrap();

        assert!(reply.text.contains("Welcome to *IkonGrind*"));
        assert!(reply.text.contains("Login streak: 1"));
        let keyboard = reply.keyboard.unwrap();
        assert_eq!(
            keyboard.inline_keyboard[0][0].web_app.as_ref().unwrap().url,
            "https://play.example.com"
        );

        let profile = handler.handle(BotCommand::Profile, &sender()).await.unwrap();
        assert!(profile.text.contains("*Ada*"));
        assert!(profile.keyboard.is_none());
    }

    #[tokio::test]
    async fn test_start_after_long_absence_resets_streak() {
        let users = Arc::new(InMemoryUserRepository::new());
        let handler = handler_with(users.clone());
        handler.handle(BotCommand::Start, &sender()).await.unwrap();

        let mut stored = users.find_by_telegram_id(sender().id).await.unwrap().unwrap();
        stored.login_streak = 4;
        stored.last_active_at = Utc::now() - Duration::days(5);
        users.update(&stored).await.unwrap();

        handler.handle(BotCommand::Start, &sender()).await.unwrap();

        let stored = users.find_by_telegram_id(sender().id).await.unwrap().unwrap();
        assert_eq!(stored.login_streak, 1);
    }

    #[tokio::test]
    async fn test_repeated_start_does_not_farm_streak_bonus() {
        let users = Arc::new(InMemoryUserRepository::new());
        let handler = handler_with(users.clone());

        for _ in 0..14 {
            handler.handle(BotCommand::Start, &sender()).await.unwrap();
        }

        let stored = users.find_by_telegram_id(sender().id).await.unwrap().unwrap();
        assert_eq!(stored.login_streak, 1);
        assert_eq!(stored.gold, 100);
    }

    #[tokio::test]
    async fn test_profile_before_start_fails() {
        let err = handler().handle(BotCommand::Profile, &sender()).await.unwrap_err();
        assert!(matches!(err, IkonError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_quests_are_generated() {
        let handler = handler();
        handler.handle(BotCommand::Start, &sender()).await.unwrap();

        let reply = handler.handle(BotCommand::Quests, &sender()).await.unwrap();

        assert!(reply.text.starts_with("📋 *Daily quests*"));
        assert!(reply.text.contains("1. *"));
        assert!(reply.text.contains("Difficulty: easy"));
    }

    #[tokio::test]
    async fn test_leaderboard_and_help() {
        let handler = handler();

        let board = handler.handle(BotCommand::Leaderboard, &sender()).await.unwrap();
        assert!(board.text.contains("*Leaderboard - Season"));

        let help = handler.handle(BotCommand::Help, &sender()).await.unwrap();
        assert!(help.text.contains("/quests"));
    }
}
