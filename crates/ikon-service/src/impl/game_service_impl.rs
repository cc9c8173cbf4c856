//! Game service implementation.

use crate::dto::{DailyStatsResponse, EndGameRequest, GameCompletionResponse, GameSessionResponse, GameStartResponse, UserResponse};
use crate::game_service::GameService;
use crate::progression::{level_up_selected_character, mutate_user};
use async_trait::async_trait;
use chrono::Utc;
use ikon_core::calendar::local_day_start;
use ikon_core::domain::{GameSession, GameType, DAILY_GAME_LIMIT};
use ikon_core::{IkonError, IkonResult, UserId, ValidateExt};
use ikon_repository::{CharacterRepository, GameSessionRepository, UserRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Game service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = GameService)]
pub struct GameServiceComponent {
    #[shaku(inject)]
    game_session_repository: Arc<dyn GameSessionRepository>,
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    character_repository: Arc<dyn CharacterRepository>,
}

impl GameServiceComponent {
    /// Creates a new game service.
    pub fn new(
        game_session_repository: Arc<dyn GameSessionRepository>,
        user_repository: Arc<dyn UserRepository>,
        character_repository: Arc<dyn CharacterRepository>,
    ) -> Self {
        Self {
            game_session_repository,
            user_repository,
            character_repository,
        }
    }

    async fn ensure_user(&self, user_id: UserId) -> IkonResult<()> {
        match self.user_repository.find_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(IkonError::not_found("User", user_id)),
        }
    }
}

fn daily_limit_reached() -> IkonError {
    IkonError::limit_exceeded(format!("Daily game limit of {} reached", DAILY_GAME_LIMIT))
}

#[async_trait]
impl GameService for GameServiceComponent {
    async fn start_game(&self, user_id: UserId, game_type: GameType) -> IkonResult<GameStartResponse> {
        self.ensure_user(user_id).await?;

        let now = Utc::now();
        let played = self
            .game_session_repository
            .count_since(user_id, local_day_start(now))
            .await?;
        if played >= DAILY_GAME_LIMIT {
            debug!(%user_id, played, "Game start refused");
            return Err(daily_limit_reached());
        }

        debug!(%user_id, %game_type, "Game started");
        Ok(GameStartResponse {
            game_type,
            start_time: now.timestamp_millis(),
            max_duration: game_type.max_duration_ms(),
        })
    }

    async fn end_game(&self, user_id: UserId, request: EndGameRequest) -> IkonResult<GameCompletionResponse> {
        request.validate_request()?;
        self.ensure_user(user_id).await?;

        let now = Utc::now();
        let session = GameSession::record(
            user_id,
            request.game_type,
            request.score,
            request.result,
            request.duration,
            request.difficulty.unwrap_or(1),
            now,
        );

        if !self
            .game_session_repository
            .insert_within_limit(&session, local_day_start(now), DAILY_GAME_LIMIT)
            .await?
        {
            return Err(daily_limit_reached());
        }

        let rewards = session.reward();
        let won = session.is_win();
        let duration = session.duration;
        let (user, progress) = mutate_user(self.user_repository.as_ref(), user_id, |u| {
            u.add_gold(rewards.gold)?;
            let progress = u.gain_experience(rewards.experience)?;
            u.record_game(won, duration);
            Ok(progress)
        })
        .await?;

        level_up_selected_character(self.character_repository.as_ref(), &user, progress.levels_gained, now).await;

        info!(
            %user_id,
            game_type = %session.game_type,
            result = %session.result,
            gold = rewards.gold,
            experience = rewards.experience,
            "Game recorded"
        );
        Ok(GameCompletionResponse {
            session: GameSessionResponse::from(session),
            rewards,
            user: UserResponse::from(user),
        })
    }

    async fn get_daily_stats(&self, user_id: UserId) -> IkonResult<DailyStatsResponse> {
        let sessions = self
            .game_session_repository
            .find_since(user_id, local_day_start(Utc::now()))
            .await?;

        let games_played = u32::try_from(sessions.len()).unwrap_or(u32::MAX);
        let games_won = u32::try_from(sessions.iter().filter(|s| s.is_win()).count()).unwrap_or(u32::MAX);

        Ok(DailyStatsResponse {
            games_played,
            games_won,
            total_gold_earned: sessions.iter().map(|s| s.gold_earned).sum(),
            total_exp_earned: sessions.iter().map(|s| s.experience_earned).sum(),
            games_remaining: DAILY_GAME_LIMIT.saturating_sub(games_played),
        })
    }
}

impl std::fmt::Debug for GameServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ikon_core::domain::{GameResult, TelegramProfile, User};
    use ikon_repository::{InMemoryCharacterRepository, InMemoryGameSessionRepository, InMemoryUserRepository};

    async fn setup() -> (GameServiceComponent, UserId) {
        let users = Arc::new(InMemoryUserRepository::new());
        let user = User::from_telegram(&TelegramProfile::new(3, "Gale"), Utc::now());
        users.save(&user).await.unwrap();

        let service = GameServiceComponent::new(
            Arc::new(InMemoryGameSessionRepository::new()),
            users,
            Arc::new(InMemoryCharacterRepository::new()),
        );
        (service, user.id)
    }

    fn end(game_type: GameType, score: i64, result: GameResult) -> EndGameRequest {
        EndGameRequest {
            game_type,
            score,
            result,
            duration: 30_000,
            difficulty: None,
        }
    }

    #[tokio::test]
    async fn test_puzzle_win_reward() {
        let (service, user_id) = setup().await;
        let done = service
            .end_game(user_id, end(GameType::Puzzle, 150, GameResult::Win))
            .await
            .unwrap();

        assert_eq!(done.rewards.gold, 121);
        assert_eq!(done.rewards.experience, 60);
        assert_eq!(done.session.difficulty, 1);
        assert_eq!(done.user.gold, 221);
        assert_eq!(done.user.experience, 60);
        assert_eq!(done.user.statistics.total_games_played, 1);
        assert_eq!(done.user.statistics.total_games_won, 1);
        assert_eq!(done.user.statistics.total_gold_earned, 121);
    }

    #[tokio::test]
    async fn test_sixth_game_is_rejected() {
        let (service, user_id) = setup().await;
        for _ in 0..5 {
            service
                .end_game(user_id, end(GameType::Clicker, 10, GameResult::Loss))
                .await
                .unwrap();
        }

        let err = service
            .end_game(user_id, end(GameType::Clicker, 10, GameResult::Loss))
            .await
            .unwrap_err();
        assert!(matches!(err, IkonError::LimitExceeded(_)));

        let err = service.start_game(user_id, GameType::Timing).await.unwrap_err();
        assert_eq!(err.status_code(), 429);

        let stats = service.get_daily_stats(user_id).await.unwrap();
        assert_eq!(stats.games_played, 5);
        assert_eq!(stats.games_won, 0);
        assert_eq!(stats.games_remaining, 0);
    }

    #[tokio::test]
    async fn test_start_game_describes_session() {
        let (service, user_id) = setup().await;

        let clicker = service.start_game(user_id, GameType::Clicker).await.unwrap();
        assert_eq!(clicker.max_duration, 60_000);
        let reaction = service.start_game(user_id, GameType::Reaction).await.unwrap();
        assert_eq!(reaction.max_duration, 90_000);
        assert!(reaction.start_time > 0);
    }

    #[tokio::test]
    async fn test_daily_stats_sum_rewards() {
        let (service, user_id) = setup().await;
        service
            .end_game(user_id, end(GameType::Timing, 0, GameResult::Draw))
            .await
            .unwrap();
        service
            .end_game(user_id, end(GameType::Reaction, 250, GameResult::Win))
            .await
            .unwrap();

        let stats = service.get_daily_stats(user_id).await.unwrap();
        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.games_won, 1);
        // timing draw 70 + reaction win 90 + 2
        assert_eq!(stats.total_gold_earned, 162);
        assert_eq!(stats.total_exp_earned, 35 + 45);
        assert_eq!(stats.games_remaining, 3);
    }

    #[tokio::test]
    async fn test_invalid_duration_is_rejected() {
        let (service, user_id) = setup().await;
        let mut request = end(GameType::Puzzle, 1, GameResult::Win);
        request.duration = 3_600_001;

        let err = service.end_game(user_id, request).await.unwrap_err();
        assert!(matches!(err, IkonError::Validation(_)));
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let (service, _) = setup().await;
        let err = service.start_game(UserId::new(), GameType::Puzzle).await.unwrap_err();
        assert!(matches!(err, IkonError::NotFound { .. }));
    }
}
