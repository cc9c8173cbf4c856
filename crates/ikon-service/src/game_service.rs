//! Game service trait definition.

use crate::dto::{DailyStatsResponse, EndGameRequest, GameCompletionResponse, GameStartResponse};
use async_trait::async_trait;
use ikon_core::domain::GameType;
use ikon_core::{IkonResult, Interface, UserId};

/// Mini-game sessions and their rewards.
#[async_trait]
pub trait GameService: Interface + Send + Sync {
    /// Checks the daily allowance and describes the game to play.
    async fn start_game(&self, user_id: UserId, game_type: GameType) -> IkonResult<GameStartResponse>;

    /// Records a finished game and pays its reward.
    async fn end_game(&self, user_id: UserId, request: EndGameRequest) -> IkonResult<GameCompletionResponse>;

    /// Summarises today's games.
    async fn get_daily_stats(&self, user_id: UserId) -> IkonResult<DailyStatsResponse>;
}
