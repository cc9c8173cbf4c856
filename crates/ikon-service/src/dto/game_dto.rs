//! Mini-game DTOs.

use super::UserResponse;
use chrono::{DateTime, Utc};
use ikon_core::domain::{GameReward, GameResult, GameSession, GameType, MAX_SESSION_DURATION_MS};
use ikon_core::GameSessionId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to start a game.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StartGameRequest {
    pub game_type: GameType,
}

/// Descriptor handed to the client when a game starts.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameStartResponse {
    pub game_type: GameType,
    /// Epoch milliseconds.
    pub start_time: i64,
    /// Milliseconds.
    pub max_duration: i64,
}

/// Request to record a finished game.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndGameRequest {
    pub game_type: GameType,

    #[validate(range(min = 0, message = "Score must not be negative"))]
    pub score: i64,

    pub result: GameResult,

    /// Milliseconds.
    #[validate(range(min = 0, max = MAX_SESSION_DURATION_MS, message = "Duration must be between 0 and 3600000 ms"))]
    pub duration: i64,

    #[validate(range(min = 1, max = 10, message = "Difficulty must be between 1 and 10"))]
    pub difficulty: Option<u8>,
}

/// Game session response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameSessionResponse {
    pub id: GameSessionId,
    pub game_type: GameType,
    pub score: i64,
    pub result: GameResult,
    pub duration: i64,
    pub difficulty: u8,
    pub gold_earned: i64,
    pub experience_earned: i64,
    pub played_at: DateTime<Utc>,
}

impl From<GameSession> for GameSessionResponse {
    fn from(session: GameSession) -> Self {
        Self {
            id: session.id,
            game_type: session.game_type,
            score: session.score,
            result: session.result,
            duration: session.duration,
            difficulty: session.difficulty,
            gold_earned: session.gold_earned,
            experience_earned: session.experience_earned,
            played_at: session.played_at,
        }
    }
}

/// Result of ending a game.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GameCompletionResponse {
    pub session: GameSessionResponse,
    pub rewards: GameReward,
    pub user: UserResponse,
}

/// Today's play summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatsResponse {
    pub games_played: u32,
    pub games_won: u32,
    pub total_gold_earned: i64,
    pub total_exp_earned: i64,
    pub games_remaining: u32,
}
