//! Game session entity.

use crate::domain::value_objects::{GameResult, GameReward, GameType};
use crate::{GameSessionId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One completed play of a mini-game. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSession {
    pub id: GameSessionId,
    pub user_id: UserId,
    pub game_type: GameType,
    pub score: i64,
    pub result: GameResult,
    /// Milliseconds.
    pub duration: i64,
    /// 1 (default) to 10.
    pub difficulty: u8,
    pub gold_earned: i64,
    pub experience_earned: i64,
    pub played_at: DateTime<Utc>,
}

impl GameSession {
    /// Records a finished game with its computed reward.
    #[must_use]
    pub fn record(
        user_id: UserId,
        game_type: GameType,
        score: i64,
        result: GameResult,
        duration: i64,
        difficulty: u8,
        now: DateTime<Utc>,
    ) -> Self {
        let reward = GameReward::compute(game_type, result, score);
        Self {
            id: GameSessionId::new(),
            user_id,
            game_type,
            score,
            result,
            duration,
            difficulty,
            gold_earned: reward.gold,
            experience_earned: reward.experience,
            played_at: now,
        }
    }

    /// The reward stored on this session.
    #[must_use]
    pub const fn reward(&self) -> GameReward {
        GameReward {
            gold: self.gold_earned,
            experience: self.experience_earned,
        }
    }

    #[must_use]
    pub fn is_win(&self) -> bool {
        self.result == GameResult::Win
    }
}
