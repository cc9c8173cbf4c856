//! Mini-game value objects and the reward table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of sessions a user may record per local day.
pub const DAILY_GAME_LIMIT: u32 = 5;

/// Upper bound accepted for a reported session duration, in milliseconds.
pub const MAX_SESSION_DURATION_MS: i64 = 3_600_000;

/// The four mini-games.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Clicker,
    Reaction,
    Timing,
    Puzzle,
}

impl GameType {
    /// Base gold reward before the result multiplier.
    #[must_use]
    pub const fn base_gold(self) -> i64 {
        match self {
            Self::Clicker => 50,
            Self::Reaction => 60,
            Self::Timing => 70,
            Self::Puzzle => 80,
        }
    }

    /// Base experience reward before the result multiplier.
    #[must_use]
    pub const fn base_experience(self) -> i64 {
        match self {
            Self::Clicker => 25,
            Self::Reaction => 30,
            Self::Timing => 35,
            Self::Puzzle => 40,
        }
    }

    /// Maximum client-side play time for one session, in milliseconds.
    #[must_use]
    pub const fn max_duration_ms(self) -> i64 {
        match self {
            Self::Clicker => 60_000,
            Self::Reaction | Self::Timing | Self::Puzzle => 90_000,
        }
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clicker => "clicker",
            Self::Reaction => "reaction",
            Self::Timing => "timing",
            Self::Puzzle => "puzzle",
        }
    }

    /// Returns all game types.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Clicker, Self::Reaction, Self::Timing, Self::Puzzle]
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown game type: {s}"))
    }
}

/// Outcome of a finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// Reward multiplier in tenths (win ×1.5, loss ×0.7, draw ×1.0).
    #[must_use]
    pub const fn multiplier_tenths(self) -> i64 {
        match self {
            Self::Win => 15,
            Self::Loss => 7,
            Self::Draw => 10,
        }
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::Loss => "loss",
            Self::Draw => "draw",
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameResult {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "win" => Ok(Self::Win),
            "loss" => Ok(Self::Loss),
            "draw" => Ok(Self::Draw),
            other => Err(format!("unknown game result: {other}")),
        }
    }
}

/// Gold and experience granted for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct GameReward {
    pub gold: i64,
    pub experience: i64,
}

impl GameReward {
    /// Computes the session reward.
    ///
    /// `gold = ceil(base * mult + floor(score / 100))`,
    /// `experience = ceil(base_exp * mult)`. Integer arithmetic keeps the
    /// ceilings exact.
    #[must_use]
    pub const fn compute(game_type: GameType, result: GameResult, score: i64) -> Self {
        let mult = result.multiplier_tenths();
        let score_bonus = if score > 0 { score / 100 } else { 0 };
        Self {
            gold: ceil_div(game_type.base_gold() * mult, 10) + score_bonus,
            experience: ceil_div(game_type.base_experience() * mult, 10),
        }
    }
}

const fn ceil_div(numerator: i64, denominator: i64) -> i64 {
    (numerator + denominator - 1) / denominator
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_puzzle_win_reward() {
        let reward = GameReward::compute(GameType::Puzzle, GameResult::Win, 150);
        assert_eq!(reward.gold, 121);
        assert_eq!(reward.experience, 60);
    }

    #[test]
    fn test_loss_rewards_round_up() {
        // 25 * 0.7 = 17.5
        let reward = GameReward::compute(GameType::Clicker, GameResult::Loss, 0);
        assert_eq!(reward.gold, 35);
        assert_eq!(reward.experience, 18);

        // 70 * 0.7 = 49, 35 * 0.7 = 24.5
        let reward = GameReward::compute(GameType::Timing, GameResult::Loss, 99);
        assert_eq!(reward.gold, 49);
        assert_eq!(reward.experience, 25);
    }

    #[test]
    fn test_draw_reward_is_base() {
        let reward = GameReward::compute(GameType::Reaction, GameResult::Draw, 1_000);
        assert_eq!(reward.gold, 60 + 10);
        assert_eq!(reward.experience, 30);
    }

    #[test]
    fn test_max_duration() {
        assert_eq!(GameType::Clicker.max_duration_ms(), 60_000);
        assert_eq!(GameType::Puzzle.max_duration_ms(), 90_000);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!("timing".parse::<GameType>(), Ok(GameType::Timing));
        assert!("chess".parse::<GameType>().is_err());
        assert_eq!("draw".parse::<GameResult>(), Ok(GameResult::Draw));
        let json = serde_json::to_string(&GameResult::Loss).unwrap();
        assert_eq!(json, "\"loss\"");
    }
}
