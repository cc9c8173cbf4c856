//! MySQL repository implementations.
//!
//! UUIDs are stored as `CHAR(36)`, enums as their lowercase wire names and
//! nested value objects as `JSON` columns.

mod character_repository;
mod game_session_repository;
mod leaderboard_repository;
mod quest_repository;
mod user_repository;

pub use character_repository::MySqlCharacterRepository;
pub use game_session_repository::MySqlGameSessionRepository;
pub use leaderboard_repository::MySqlLeaderboardRepository;
pub use quest_repository::MySqlQuestRepository;
pub use user_repository::MySqlUserRepository;

use ikon_core::{IkonError, IkonResult};
use std::str::FromStr;
use uuid::Uuid;

fn parse_id<T: From<Uuid>>(value: &str, column: &str) -> IkonResult<T> {
    Uuid::parse_str(value)
        .map(T::from)
        .map_err(|e| IkonError::Internal(format!("Invalid UUID in {}: {}", column, e)))
}

fn parse_enum<T: FromStr<Err = String>>(value: &str) -> IkonResult<T> {
    value.parse().map_err(IkonError::Internal)
}

fn to_u32(value: i32, column: &str) -> IkonResult<u32> {
    u32::try_from(value).map_err(|_| IkonError::Internal(format!("Negative value in {}: {}", column, value)))
}

fn to_i32(value: u32, column: &str) -> IkonResult<i32> {
    i32::try_from(value).map_err(|_| IkonError::validation(format!("{} out of range: {}", column, value)))
}
