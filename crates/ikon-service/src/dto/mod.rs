//! Data Transfer Objects (DTOs).
//!
//! Request bodies are validated with `validator`; all bodies use camelCase.

mod auth_dto;
mod character_dto;
mod game_dto;
mod leaderboard_dto;
mod quest_dto;
mod user_dto;

pub use auth_dto::*;
pub use character_dto::*;
pub use game_dto::*;
pub use leaderboard_dto::*;
pub use quest_dto::*;
pub use user_dto::*;
