//! In-memory repository implementations.
//!
//! Used by the `memory://` database URL and throughout the service and
//! handler tests. Each repository guards its state with one lock, so the
//! conditional writes are atomic just like their MySQL counterparts.

mod character_repository;
mod game_session_repository;
mod leaderboard_repository;
mod quest_repository;
mod user_repository;

pub use character_repository::InMemoryCharacterRepository;
pub use game_session_repository::InMemoryGameSessionRepository;
pub use leaderboard_repository::InMemoryLeaderboardRepository;
pub use quest_repository::InMemoryQuestRepository;
pub use user_repository::InMemoryUserRepository;
