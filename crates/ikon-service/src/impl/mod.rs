//! Service implementations.
//!
//! Each component receives its repositories through Shaku injection and
//! also offers a `new` constructor for wiring by hand in tests.

pub mod auth_service_impl;
pub mod character_service_impl;
pub mod game_service_impl;
pub mod leaderboard_service_impl;
pub mod quest_service_impl;
pub mod user_service_impl;

pub use auth_service_impl::AuthServiceComponent;
pub use character_service_impl::CharacterServiceComponent;
pub use game_service_impl::GameServiceComponent;
pub use leaderboard_service_impl::LeaderboardServiceComponent;
pub use quest_service_impl::QuestServiceComponent;
pub use user_service_impl::UserServiceComponent;
