//! Domain entities.

mod character;
mod daily_quest;
mod game_session;
mod leaderboard_entry;
mod user;

pub use character::*;
pub use daily_quest::*;
pub use game_session::*;
pub use leaderboard_entry::*;
pub use user::*;
