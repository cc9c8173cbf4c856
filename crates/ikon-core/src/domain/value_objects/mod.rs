//! Domain value objects.

mod character_class;
mod game;
mod quest_difficulty;
mod reward;
mod season;
mod telegram_profile;

pub use character_class::*;
pub use game::*;
pub use quest_difficulty::*;
pub use reward::*;
pub use season::*;
pub use telegram_profile::*;
