//! # Ikon Service
//!
//! Use cases of the IkonGrind game: player progression, characters, daily
//! quests, mini-game sessions, the seasonal leaderboard and the Mini App
//! auth bootstrap.
//!
//! Each service is a trait (`user_service.rs`, ...) with a Shaku component
//! implementation in `impl/`. Handlers and the bot depend on the traits only.

pub mod auth_service;
pub mod character_service;
pub mod dto;
pub mod game_service;
pub mod r#impl;
pub mod leaderboard_service;
pub mod notifier;
pub mod quest_service;
pub mod user_service;

mod progression;

pub use auth_service::*;
pub use character_service::*;
pub use dto::*;
pub use game_service::*;
pub use r#impl::*;
pub use leaderboard_service::*;
pub use notifier::*;
pub use quest_service::*;
pub use user_service::*;
