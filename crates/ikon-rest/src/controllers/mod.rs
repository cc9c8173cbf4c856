//! REST API controllers.

pub mod auth_controller;
pub mod character_controller;
pub mod game_controller;
pub mod health_controller;
pub mod leaderboard_controller;
pub mod quest_controller;
pub mod user_controller;
