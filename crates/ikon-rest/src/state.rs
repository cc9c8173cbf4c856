//! Application state for Axum handlers.

use ikon_core::HealthCheck;
use ikon_service::{AuthService, CharacterService, GameService, LeaderboardService, QuestService, UserService};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub character_service: Arc<dyn CharacterService>,
    pub quest_service: Arc<dyn QuestService>,
    pub game_service: Arc<dyn GameService>,
    pub leaderboard_service: Arc<dyn LeaderboardService>,
    pub auth_service: Arc<dyn AuthService>,
    /// Probes consulted by `/ready`.
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        user_service: Arc<dyn UserService>,
        character_service: Arc<dyn CharacterService>,
        quest_service: Arc<dyn QuestService>,
        game_service: Arc<dyn GameService>,
        leaderboard_service: Arc<dyn LeaderboardService>,
        auth_service: Arc<dyn AuthService>,
    ) -> Self {
        Self {
            user_service,
            character_service,
            quest_service,
            game_service,
            leaderboard_service,
            auth_service,
            health_checks: Vec::new(),
        }
    }

    /// Adds a readiness probe.
    #[must_use]
    pub fn with_health_check(mut self, check: Arc<dyn HealthCheck>) -> Self {
        self.health_checks.push(check);
        self
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("health_checks", &self.health_checks.len())
            .finish_non_exhaustive()
    }
}
