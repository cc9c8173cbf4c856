//! OpenAPI documentation for the REST API.

use crate::controllers::health_controller::{CheckResult, HealthResponse, ReadinessResponse};
use ikon_core::domain::{
    Appearance, CharacterClass, CharacterStats, EquipmentSlot, GameResult, GameReward, GameType, QuestDifficulty,
    QuestObjective, Reward, SeasonInfo, Skill, StatKind, UserStatistics,
};
use ikon_core::{ErrorResponse, FieldError};
use ikon_service::{
    AuthInitRequest, AuthResponse, CharacterResponse, CreateCharacterRequest, CustomizeAppearanceRequest,
    DailyStatsResponse, EndGameRequest, EquipItemRequest, FriendsLeaderboardRequest, GameCompletionResponse,
    GameSessionResponse, GameStartResponse, LeaderboardEntryResponse, QuestCompletionResponse, QuestResponse,
    StartGameRequest, UpdateExperienceRequest, UpdateGoldRequest, UpdateQuestProgressRequest, UpgradeStatRequest,
    UserResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the IkonGrind API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "IkonGrind API",
        version = "1.0.0",
        description = "Backend of the IkonGrind Telegram Mini App",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    paths(
        crate::controllers::auth_controller::init,
        crate::controllers::user_controller::get_profile,
        crate::controllers::user_controller::update_gold,
        crate::controllers::user_controller::update_experience,
        crate::controllers::character_controller::get_selected_character,
        crate::controllers::character_controller::create_character,
        crate::controllers::character_controller::upgrade_stat,
        crate::controllers::character_controller::equip_item,
        crate::controllers::character_controller::customize_appearance,
        crate::controllers::quest_controller::get_daily_quests,
        crate::controllers::quest_controller::get_active_quests,
        crate::controllers::quest_controller::complete_quest,
        crate::controllers::quest_controller::update_quest_progress,
        crate::controllers::game_controller::start_game,
        crate::controllers::game_controller::end_game,
        crate::controllers::game_controller::get_daily_stats,
        crate::controllers::leaderboard_controller::get_top_players,
        crate::controllers::leaderboard_controller::get_user_rank,
        crate::controllers::leaderboard_controller::get_season_info,
        crate::controllers::leaderboard_controller::get_friends_leaderboard,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
    ),
    components(
        schemas(
            ErrorResponse,
            FieldError,
            // Domain values
            CharacterClass,
            CharacterStats,
            Skill,
            Appearance,
            StatKind,
            EquipmentSlot,
            GameType,
            GameResult,
            GameReward,
            QuestDifficulty,
            QuestObjective,
            Reward,
            SeasonInfo,
            UserStatistics,
            // Requests
            AuthInitRequest,
            UpdateGoldRequest,
            UpdateExperienceRequest,
            CreateCharacterRequest,
            UpgradeStatRequest,
            EquipItemRequest,
            CustomizeAppearanceRequest,
            UpdateQuestProgressRequest,
            StartGameRequest,
            EndGameRequest,
            FriendsLeaderboardRequest,
            // Responses
            AuthResponse,
            UserResponse,
            CharacterResponse,
            QuestResponse,
            QuestCompletionResponse,
            GameStartResponse,
            GameSessionResponse,
            GameCompletionResponse,
            DailyStatsResponse,
            LeaderboardEntryResponse,
            HealthResponse,
            ReadinessResponse,
            CheckResult,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Mini App session bootstrap"),
        (name = "user", description = "Player profile"),
        (name = "character", description = "Player characters"),
        (name = "quests", description = "Daily quests"),
        (name = "games", description = "Mini-game sessions"),
        (name = "leaderboard", description = "Seasonal leaderboard"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;

/// Bearer token scheme issued by `/api/auth/init`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from /api/auth/init"))
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_game_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/api/auth/init", "/api/quests/{quest_id}/complete", "/api/games/end", "/ready"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        assert!(doc.components.unwrap().security_schemes.contains_key("bearer_auth"));
    }
}
