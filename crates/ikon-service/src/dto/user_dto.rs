//! User-related DTOs.

use chrono::{DateTime, Utc};
use ikon_core::domain::{User, UserStatistics};
use ikon_core::{CharacterId, UserId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to add or spend gold.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGoldRequest {
    /// Negative amounts spend gold.
    #[validate(range(min = -1_000_000_000, max = 1_000_000_000, message = "Amount out of range"))]
    pub amount: i64,
}

/// Request to grant experience.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExperienceRequest {
    #[validate(range(min = 0, max = 1_000_000_000, message = "Amount must not be negative"))]
    pub amount: i64,
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
    pub level: u32,
    pub experience: i64,
    pub gold: i64,
    pub gems: i64,
    pub login_streak: u32,
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub selected_character_id: Option<CharacterId>,
    pub statistics: UserStatistics,
    pub total_play_time: i64,
    pub joined_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            telegram_id: user.telegram_id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            profile_picture: user.profile_picture,
            level: user.level,
            experience: user.experience,
            gold: user.gold,
            gems: user.gems,
            login_streak: user.login_streak,
            referral_code: user.referral_code,
            referred_by: user.referred_by,
            selected_character_id: user.selected_character_id,
            statistics: user.statistics,
            total_play_time: user.total_play_time,
            joined_at: user.joined_at,
            last_active_at: user.last_active_at,
        }
    }
}

impl UserResponse {
    /// Name shown to other players.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.first_name)
    }
}

/// Outcome of a daily login.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginStreakResponse {
    pub user: UserResponse,
    pub streak: u32,
    /// Gold paid for completing a 7-day streak, otherwise 0.
    pub bonus_gold: i64,
}
