//! Daily quest DTOs.

use super::UserResponse;
use chrono::{DateTime, Utc};
use ikon_core::domain::{DailyQuest, QuestDifficulty, QuestObjective, Reward};
use ikon_core::QuestId;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to report quest progress. Values above 100 are clamped.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestProgressRequest {
    #[validate(range(min = 0, message = "Progress must not be negative"))]
    pub progress: i64,
}

/// Quest response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestResponse {
    pub id: QuestId,
    pub quest_id: String,
    pub title: String,
    pub description: String,
    pub difficulty: QuestDifficulty,
    pub required_level: u32,
    pub objectives: Vec<QuestObjective>,
    pub rewards: Reward,
    pub expires_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub is_completed: bool,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
}

impl From<DailyQuest> for QuestResponse {
    fn from(quest: DailyQuest) -> Self {
        Self {
            id: quest.id,
            quest_id: quest.quest_id,
            title: quest.title,
            description: quest.description,
            difficulty: quest.difficulty,
            required_level: quest.required_level,
            objectives: quest.objectives,
            rewards: quest.rewards,
            expires_at: quest.expires_at,
            completed_at: quest.completed_at,
            is_completed: quest.is_completed,
            progress: quest.progress,
            created_at: quest.created_at,
        }
    }
}

/// Result of completing a quest.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QuestCompletionResponse {
    pub quest: QuestResponse,
    pub rewards: Reward,
    pub user: UserResponse,
}
