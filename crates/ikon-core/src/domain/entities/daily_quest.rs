//! Daily quests and the template catalogue they are generated from.

use crate::domain::value_objects::{QuestDifficulty, Reward};
use crate::{IkonError, IkonResult, QuestId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of quests handed out per local day.
pub const DAILY_QUEST_COUNT: usize = 5;

/// Static quest definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub objective_type: &'static str,
    pub target: u32,
    pub reward: Reward,
}

/// The quest catalogue, in generation order.
pub const QUEST_TEMPLATES: [QuestTemplate; 5] = [
    QuestTemplate {
        id: "play_games",
        title: "Gamer",
        description: "Play 3 mini-games",
        objective_type: "games_played",
        target: 3,
        reward: Reward { gold: 100, experience: 50, gems: None },
    },
    QuestTemplate {
        id: "level_up",
        title: "Rapid Growth",
        description: "Gain 50 experience",
        objective_type: "experience_gained",
        target: 50,
        reward: Reward { gold: 75, experience: 100, gems: None },
    },
    QuestTemplate {
        id: "collect_gold",
        title: "Gold Hunter",
        description: "Collect 200 gold",
        objective_type: "gold_earned",
        target: 200,
        reward: Reward { gold: 150, experience: 75, gems: None },
    },
    QuestTemplate {
        id: "win_games",
        title: "Champion",
        description: "Win 2 games in a row",
        objective_type: "consecutive_wins",
        target: 2,
        reward: Reward { gold: 200, experience: 100, gems: Some(5) },
    },
    QuestTemplate {
        id: "daily_login",
        title: "Loyal Fighter",
        description: "Log in 7 days in a row",
        objective_type: "login_days",
        target: 7,
        reward: Reward { gold: 300, experience: 150, gems: Some(10) },
    },
];

/// One measurable goal of a quest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct QuestObjective {
    #[serde(rename = "type")]
    pub objective_type: String,
    pub target: u32,
    pub current: u32,
}

/// A user-scoped, time-boxed quest instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuest {
    pub id: QuestId,
    pub user_id: UserId,
    /// Template identifier, e.g. `play_games`.
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

impl DailyQuest {
    /// Instantiates a template for a player of the given level.
    #[must_use]
    pub fn from_template(
        user_id: UserId,
        template: &QuestTemplate,
        level: u32,
        now: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: QuestId::new(),
            user_id,
            quest_id: template.id.to_string(),
            title: template.title.to_string(),
            description: template.description.to_string(),
            difficulty: QuestDifficulty::for_level(level),
            required_level: 1,
            objectives: vec![QuestObjective {
                objective_type: template.objective_type.to_string(),
                target: template.target,
                current: 0,
            }],
            rewards: template.reward.scaled_for_level(level),
            expires_at,
            completed_at: None,
            is_completed: false,
            progress: 0,
            created_at: now,
        }
    }

    /// True while the quest can still be completed.
    #[must_use]
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.expires_at > now
    }

    /// True for an unfinished quest whose deadline has passed.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && self.expires_at < now
    }

    /// Marks the quest complete.
    pub fn complete(&mut self, now: DateTime<Utc>) -> IkonResult<()> {
        if self.is_completed {
            return Err(IkonError::business_rule("Quest already completed"));
        }
        self.is_completed = true;
        self.completed_at = Some(now);
        self.progress = 100;
        Ok(())
    }

    /// Sets progress, clamped to 100.
    pub fn set_progress(&mut self, progress: u32) {
        self.progress = u8::try_from(progress.min(100)).unwrap_or(100);
    }
}
