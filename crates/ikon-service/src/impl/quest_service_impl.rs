//! Quest service implementation.

use crate::dto::{QuestCompletionResponse, QuestResponse, UserResponse};
use crate::progression::{level_up_selected_character, mutate_user};
use crate::quest_service::QuestService;
use async_trait::async_trait;
use chrono::Utc;
use ikon_core::calendar::{local_day_end, local_day_start};
use ikon_core::domain::{DailyQuest, DAILY_QUEST_COUNT, QUEST_TEMPLATES};
use ikon_core::{IkonError, IkonResult, QuestId, UserId};
use ikon_repository::{CharacterRepository, QuestRepository, UserRepository};
use shaku::Component;
use std::sync::Arc;
use tracing::{debug, info};

/// Quest service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = QuestService)]
pub struct QuestServiceComponent {
    #[shaku(inject)]
    quest_repository: Arc<dyn QuestRepository>,
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    character_repository: Arc<dyn CharacterRepository>,
}

impl QuestServiceComponent {
    /// Creates a new quest service.
    pub fn new(
        quest_repository: Arc<dyn QuestRepository>,
        user_repository: Arc<dyn UserRepository>,
        character_repository: Arc<dyn CharacterRepository>,
    ) -> Self {
        Self {
            quest_repository,
            user_repository,
            character_repository,
        }
    }

    async fn owned(&self, quest_id: QuestId, user_id: UserId) -> IkonResult<DailyQuest> {
        self.quest_repository
            .find_by_id(quest_id)
            .await?
            .filter(|q| q.user_id == user_id)
            .ok_or_else(|| IkonError::not_found("Quest", quest_id))
    }
}

/// Orders a day's quests by creation, then by their place in the catalogue.
fn in_catalogue_order(mut quests: Vec<DailyQuest>) -> Vec<QuestResponse> {
    let position = |quest_id: &str| {
        QUEST_TEMPLATES
            .iter()
            .position(|t| t.id == quest_id)
            .unwrap_or(QUEST_TEMPLATES.len())
    };
    quests.sort_by_key(|q| (q.created_at, position(&q.quest_id)));
    quests.into_iter().map(QuestResponse::from).collect()
}

#[async_trait]
impl QuestService for QuestServiceComponent {
    async fn generate_daily_quests(&self, user_id: UserId) -> IkonResult<Vec<QuestResponse>> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| IkonError::not_found("User", user_id))?;

        let now = Utc::now();
        let purged = self.quest_repository.delete_expired(user_id, now).await?;
        if purged > 0 {
            debug!(%user_id, purged, "Purged expired quests");
        }

        let since = local_day_start(now);
        let existing = self.quest_repository.find_created_since(user_id, since).await?;
        if existing.len() >= DAILY_QUEST_COUNT {
            return Ok(in_catalogue_order(existing));
        }

        // top the day up with templates not handed out yet
        let expires_at = local_day_end(now);
        let batch: Vec<DailyQuest> = QUEST_TEMPLATES
            .iter()
            .filter(|t| !existing.iter().any(|q| q.quest_id == t.id))
            .take(DAILY_QUEST_COUNT - existing.len())
            .map(|t| DailyQuest::from_template(user_id, t, user.level, now, expires_at))
            .collect();

        if self
            .quest_repository
            .insert_daily_batch(user_id, since, DAILY_QUEST_COUNT, &batch)
            .await?
        {
            info!(%user_id, count = batch.len(), "Generated daily quests");
        }

        let quests = self.quest_repository.find_created_since(user_id, since).await?;
        Ok(in_catalogue_order(quests))
    }

    async fn get_active_quests(&self, user_id: UserId) -> IkonResult<Vec<QuestResponse>> {
        let quests = self.quest_repository.find_active(user_id, Utc::now()).await?;
        Ok(quests.into_iter().map(QuestResponse::from).collect())
    }

    async fn complete_quest(&self, quest_id: QuestId, user_id: UserId) -> IkonResult<QuestCompletionResponse> {
        let mut quest = self.owned(quest_id, user_id).await?;
        if quest.is_completed {
            return Err(IkonError::business_rule("Quest already completed"));
        }

        let now = Utc::now();
        if !self.quest_repository.mark_completed(quest_id, user_id, now).await? {
            // lost a race with another completion
            return Err(IkonError::business_rule("Quest already completed"));
        }
        quest.complete(now)?;

        let rewards = quest.rewards;
        let (user, progress) = mutate_user(self.user_repository.as_ref(), user_id, |u| {
            u.add_gold(rewards.gold)?;
            let progress = u.gain_experience(rewards.experience)?;
            if let Some(gems) = rewards.gems {
                u.add_gems(gems)?;
            }
            u.record_quest_completed();
            Ok(progress)
        })
        .await?;

        level_up_selected_character(self.character_repository.as_ref(), &user, progress.levels_gained, now).await;

        info!(%user_id, %quest_id, gold = rewards.gold, experience = rewards.experience, "Quest completed");
        Ok(QuestCompletionResponse {
            quest: QuestResponse::from(quest),
            rewards,
            user: UserResponse::from(user),
        })
    }

    async fn update_quest_progress(&self, quest_id: QuestId, user_id: UserId, progress: u32) -> IkonResult<QuestResponse> {
        let mut quest = self.owned(quest_id, user_id).await?;
        quest.set_progress(progress);

        if !self
            .quest_repository
            .update_progress(quest_id, user_id, quest.progress)
            .await?
        {
            return Err(IkonError::not_found("Quest", quest_id));
        }

        debug!(%quest_id, progress = quest.progress, "Quest progress updated");
        Ok(QuestResponse::from(quest))
    }
}

impl std::fmt::Debug for QuestServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestServiceComponent").finish_non_exhaustive()
    }
}
