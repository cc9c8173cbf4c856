//! Quest service trait definition.

use crate::dto::{QuestCompletionResponse, QuestResponse};
use async_trait::async_trait;
use ikon_core::{IkonResult, Interface, QuestId, UserId};

/// Daily quest generation and completion.
#[async_trait]
pub trait QuestService: Interface + Send + Sync {
    /// Returns today's quests, generating them on the first call of the
    /// local day. Expired incomplete quests are purged first.
    async fn generate_daily_quests(&self, user_id: UserId) -> IkonResult<Vec<QuestResponse>>;

    /// Lists incomplete, unexpired quests, soonest deadline first.
    async fn get_active_quests(&self, user_id: UserId) -> IkonResult<Vec<QuestResponse>>;

    /// Completes a quest and pays its reward.
    async fn complete_quest(&self, quest_id: QuestId, user_id: UserId) -> IkonResult<QuestCompletionResponse>;

    /// Records quest progress, clamped to 100.
    async fn update_quest_progress(&self, quest_id: QuestId, user_id: UserId, progress: u32) -> IkonResult<QuestResponse>;
}
