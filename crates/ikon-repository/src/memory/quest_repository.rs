//! In-memory daily quest repository.

use crate::traits::QuestRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ikon_core::domain::DailyQuest;
use ikon_core::{IkonResult, QuestId, UserId};
use parking_lot::RwLock;
use shaku::Component;
use std::collections::HashMap;

/// In-memory daily quest repository.
#[derive(Component, Default, Debug)]
#[shaku(interface = QuestRepository)]
pub struct InMemoryQuestRepository {
    #[shaku(default)]
    quests: RwLock<HashMap<QuestId, DailyQuest>>,
}

impl InMemoryQuestRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestRepository for InMemoryQuestRepository {
    async fn find_by_id(&self, id: QuestId) -> IkonResult<Option<DailyQuest>> {
        Ok(self.quests.read().get(&id).cloned())
    }

    async fn find_created_since(&self, user_id: UserId, since: DateTime<Utc>) -> IkonResult<Vec<DailyQuest>> {
        let mut quests: Vec<DailyQuest> = self
            .quests
            .read()
            .values()
            .filter(|q| q.user_id == user_id && q.created_at >= since)
            .cloned()
            .collect();
        quests.sort_by_key(|q| (q.created_at, q.id.into_inner()));
        Ok(quests)
    }

    async fn find_active(&self, user_id: UserId, now: DateTime<Utc>) -> IkonResult<Vec<DailyQuest>> {
        let mut quests: Vec<DailyQuest> = self
            .quests
            .read()
            .values()
            .filter(|q| q.user_id == user_id && q.is_active(now))
            .cloned()
            .collect();
        quests.sort_by_key(|q| (q.expires_at, q.id.into_inner()));
        Ok(quests)
    }

    async fn delete_expired(&self, user_id: UserId, now: DateTime<Utc>) -> IkonResult<u64> {
        let mut quests = self.quests.write();
        let before = quests.len();
        quests.retain(|_, q| !(q.user_id == user_id && !q.is_completed && q.expires_at < now));
        Ok((before - quests.len()) as u64)
    }

    async fn insert_daily_batch(
        &self,
        user_id: UserId,
        since: DateTime<Utc>,
        limit: usize,
        batch: &[DailyQuest],
    ) -> IkonResult<bool> {
        let mut quests = self.quests.write();
        let existing = quests
            .values()
            .filter(|q| q.user_id == user_id && q.created_at >= since)
            .count();
        if existing + batch.len() > limit {
            return Ok(false);
        }
        for quest in batch {
            quests.insert(quest.id, quest.clone());
        }
        Ok(true)
    }

    async fn mark_completed(&self, id: QuestId, user_id: UserId, completed_at: DateTime<Utc>) -> IkonResult<bool> {
        let mut quests = self.quests.write();
        match quests.get_mut(&id) {
            Some(quest) if quest.user_id == user_id && !quest.is_completed => {
                quest.complete(completed_at)?;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_progress(&self, id: QuestId, user_id: UserId, progress: u8) -> IkonResult<bool> {
        let mut quests = self.quests.write();
        match quests.get_mut(&id) {
            Some(quest) if quest.user_id == user_id => {
                quest.progress = progress.min(100);
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
