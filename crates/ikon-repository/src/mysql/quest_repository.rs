//! MySQL daily quest repository implementation.

use super::{parse_enum, parse_id, to_i32, to_u32};
use crate::{traits::QuestRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ikon_core::domain::{DailyQuest, QuestObjective, Reward};
use ikon_core::{IkonError, IkonResult, QuestId, UserId};
use shaku::Component;
use sqlx::types::Json;
use sqlx::{FromRow, MySql, Transaction};
use std::sync::Arc;
use tracing::debug;

const QUEST_COLUMNS: &str = r#"
    id, user_id, quest_id, title, description, difficulty, required_level,
    objectives, rewards, expires_at, completed_at, is_completed, progress,
    created_at
"#;

/// MySQL daily quest repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = QuestRepository)]
pub struct MySqlQuestRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlQuestRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn insert(tx: &mut Transaction<'_, MySql>, quest: &DailyQuest) -> IkonResult<()> {
        sqlx::query(
            r#"
            INSERT INTO daily_quests (id, user_id, quest_id, title, description, difficulty,
                                      required_level, objectives, rewards, expires_at,
                                      completed_at, is_completed, progress, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(quest.id.into_inner().to_string())
        .bind(quest.user_id.into_inner().to_string())
        .bind(&quest.quest_id)
        .bind(&quest.title)
        .bind(&quest.description)
        .bind(quest.difficulty.as_str())
        .bind(to_i32(quest.required_level, "required_level")?)
        .bind(Json(&quest.objectives))
        .bind(Json(&quest.rewards))
        .bind(quest.expires_at)
        .bind(quest.completed_at)
        .bind(quest.is_completed)
        .bind(i32::from(quest.progress))
        .bind(quest.created_at)
        .execute(&mut **tx)
        .await?;
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct QuestRow {
    id: String,
    user_id: String,
    quest_id: String,
    title: String,
    description: String,
    difficulty: String,
    required_level: i32,
    objectives: Json<Vec<QuestObjective>>,
    rewards: Json<Reward>,
    expires_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    is_completed: bool,
    progress: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<QuestRow> for DailyQuest {
    type Error = IkonError;

    fn try_from(row: QuestRow) -> Result<Self, Self::Error> {
        Ok(DailyQuest {
            id: parse_id(&row.id, "daily_quests.id")?,
            user_id: parse_id(&row.user_id, "daily_quests.user_id")?,
            quest_id: row.quest_id,
            title: row.title,
            description: row.description,
            difficulty: parse_enum(&row.difficulty)?,
            required_level: to_u32(row.required_level, "daily_quests.required_level")?,
            objectives: row.objectives.0,
            rewards: row.rewards.0,
            expires_at: row.expires_at,
            completed_at: row.completed_at,
            is_completed: row.is_completed,
            progress: u8::try_from(row.progress.clamp(0, 100)).unwrap_or(100),
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl QuestRepository for MySqlQuestRepository {
    async fn find_by_id(&self, id: QuestId) -> IkonResult<Option<DailyQuest>> {
        debug!("Finding quest by id: {}", id);

        let row = sqlx::query_as::<_, QuestRow>(&format!("SELECT {QUEST_COLUMNS} FROM daily_quests WHERE id = ?"))
            .bind(id.into_inner().to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(DailyQuest::try_from).transpose()
    }

    async fn find_created_since(&self, user_id: UserId, since: DateTime<Utc>) -> IkonResult<Vec<DailyQuest>> {
        debug!("Finding quests for user {} created since {}", user_id, since);

        let rows = sqlx::query_as::<_, QuestRow>(&format!(
            "SELECT {QUEST_COLUMNS} FROM daily_quests WHERE user_id = ? AND created_at >= ? ORDER BY created_at ASC, id ASC"
        ))
        .bind(user_id.into_inner().to_string())
        .bind(since)
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(DailyQuest::try_from).collect()
    }

    async fn find_active(&self, user_id: UserId, now: DateTime<Utc>) -> IkonResult<Vec<DailyQuest>> {
        debug!("Finding active quests for user {}", user_id);

        let rows = sqlx::query_as::<_, QuestRow>(&format!(
            "SELECT {QUEST_COLUMNS} FROM daily_quests \
             WHERE user_id = ? AND is_completed = FALSE AND expires_at > ? \
             ORDER BY expires_at ASC, id ASC"
        ))
        .bind(user_id.into_inner().to_string())
        .bind(now)
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(DailyQuest::try_from).collect()
    }

    async fn delete_expired(&self, user_id: UserId, now: DateTime<Utc>) -> IkonResult<u64> {
        let result = sqlx::query(
            "DELETE FROM daily_quests WHERE user_id = ? AND is_completed = FALSE AND expires_at < ?",
        )
        .bind(user_id.into_inner().to_string())
        .bind(now)
        .execute(self.pool.inner())
        .await?;

        debug!("Purged {} expired quests for user {}", result.rows_affected(), user_id);
        Ok(result.rows_affected())
    }

    async fn insert_daily_batch(
        &self,
        user_id: UserId,
        since: DateTime<Utc>,
        limit: usize,
        quests: &[DailyQuest],
    ) -> IkonResult<bool> {
        let user_key = user_id.into_inner().to_string();
        let mut tx = self.pool.inner().begin().await?;

        // Serialises concurrent generators for the same user.
        sqlx::query("SELECT id FROM users WHERE id = ? FOR UPDATE")
            .bind(&user_key)
            .fetch_optional(&mut *tx)
            .await?;

        let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM daily_quests WHERE user_id = ? AND created_at >= ?")
            .bind(&user_key)
            .bind(since)
            .fetch_one(&mut *tx)
            .await?;

        let existing = usize::try_from(existing).unwrap_or(usize::MAX);
        if existing.saturating_add(quests.len()) > limit {
            tx.rollback().await?;
            return Ok(false);
        }

        for quest in quests {
            Self::insert(&mut tx, quest).await?;
        }
        tx.commit().await?;

        debug!("Inserted {} daily quests for user {}", quests.len(), user_id);
        Ok(true)
    }

    async fn mark_completed(&self, id: QuestId, user_id: UserId, completed_at: DateTime<Utc>) -> IkonResult<bool> {
        debug!("Completing quest {} for user {}", id, user_id);

        let result = sqlx::query(
            r#"
            UPDATE daily_quests
            SET is_completed = TRUE, completed_at = ?, progress = 100
            WHERE id = ? AND user_id = ? AND is_completed = FALSE
            "#,
        )
        .bind(completed_at)
        .bind(id.into_inner().to_string())
        .bind(user_id.into_inner().to_string())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_progress(&self, id: QuestId, user_id: UserId, progress: u8) -> IkonResult<bool> {
        let result = sqlx::query("UPDATE daily_quests SET progress = ? WHERE id = ? AND user_id = ?")
            .bind(i32::from(progress))
            .bind(id.into_inner().to_string())
            .bind(user_id.into_inner().to_string())
            .execute(self.pool.inner())
            .await?;

        if result.rows_affected() > 0 {
            return Ok(true);
        }
        // unchanged rows report zero affected
        Ok(self
            .find_by_id(id)
            .await?
            .is_some_and(|quest| quest.user_id == user_id))
    }
}

impl std::fmt::Debug for MySqlQuestRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlQuestRepository").finish_non_exhaustive()
    }
}
