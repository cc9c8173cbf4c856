//! MySQL leaderboard repository implementation.

use super::{parse_id, to_i32, to_u32};
use crate::{traits::LeaderboardRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ikon_core::domain::LeaderboardEntry;
use ikon_core::{IkonError, IkonResult, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::{debug, info};

const ENTRY_COLUMNS: &str = r#"
    id, user_id, username, level, total_experience, season_number,
    rank_position, score, updated_at
"#;

/// MySQL leaderboard repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = LeaderboardRepository)]
pub struct MySqlLeaderboardRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlLeaderboardRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct LeaderboardRow {
    id: String,
    user_id: String,
    username: String,
    level: i32,
    total_experience: i64,
    season_number: i32,
    rank_position: i32,
    score: i64,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LeaderboardRow> for LeaderboardEntry {
    type Error = IkonError;

    fn try_from(row: LeaderboardRow) -> Result<Self, Self::Error> {
        Ok(LeaderboardEntry {
            id: parse_id(&row.id, "leaderboard_entries.id")?,
            user_id: parse_id(&row.user_id, "leaderboard_entries.user_id")?,
            username: row.username,
            level: to_u32(row.level, "leaderboard_entries.level")?,
            total_experience: row.total_experience,
            season_number: to_u32(row.season_number, "leaderboard_entries.season_number")?,
            rank: to_u32(row.rank_position, "leaderboard_entries.rank_position")?,
            score: row.score,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl LeaderboardRepository for MySqlLeaderboardRepository {
    async fn replace_season(&self, season_number: u32, entries: &[LeaderboardEntry]) -> IkonResult<()> {
        let season = to_i32(season_number, "season_number")?;
        let mut tx = self.pool.inner().begin().await?;

        sqlx::query("DELETE FROM leaderboard_entries WHERE season_number = ?")
            .bind(season)
            .execute(&mut *tx)
            .await?;

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO leaderboard_entries (id, user_id, username, level, total_experience,
                                                 season_number, rank_position, score, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(entry.id.into_inner().to_string())
            .bind(entry.user_id.into_inner().to_string())
            .bind(&entry.username)
            .bind(to_i32(entry.level, "level")?)
            .bind(entry.total_experience)
            .bind(season)
            .bind(to_i32(entry.rank, "rank")?)
            .bind(entry.score)
            .bind(entry.updated_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("Replaced leaderboard for season {} with {} entries", season_number, entries.len());
        Ok(())
    }

    async fn find_top(&self, season_number: u32, limit: u32) -> IkonResult<Vec<LeaderboardEntry>> {
        debug!("Finding top {} entries of season {}", limit, season_number);

        let rows = sqlx::query_as::<_, LeaderboardRow>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM leaderboard_entries WHERE season_number = ? ORDER BY rank_position ASC LIMIT ?"
        ))
        .bind(to_i32(season_number, "season_number")?)
        .bind(limit)
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(LeaderboardEntry::try_from).collect()
    }

    async fn find_by_user(&self, season_number: u32, user_id: UserId) -> IkonResult<Option<LeaderboardEntry>> {
        debug!("Finding season {} entry for user {}", season_number, user_id);

        let row = sqlx::query_as::<_, LeaderboardRow>(&format!(
            "SELECT {ENTRY_COLUMNS} FROM leaderboard_entries WHERE season_number = ? AND user_id = ?"
        ))
        .bind(to_i32(season_number, "season_number")?)
        .bind(user_id.into_inner().to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(LeaderboardEntry::try_from).transpose()
    }

    async fn find_by_users(&self, season_number: u32, user_ids: &[UserId]) -> IkonResult<Vec<LeaderboardEntry>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        debug!("Finding season {} entries for {} users", season_number, user_ids.len());

        let placeholders = vec!["?"; user_ids.len()].join(", ");
        let sql = format!(
            "SELECT {ENTRY_COLUMNS} FROM leaderboard_entries \
             WHERE season_number = ? AND user_id IN ({placeholders}) \
             ORDER BY rank_position ASC"
        );

        let mut query = sqlx::query_as::<_, LeaderboardRow>(&sql).bind(to_i32(season_number, "season_number")?);
        for user_id in user_ids {
            query = query.bind(user_id.into_inner().to_string());
        }

        let rows = query.fetch_all(self.pool.inner()).await?;
        rows.into_iter().map(LeaderboardEntry::try_from).collect()
    }
}

impl std::fmt::Debug for MySqlLeaderboardRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlLeaderboardRepository").finish_non_exhaustive()
    }
}
