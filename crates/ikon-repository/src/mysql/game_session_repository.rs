//! MySQL game session repository implementation.

use super::{parse_enum, parse_id};
use crate::{traits::GameSessionRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ikon_core::domain::GameSession;
use ikon_core::{IkonError, IkonResult, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

/// MySQL game session repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = GameSessionRepository)]
pub struct MySqlGameSessionRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlGameSessionRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct GameSessionRow {
    id: String,
    user_id: String,
    game_type: String,
    score: i64,
    result: String,
    duration: i64,
    difficulty: i32,
    gold_earned: i64,
    experience_earned: i64,
    played_at: DateTime<Utc>,
}

impl TryFrom<GameSessionRow> for GameSession {
    type Error = IkonError;

    fn try_from(row: GameSessionRow) -> Result<Self, Self::Error> {
        Ok(GameSession {
            id: parse_id(&row.id, "game_sessions.id")?,
            user_id: parse_id(&row.user_id, "game_sessions.user_id")?,
            game_type: parse_enum(&row.game_type)?,
            score: row.score,
            result: parse_enum(&row.result)?,
            duration: row.duration,
            difficulty: u8::try_from(row.difficulty)
                .map_err(|_| IkonError::Internal(format!("Invalid difficulty: {}", row.difficulty)))?,
            gold_earned: row.gold_earned,
            experience_earned: row.experience_earned,
            played_at: row.played_at,
        })
    }
}

#[async_trait]
impl GameSessionRepository for MySqlGameSessionRepository {
    async fn insert_within_limit(&self, session: &GameSession, since: DateTime<Utc>, limit: u32) -> IkonResult<bool> {
        let user_key = session.user_id.into_inner().to_string();
        let mut tx = self.pool.inner().begin().await?;

        // Row lock on the player keeps the count and insert atomic.
        sqlx::query("SELECT id FROM users WHERE id = ? FOR UPDATE")
            .bind(&user_key)
            .fetch_optional(&mut *tx)
            .await?;

        let played: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM game_sessions WHERE user_id = ? AND played_at >= ?")
            .bind(&user_key)
            .bind(since)
            .fetch_one(&mut *tx)
            .await?;

        if played >= i64::from(limit) {
            tx.rollback().await?;
            debug!("User {} reached the daily game limit ({})", session.user_id, limit);
            return Ok(false);
        }

        sqlx::query(
            r#"
            INSERT INTO game_sessions (id, user_id, game_type, score, result, duration,
                                       difficulty, gold_earned, experience_earned, played_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session.id.into_inner().to_string())
        .bind(&user_key)
        .bind(session.game_type.as_str())
        .bind(session.score)
        .bind(session.result.as_str())
        .bind(session.duration)
        .bind(i32::from(session.difficulty))
        .bind(session.gold_earned)
        .bind(session.experience_earned)
        .bind(session.played_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        debug!("Recorded game session {} for user {}", session.id, session.user_id);
        Ok(true)
    }

    async fn count_since(&self, user_id: UserId, since: DateTime<Utc>) -> IkonResult<u32> {
        debug!("Counting games for user {} since {}", user_id, since);

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM game_sessions WHERE user_id = ? AND played_at >= ?")
            .bind(user_id.into_inner().to_string())
            .bind(since)
            .fetch_one(self.pool.inner())
            .await?;

        u32::try_from(count).map_err(|_| IkonError::Internal(format!("Game count out of range: {}", count)))
    }

    async fn find_since(&self, user_id: UserId, since: DateTime<Utc>) -> IkonResult<Vec<GameSession>> {
        debug!("Finding games for user {} since {}", user_id, since);

        let rows = sqlx::query_as::<_, GameSessionRow>(
            r#"
            SELECT id, user_id, game_type, score, result, duration, difficulty,
                   gold_earned, experience_earned, played_at
            FROM game_sessions
            WHERE user_id = ? AND played_at >= ?
            ORDER BY played_at ASC
            "#,
        )
        .bind(user_id.into_inner().to_string())
        .bind(since)
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(GameSession::try_from).collect()
    }
}

impl std::fmt::Debug for MySqlGameSessionRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlGameSessionRepository").finish_non_exhaustive()
    }
}
