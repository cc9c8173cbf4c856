//! MySQL user repository implementation.

use super::{parse_id, to_i32, to_u32};
use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ikon_core::domain::{User, UserStatistics};
use ikon_core::{IkonError, IkonResult, UserId};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const USER_COLUMNS: &str = r#"
    id, telegram_id, username, first_name, last_name, profile_picture,
    level, experience, gold, gems, login_streak, referral_code, referred_by,
    selected_character_id, total_quests_completed, total_games_played,
    total_games_won, total_gold_earned, total_play_time, joined_at,
    last_active_at, version
"#;

/// MySQL user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct MySqlUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    telegram_id: i64,
    username: Option<String>,
    first_name: String,
    last_name: Option<String>,
    profile_picture: Option<String>,
    level: i32,
    experience: i64,
    gold: i64,
    gems: i64,
    login_streak: i32,
    referral_code: String,
    referred_by: Option<String>,
    selected_character_id: Option<String>,
    total_quests_completed: i32,
    total_games_played: i32,
    total_games_won: i32,
    total_gold_earned: i64,
    total_play_time: i64,
    joined_at: DateTime<Utc>,
    last_active_at: DateTime<Utc>,
    version: i64,
}

impl TryFrom<UserRow> for User {
    type Error = IkonError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: parse_id(&row.id, "users.id")?,
            telegram_id: row.telegram_id,
            username: row.username,
            first_name: row.first_name,
            last_name: row.last_name,
            profile_picture: row.profile_picture,
            level: to_u32(row.level, "users.level")?,
            experience: row.experience,
            gold: row.gold,
            gems: row.gems,
            login_streak: to_u32(row.login_streak, "users.login_streak")?,
            referral_code: row.referral_code,
            referred_by: row.referred_by,
            selected_character_id: row
                .selected_character_id
                .as_deref()
                .map(|id| parse_id(id, "users.selected_character_id"))
                .transpose()?,
            statistics: UserStatistics {
                total_quests_completed: to_u32(row.total_quests_completed, "users.total_quests_completed")?,
                total_games_played: to_u32(row.total_games_played, "users.total_games_played")?,
                total_games_won: to_u32(row.total_games_won, "users.total_games_won")?,
                total_gold_earned: row.total_gold_earned,
            },
            total_play_time: row.total_play_time,
            joined_at: row.joined_at,
            last_active_at: row.last_active_at,
            version: u64::try_from(row.version)
                .map_err(|_| IkonError::Internal(format!("Negative version for user {}", row.id)))?,
        })
    }
}

fn version_param(version: u64) -> IkonResult<i64> {
    i64::try_from(version).map_err(|_| IkonError::internal("user version overflow"))
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> IkonResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id.into_inner().to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_telegram_id(&self, telegram_id: i64) -> IkonResult<Option<User>> {
        debug!("Finding user by telegram id: {}", telegram_id);

        let row = sqlx::query_as::<_, UserRow>(&format!("SELECT {USER_COLUMNS} FROM users WHERE telegram_id = ?"))
            .bind(telegram_id)
            .fetch_optional(self.pool.inner())
            .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_all_ranked(&self) -> IkonResult<Vec<User>> {
        debug!("Loading all users in ranking order");

        let rows = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY level DESC, experience DESC, joined_at ASC"
        ))
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn find_all_telegram_ids(&self) -> IkonResult<Vec<i64>> {
        let ids: Vec<i64> = sqlx::query_scalar("SELECT telegram_id FROM users ORDER BY joined_at ASC")
            .fetch_all(self.pool.inner())
            .await?;
        Ok(ids)
    }

    async fn save(&self, user: &User) -> IkonResult<User> {
        debug!("Saving new user for telegram id: {}", user.telegram_id);

        sqlx::query(
            r#"
            INSERT INTO users (id, telegram_id, username, first_name, last_name, profile_picture,
                               level, experience, gold, gems, login_streak, referral_code, referred_by,
                               selected_character_id, total_quests_completed, total_games_played,
                               total_games_won, total_gold_earned, total_play_time, joined_at,
                               last_active_at, version)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(user.id.into_inner().to_string())
        .bind(user.telegram_id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.profile_picture)
        .bind(to_i32(user.level, "level")?)
        .bind(user.experience)
        .bind(user.gold)
        .bind(user.gems)
        .bind(to_i32(user.login_streak, "login_streak")?)
        .bind(&user.referral_code)
        .bind(&user.referred_by)
        .bind(user.selected_character_id.map(|id| id.into_inner().to_string()))
        .bind(to_i32(user.statistics.total_quests_completed, "total_quests_completed")?)
        .bind(to_i32(user.statistics.total_games_played, "total_games_played")?)
        .bind(to_i32(user.statistics.total_games_won, "total_games_won")?)
        .bind(user.statistics.total_gold_earned)
        .bind(user.total_play_time)
        .bind(user.joined_at)
        .bind(user.last_active_at)
        .bind(version_param(user.version)?)
        .execute(self.pool.inner())
        .await?;

        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> IkonResult<User> {
        debug!("Updating user: {} (version {})", user.id, user.version);

        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = ?, first_name = ?, last_name = ?, profile_picture = ?,
                level = ?, experience = ?, gold = ?, gems = ?, login_streak = ?,
                referred_by = ?, selected_character_id = ?, total_quests_completed = ?,
                total_games_played = ?, total_games_won = ?, total_gold_earned = ?,
                total_play_time = ?, last_active_at = ?, version = version + 1
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.profile_picture)
        .bind(to_i32(user.level, "level")?)
        .bind(user.experience)
        .bind(user.gold)
        .bind(user.gems)
        .bind(to_i32(user.login_streak, "login_streak")?)
        .bind(&user.referred_by)
        .bind(user.selected_character_id.map(|id| id.into_inner().to_string()))
        .bind(to_i32(user.statistics.total_quests_completed, "total_quests_completed")?)
        .bind(to_i32(user.statistics.total_games_played, "total_games_played")?)
        .bind(to_i32(user.statistics.total_games_won, "total_games_won")?)
        .bind(user.statistics.total_gold_earned)
        .bind(user.total_play_time)
        .bind(user.last_active_at)
        .bind(user.id.into_inner().to_string())
        .bind(version_param(user.version)?)
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 {
            return Err(IkonError::conflict(format!(
                "User {} was modified concurrently (expected version {})",
                user.id, user.version
            )));
        }

        let mut updated = user.clone();
        updated.version += 1;
        Ok(updated)
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
