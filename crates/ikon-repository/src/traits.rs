//! Repository trait definitions.

use chrono::{DateTime, Utc};
use ikon_core::domain::{Character, DailyQuest, GameSession, LeaderboardEntry, User};
use ikon_core::{CharacterId, IkonResult, Interface, QuestId, UserId};
use async_trait::async_trait;

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> IkonResult<Option<User>>;

    /// Finds a user by Telegram ID.
    async fn find_by_telegram_id(&self, telegram_id: i64) -> IkonResult<Option<User>>;

    /// Returns every user ordered by level, then experience, both descending.
    async fn find_all_ranked(&self) -> IkonResult<Vec<User>>;

    /// Returns the Telegram IDs of all users.
    async fn find_all_telegram_ids(&self) -> IkonResult<Vec<i64>>;

    /// Saves a new user. Fails with `Conflict` on a duplicate Telegram ID.
    async fn save(&self, user: &User) -> IkonResult<User>;

    /// Updates a user if its stored version still matches `user.version`.
    ///
    /// Returns the user with the bumped version, or `Conflict` when another
    /// writer got there first.
    async fn update(&self, user: &User) -> IkonResult<User>;
}

/// Character repository trait.
#[async_trait]
pub trait CharacterRepository: Interface + Send + Sync {
    /// Finds a character by ID.
    async fn find_by_id(&self, id: CharacterId) -> IkonResult<Option<Character>>;

    /// Lists a user's characters, oldest first.
    async fn find_by_user(&self, user_id: UserId) -> IkonResult<Vec<Character>>;

    /// Saves a new character.
    async fn save(&self, character: &Character) -> IkonResult<Character>;

    /// Updates an existing character.
    async fn update(&self, character: &Character) -> IkonResult<Character>;
}

/// Daily quest repository trait.
#[async_trait]
pub trait QuestRepository: Interface + Send + Sync {
    /// Finds a quest by ID.
    async fn find_by_id(&self, id: QuestId) -> IkonResult<Option<DailyQuest>>;

    /// Lists a user's quests created at or after `since`, oldest first.
    async fn find_created_since(&self, user_id: UserId, since: DateTime<Utc>) -> IkonResult<Vec<DailyQuest>>;

    /// Lists incomplete quests expiring after `now`, soonest first.
    async fn find_active(&self, user_id: UserId, now: DateTime<Utc>) -> IkonResult<Vec<DailyQuest>>;

    /// Deletes the user's incomplete quests that expired before `now`.
    async fn delete_expired(&self, user_id: UserId, now: DateTime<Utc>) -> IkonResult<u64>;

    /// Inserts a batch unless it would take the user past `limit` quests
    /// created since `since`. The count and insert are atomic per user.
    ///
    /// Returns `false` when nothing was inserted.
    async fn insert_daily_batch(
        &self,
        user_id: UserId,
        since: DateTime<Utc>,
        limit: usize,
        quests: &[DailyQuest],
    ) -> IkonResult<bool>;

    /// Marks a quest completed if it belongs to the user and is still open.
    ///
    /// Returns `false` when no row matched.
    async fn mark_completed(&self, id: QuestId, user_id: UserId, completed_at: DateTime<Utc>) -> IkonResult<bool>;

    /// Sets the progress of a user's quest.
    async fn update_progress(&self, id: QuestId, user_id: UserId, progress: u8) -> IkonResult<bool>;
}

/// Game session repository trait.
#[async_trait]
pub trait GameSessionRepository: Interface + Send + Sync {
    /// Inserts a session unless the user already played `limit` games since
    /// `since`. The count and insert are atomic per user.
    ///
    /// Returns `false` when the limit was reached.
    async fn insert_within_limit(&self, session: &GameSession, since: DateTime<Utc>, limit: u32) -> IkonResult<bool>;

    /// Counts a user's sessions played at or after `since`.
    async fn count_since(&self, user_id: UserId, since: DateTime<Utc>) -> IkonResult<u32>;

    /// Lists a user's sessions played at or after `since`, oldest first.
    async fn find_since(&self, user_id: UserId, since: DateTime<Utc>) -> IkonResult<Vec<GameSession>>;
}

/// Leaderboard repository trait.
#[async_trait]
pub trait LeaderboardRepository: Interface + Send + Sync {
    /// Atomically replaces all entries of a season.
    async fn replace_season(&self, season_number: u32, entries: &[LeaderboardEntry]) -> IkonResult<()>;

    /// Returns the best `limit` entries of a season, by rank.
    async fn find_top(&self, season_number: u32, limit: u32) -> IkonResult<Vec<LeaderboardEntry>>;

    /// Finds a user's entry in a season.
    async fn find_by_user(&self, season_number: u32, user_id: UserId) -> IkonResult<Option<LeaderboardEntry>>;

    /// Finds the entries of several users in a season, by rank.
    async fn find_by_users(&self, season_number: u32, user_ids: &[UserId]) -> IkonResult<Vec<LeaderboardEntry>>;
}
