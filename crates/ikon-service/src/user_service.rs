//! User service trait definition.

use crate::dto::{LoginStreakResponse, UserResponse};
use async_trait::async_trait;
use ikon_core::domain::TelegramProfile;
use ikon_core::{IkonResult, Interface, UserId};

/// Player progression: profile, gold, experience and login streaks.
#[async_trait]
pub trait UserService: Interface + Send + Sync {
    /// Registers a new player with a starter character, or refreshes the
    /// profile of a returning one.
    async fn create_or_update_user(&self, profile: &TelegramProfile) -> IkonResult<UserResponse>;

    /// Gets a user by ID.
    async fn get_user(&self, id: UserId) -> IkonResult<UserResponse>;

    /// Gets a user by Telegram ID.
    async fn get_user_by_telegram_id(&self, telegram_id: i64) -> IkonResult<UserResponse>;

    /// Grants experience, rolling it into levels.
    async fn update_user_experience(&self, id: UserId, amount: i64) -> IkonResult<UserResponse>;

    /// Adds (or with a negative amount, spends) gold.
    async fn update_user_gold(&self, id: UserId, amount: i64) -> IkonResult<UserResponse>;

    /// Registers today's login and advances the streak.
    async fn add_login_streak(&self, id: UserId) -> IkonResult<LoginStreakResponse>;

    /// Telegram chat IDs of every player.
    async fn list_notification_recipients(&self) -> IkonResult<Vec<i64>>;
}
