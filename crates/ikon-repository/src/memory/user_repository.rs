//! In-memory user repository.

use crate::traits::UserRepository;
use async_trait::async_trait;
use ikon_core::domain::User;
use ikon_core::{IkonError, IkonResult, UserId};
use parking_lot::RwLock;
use shaku::Component;
use std::collections::HashMap;
use tracing::debug;

/// In-memory user repository.
#[derive(Component, Default, Debug)]
#[shaku(interface = UserRepository)]
pub struct InMemoryUserRepository {
    #[shaku(default)]
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> IkonResult<Option<User>> {
        Ok(self.users.read().get(&id).cloned())
    }

    async fn find_by_telegram_id(&self, telegram_id: i64) -> IkonResult<Option<User>> {
        Ok(self
            .users
            .read()
            .values()
            .find(|u| u.telegram_id == telegram_id)
            .cloned())
    }

    async fn find_all_ranked(&self) -> IkonResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().values().cloned().collect();
        users.sort_by(|a, b| {
            b.level
                .cmp(&a.level)
                .then(b.experience.cmp(&a.experience))
                .then(a.joined_at.cmp(&b.joined_at))
        });
        Ok(users)
    }

    async fn find_all_telegram_ids(&self) -> IkonResult<Vec<i64>> {
        Ok(self.users.read().values().map(|u| u.telegram_id).collect())
    }

    async fn save(&self, user: &User) -> IkonResult<User> {
        let mut users = self.users.write();
        if users.values().any(|u| u.telegram_id == user.telegram_id) {
            return Err(IkonError::conflict(format!(
                "User with Telegram ID {} already exists",
                user.telegram_id
            )));
        }
        if users.values().any(|u| u.referral_code == user.referral_code) {
            return Err(IkonError::conflict("Referral code already in use"));
        }
        users.insert(user.id, user.clone());
        debug!("Saved user {}", user.id);
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> IkonResult<User> {
        let mut users = self.users.write();
        let stored = users
            .get_mut(&user.id)
            .ok_or_else(|| IkonError::not_found("User", user.id))?;

        if stored.version != user.version {
            return Err(IkonError::conflict(format!(
                "User {} was modified concurrently",
                user.id
            )));
        }

        let mut updated = user.clone();
        updated.version += 1;
        *stored = updated.clone();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use ikon_core::domain::TelegramProfile;

    fn user(telegram_id: i64) -> User {
        User::from_telegram(&TelegramProfile::new(telegram_id, "Player"), Utc::now())
    }

    #[tokio::test]
    async fn test_save_rejects_duplicate_telegram_id() {
        let repo = InMemoryUserRepository::new();
        repo.save(&user(7)).await.unwrap();

        let err = repo.save(&user(7)).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(repo.find_all_telegram_ids().await.unwrap(), [7]);
    }

    #[tokio::test]
    async fn test_update_bumps_version() {
        let repo = InMemoryUserRepository::new();
        let mut saved = repo.save(&user(1)).await.unwrap();
        saved.gold = 500;

        let updated = repo.update(&saved).await.unwrap();
        assert_eq!(updated.version, saved.version + 1);

        let stored = repo.find_by_telegram_id(1).await.unwrap().unwrap();
        assert_eq!(stored.gold, 500);
        assert_eq!(stored.version, updated.version);
    }

    #[tokio::test]
    async fn test_stale_update_conflicts() {
        let repo = InMemoryUserRepository::new();
        let saved = repo.save(&user(1)).await.unwrap();

        let mut first = saved.clone();
        first.gold += 10;
        repo.update(&first).await.unwrap();

        let mut stale = saved;
        stale.gold += 20;
        assert!(repo.update(&stale).await.unwrap_err().is_conflict());
        assert_eq!(repo.find_by_id(first.id).await.unwrap().unwrap().gold, first.gold);
    }

    #[tokio::test]
    async fn test_find_all_ranked_breaks_ties_by_join_date() {
        let repo = InMemoryUserRepository::new();
        let now = Utc::now();

        let mut early = user(1);
        early.level = 3;
        early.joined_at = now - Duration::days(2);
        let mut late = user(2);
        late.level = 3;
        late.joined_at = now;
        let mut top = user(3);
        top.level = 4;

        for u in [&late, &top, &early] {
            repo.save(u).await.unwrap();
        }

        let ranked: Vec<_> = repo
            .find_all_ranked()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.telegram_id)
            .collect();
        assert_eq!(ranked, [3, 1, 2]);
    }
}
