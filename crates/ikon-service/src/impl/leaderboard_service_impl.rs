//! Leaderboard service implementation.

use crate::dto::{LeaderboardEntryResponse, LeaderboardUpdate, MAX_TOP_PLAYERS};
use crate::leaderboard_service::LeaderboardService;
use async_trait::async_trait;
use chrono::Utc;
use ikon_core::domain::{rank_users, season_number_at, SeasonInfo};
use ikon_core::{IkonResult, UserId};
use ikon_repository::{LeaderboardRepository, UserRepository};
use parking_lot::Mutex;
use shaku::Component;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info};

/// Leaderboard service component for Shaku DI.
#[derive(Component)]
#[shaku(interface = LeaderboardService)]
pub struct LeaderboardServiceComponent {
    #[shaku(inject)]
    leaderboard_repository: Arc<dyn LeaderboardRepository>,
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    /// Seasons currently being recomputed.
    #[shaku(default)]
    in_flight: Mutex<HashSet<u32>>,
}

impl LeaderboardServiceComponent {
    /// Creates a new leaderboard service.
    pub fn new(
        leaderboard_repository: Arc<dyn LeaderboardRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            leaderboard_repository,
            user_repository,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    fn try_claim(&self, season_number: u32) -> Option<SeasonClaim<'_>> {
        if self.in_flight.lock().insert(season_number) {
            Some(SeasonClaim {
                in_flight: &self.in_flight,
                season_number,
            })
        } else {
            None
        }
    }

    async fn recompute(&self, season_number: u32) -> IkonResult<usize> {
        let users = self.user_repository.find_all_ranked().await?;
        let entries = rank_users(users, season_number, Utc::now());
        self.leaderboard_repository.replace_season(season_number, &entries).await?;
        Ok(entries.len())
    }
}

/// Releases a season claim when the recomputation ends, even on error.
struct SeasonClaim<'a> {
    in_flight: &'a Mutex<HashSet<u32>>,
    season_number: u32,
}

impl Drop for SeasonClaim<'_> {
    fn drop(&mut self) {
        self.in_flight.lock().remove(&self.season_number);
    }
}

#[async_trait]
impl LeaderboardService for LeaderboardServiceComponent {
    async fn update_leaderboard(&self) -> IkonResult<LeaderboardUpdate> {
        let season_number = season_number_at(Utc::now());
        let Some(_claim) = self.try_claim(season_number) else {
            debug!(season_number, "Leaderboard update already running");
            return Ok(LeaderboardUpdate::Skipped { season_number });
        };

        let entries = self.recompute(season_number).await?;
        info!(season_number, entries, "Leaderboard updated");
        Ok(LeaderboardUpdate::Updated { season_number, entries })
    }

    async fn get_top_players(&self, limit: Option<u32>) -> IkonResult<Vec<LeaderboardEntryResponse>> {
        let limit = limit.unwrap_or(MAX_TOP_PLAYERS).clamp(1, MAX_TOP_PLAYERS);
        let entries = self
            .leaderboard_repository
            .find_top(season_number_at(Utc::now()), limit)
            .await?;
        Ok(entries.into_iter().map(LeaderboardEntryResponse::from).collect())
    }

    async fn get_user_rank(&self, user_id: UserId) -> IkonResult<Option<LeaderboardEntryResponse>> {
        let entry = self
            .leaderboard_repository
            .find_by_user(season_number_at(Utc::now()), user_id)
            .await?;
        Ok(entry.map(LeaderboardEntryResponse::from))
    }

    async fn get_friends_leaderboard(&self, user_ids: &[UserId]) -> IkonResult<Vec<LeaderboardEntryResponse>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let mut entries = self
            .leaderboard_repository
            .find_by_users(season_number_at(Utc::now()), user_ids)
            .await?;
        entries.sort_by_key(|e| e.rank);
        Ok(entries.into_iter().map(LeaderboardEntryResponse::from).collect())
    }

    async fn get_season_info(&self) -> IkonResult<SeasonInfo> {
        SeasonInfo::at(Utc::now())
    }
}

impl std::fmt::Debug for LeaderboardServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderboardServiceComponent")
            .field("in_flight", &*self.in_flight.lock())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ikon_core::domain::{TelegramProfile, User};
    use ikon_repository::{InMemoryLeaderboardRepository, InMemoryUserRepository};

    async fn seed(users: &InMemoryUserRepository, telegram_id: i64, name: &str, level: u32, experience: i64) -> User {
        let mut user = User::from_telegram(&TelegramProfile::new(telegram_id, name), Utc::now());
        user.level = level;
        user.experience = experience;
        users.save(&user).await.unwrap()
    }

    fn service(users: Arc<InMemoryUserRepository>) -> LeaderboardServiceComponent {
        LeaderboardServiceComponent::new(Arc::new(InMemoryLeaderboardRepository::new()), users)
    }

    #[tokio::test]
    async fn test_update_ranks_all_users() {
        let users = Arc::new(InMemoryUserRepository::new());
        let low = seed(&users, 1, "low", 2, 90).await;
        let top = seed(&users, 2, "top", 5, 10).await;
        seed(&users, 3, "mid", 2, 95).await;
        let service = service(users);

        let update = service.update_leaderboard().await.unwrap();
        let season_number = season_number_at(Utc::now());
        assert_eq!(update, LeaderboardUpdate::Updated { season_number, entries: 3 });

        let top_players = service.get_top_players(None).await.unwrap();
        let names: Vec<_> = top_players.iter().map(|e| e.username.as_str()).collect();
        assert_eq!(names, ["top", "mid", "low"]);
        assert_eq!(top_players[0].user_id, top.id);
        assert_eq!(top_players[0].score, 5_010);

        let rank = service.get_user_rank(low.id).await.unwrap().unwrap();
        assert_eq!(rank.rank, 3);
    }

    #[tokio::test]
    async fn test_update_is_idempotent() {
        let users = Arc::new(InMemoryUserRepository::new());
        seed(&users, 1, "a", 3, 0).await;
        seed(&users, 2, "b", 1, 50).await;
        let service = service(users);

        service.update_leaderboard().await.unwrap();
        let first = service.get_top_players(None).await.unwrap();
        service.update_leaderboard().await.unwrap();
        let second = service.get_top_players(None).await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(
            first.iter().map(|e| (e.user_id, e.rank)).collect::<Vec<_>>(),
            second.iter().map(|e| (e.user_id, e.rank)).collect::<Vec<_>>()
        );
    }

    #[tokio::test]
    async fn test_overlapping_update_is_skipped() {
        let service = service(Arc::new(InMemoryUserRepository::new()));
        let season_number = season_number_at(Utc::now());

        let claim = service.try_claim(season_number);
        assert!(claim.is_some());
        assert_eq!(
            service.update_leaderboard().await.unwrap(),
            LeaderboardUpdate::Skipped { season_number }
        );

        drop(claim);
        assert!(matches!(
            service.update_leaderboard().await.unwrap(),
            LeaderboardUpdate::Updated { .. }
        ));
    }

    #[tokio::test]
    async fn test_top_players_limit_is_clamped() {
        let users = Arc::new(InMemoryUserRepository::new());
        for i in 0..3 {
            seed(&users, 10 + i, &format!("p{i}"), 1, i).await;
        }
        let service = service(users);
        service.update_leaderboard().await.unwrap();

        assert_eq!(service.get_top_players(Some(0)).await.unwrap().len(), 1);
        assert_eq!(service.get_top_players(Some(2)).await.unwrap().len(), 2);
        assert_eq!(service.get_top_players(Some(500)).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unranked_user_has_no_rank() {
        let service = service(Arc::new(InMemoryUserRepository::new()));
        service.update_leaderboard().await.unwrap();

        assert!(service.get_user_rank(UserId::new()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_friends_leaderboard_filters_and_orders() {
        let users = Arc::new(InMemoryUserRepository::new());
        let a = seed(&users, 1, "a", 1, 10).await;
        seed(&users, 2, "b", 9, 0).await;
        let c = seed(&users, 3, "c", 4, 0).await;
        let service = service(users);
        service.update_leaderboard().await.unwrap();

        let friends = service.get_friends_leaderboard(&[a.id, c.id, UserId::new()]).await.unwrap();
        let ranks: Vec<_> = friends.iter().map(|e| (e.user_id, e.rank)).collect();
        assert_eq!(ranks, [(c.id, 2), (a.id, 3)]);

        assert!(service.get_friends_leaderboard(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_season_info_is_current() {
        let service = service(Arc::new(InMemoryUserRepository::new()));
        let info = service.get_season_info().await.unwrap();
        assert_eq!(info.season_number, season_number_at(Utc::now()));
        assert!(info.days_remaining >= 0);
    }
}
