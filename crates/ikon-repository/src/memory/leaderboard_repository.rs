//! In-memory leaderboard repository.

use crate::traits::LeaderboardRepository;
use async_trait::async_trait;
use ikon_core::domain::LeaderboardEntry;
use ikon_core::{IkonResult, UserId};
use parking_lot::RwLock;
use shaku::Component;
use std::collections::HashMap;

/// In-memory leaderboard repository, keyed by season.
#[derive(Component, Default, Debug)]
#[shaku(interface = LeaderboardRepository)]
pub struct InMemoryLeaderboardRepository {
    #[shaku(default)]
    seasons: RwLock<HashMap<u32, Vec<LeaderboardEntry>>>,
}

impl InMemoryLeaderboardRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeaderboardRepository for InMemoryLeaderboardRepository {
    async fn replace_season(&self, season_number: u32, entries: &[LeaderboardEntry]) -> IkonResult<()> {
        let mut ranked = entries.to_vec();
        ranked.sort_by_key(|e| e.rank);
        self.seasons.write().insert(season_number, ranked);
        Ok(())
    }

    async fn find_top(&self, season_number: u32, limit: u32) -> IkonResult<Vec<LeaderboardEntry>> {
        Ok(self
            .seasons
            .read()
            .get(&season_number)
            .map(|entries| entries.iter().take(limit as usize).cloned().collect())
            .unwrap_or_default())
    }

    async fn find_by_user(&self, season_number: u32, user_id: UserId) -> IkonResult<Option<LeaderboardEntry>> {
        Ok(self
            .seasons
            .read()
            .get(&season_number)
            .and_then(|entries| entries.iter().find(|e| e.user_id == user_id).cloned()))
    }

    async fn find_by_users(&self, season_number: u32, user_ids: &[UserId]) -> IkonResult<Vec<LeaderboardEntry>> {
        Ok(self
            .seasons
            .read()
            .get(&season_number)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| user_ids.contains(&e.user_id))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }
}
