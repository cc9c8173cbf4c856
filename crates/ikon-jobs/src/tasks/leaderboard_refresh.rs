//! Hourly leaderboard recomputation.

use crate::error::JobResult;
use crate::metrics::SchedulerMetrics;
use crate::task::ScheduledTask;
use async_trait::async_trait;
use ikon_service::{LeaderboardService, LeaderboardUpdate};
use std::sync::Arc;
use tracing::info;

/// Rewrites the current season from all users.
pub struct LeaderboardRefreshTask {
    leaderboard_service: Arc<dyn LeaderboardService>,
}

impl LeaderboardRefreshTask {
    pub const NAME: &'static str = "leaderboard_refresh";

    #[must_use]
    pub fn new(leaderboard_service: Arc<dyn LeaderboardService>) -> Self {
        Self { leaderboard_service }
    }
}

#[async_trait]
impl ScheduledTask for LeaderboardRefreshTask {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn run(&self) -> JobResult<()> {
        match self.leaderboard_service.update_leaderboard().await? {
            LeaderboardUpdate::Updated { season_number, entries } => {
                SchedulerMetrics::leaderboard_recomputed(season_number);
                info!(season_number, entries, "Leaderboard refreshed");
            }
            LeaderboardUpdate::Skipped { season_number } => {
                info!(season_number, "Leaderboard refresh skipped, another run in progress");
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for LeaderboardRefreshTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LeaderboardRefreshTask").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::JobError;
    use ikon_core::domain::SeasonInfo;
    use ikon_core::{IkonError, IkonResult, UserId};
    use ikon_service::LeaderboardEntryResponse;
    use mockall::mock;

    mock! {
        Leaderboard {}

        #[async_trait]
        impl LeaderboardService for Leaderboard {
            async fn update_leaderboard(&self) -> IkonResult<LeaderboardUpdate>;
            async fn get_top_players(&self, limit: Option<u32>) -> IkonResult<Vec<LeaderboardEntryResponse>>;
            async fn get_user_rank(&self, user_id: UserId) -> IkonResult<Option<LeaderboardEntryResponse>>;
            async fn get_friends_leaderboard(&self, user_ids: &[UserId]) -> IkonResult<Vec<LeaderboardEntryResponse>>;
            async fn get_season_info(&self) -> IkonResult<SeasonInfo>;
        }
    }

    #[tokio::test]
    async fn test_refresh_calls_service() {
        let mut service = MockLeaderboard::new();
        service
            .expect_update_leaderboard()
            .times(1)
            .returning(|| Ok(LeaderboardUpdate::Updated { season_number: 4, entries: 12 }));

        LeaderboardRefreshTask::new(Arc::new(service)).run().await.unwrap();
    }

    #[tokio::test]
    async fn test_skipped_refresh_is_not_an_error() {
        let mut service = MockLeaderboard::new();
        service
            .expect_update_leaderboard()
            .returning(|| Ok(LeaderboardUpdate::Skipped { season_number: 4 }));

        assert!(LeaderboardRefreshTask::new(Arc::new(service)).run().await.is_ok());
    }

    #[tokio::test]
    async fn test_service_failure_is_reported() {
        let mut service = MockLeaderboard::new();
        service
            .expect_update_leaderboard()
            .returning(|| Err(IkonError::Database("connection reset".to_string())));

        let err = LeaderboardRefreshTask::new(Arc::new(service)).run().await.unwrap_err();
        assert!(matches!(err, JobError::Service(_)));
    }
}
