//! Leaderboard service trait definition.

use crate::dto::{LeaderboardEntryResponse, LeaderboardUpdate};
use async_trait::async_trait;
use ikon_core::domain::SeasonInfo;
use ikon_core::{IkonResult, Interface, UserId};

/// Seasonal leaderboard.
#[async_trait]
pub trait LeaderboardService: Interface + Send + Sync {
    /// Recomputes the current season from all users.
    async fn update_leaderboard(&self) -> IkonResult<LeaderboardUpdate>;

    /// Best players of the current season. `limit` defaults to 100 and is
    /// clamped to 1..=100.
    async fn get_top_players(&self, limit: Option<u32>) -> IkonResult<Vec<LeaderboardEntryResponse>>;

    /// The user's current-season entry, if ranked.
    async fn get_user_rank(&self, user_id: UserId) -> IkonResult<Option<LeaderboardEntryResponse>>;

    /// Current-season entries of the given users, by rank.
    async fn get_friends_leaderboard(&self, user_ids: &[UserId]) -> IkonResult<Vec<LeaderboardEntryResponse>>;

    /// Describes the current season.
    async fn get_season_info(&self) -> IkonResult<SeasonInfo>;
}
