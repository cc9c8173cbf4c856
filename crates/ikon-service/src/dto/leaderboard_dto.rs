//! Leaderboard DTOs.

use chrono::{DateTime, Utc};
use ikon_core::domain::LeaderboardEntry;
use ikon_core::UserId;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Default and maximum size of the top-players list.
pub const MAX_TOP_PLAYERS: u32 = 100;

/// Query parameters of the top-players list.
#[derive(Debug, Clone, Default, Serialize, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
#[serde(rename_all = "camelCase")]
pub struct TopPlayersQuery {
    /// 1 to 100, defaults to 100.
    pub limit: Option<u32>,
}

/// Request for a friends-only leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FriendsLeaderboardRequest {
    #[validate(length(max = 200, message = "At most 200 user IDs"))]
    pub user_ids: Vec<UserId>,
}

/// Leaderboard entry response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntryResponse {
    pub user_id: UserId,
    pub username: String,
    pub level: u32,
    pub total_experience: i64,
    pub season_number: u32,
    pub rank: u32,
    pub score: i64,
    pub updated_at: DateTime<Utc>,
}

impl From<LeaderboardEntry> for LeaderboardEntryResponse {
    fn from(entry: LeaderboardEntry) -> Self {
        Self {
            user_id: entry.user_id,
            username: entry.username,
            level: entry.level,
            total_experience: entry.total_experience,
            season_number: entry.season_number,
            rank: entry.rank,
            score: entry.score,
            updated_at: entry.updated_at,
        }
    }
}

/// Outcome of a leaderboard recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum LeaderboardUpdate {
    /// The season partition was rewritten.
    Updated { season_number: u32, entries: usize },
    /// Another recomputation of the same season was already running.
    Skipped { season_number: u32 },
}
