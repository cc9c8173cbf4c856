//! Leaderboard entries and the ranking rule.

use crate::domain::entities::User;
use crate::{LeaderboardEntryId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Weight of one level in the leaderboard score.
pub const LEVEL_SCORE_WEIGHT: i64 = 1_000;

/// A user's ranked position within one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: LeaderboardEntryId,
    pub user_id: UserId,
    pub username: String,
    pub level: u32,
    pub total_experience: i64,
    pub season_number: u32,
    pub rank: u32,
    pub score: i64,
    pub updated_at: DateTime<Utc>,
}

/// Orders users by level then experience, both descending.
///
/// Ties keep their input order.
pub fn sort_for_ranking(users: &mut [User]) {
    users.sort_by(|a, b| b.level.cmp(&a.level).then(b.experience.cmp(&a.experience)));
}

/// Builds the full, ranked entry set for a season.
#[must_use]
pub fn rank_users(mut users: Vec<User>, season_number: u32, now: DateTime<Utc>) -> Vec<LeaderboardEntry> {
    sort_for_ranking(&mut users);
    users
        .iter()
        .zip(1u32..)
        .map(|(user, rank)| LeaderboardEntry {
            id: LeaderboardEntryId::new(),
            user_id: user.id,
            username: user.display_name().to_string(),
            level: user.level,
            total_experience: user.experience,
            season_number,
            rank,
            score: i64::from(user.level) * LEVEL_SCORE_WEIGHT + user.experience,
            updated_at: now,
        })
        .collect()
}
