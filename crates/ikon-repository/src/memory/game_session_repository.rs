//! In-memory game session repository.

use crate::traits::GameSessionRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ikon_core::domain::GameSession;
use ikon_core::{IkonResult, UserId};
use parking_lot::RwLock;
use shaku::Component;

/// In-memory game session repository.
#[derive(Component, Default, Debug)]
#[shaku(interface = GameSessionRepository)]
pub struct InMemoryGameSessionRepository {
    #[shaku(default)]
    sessions: RwLock<Vec<GameSession>>,
}

impl InMemoryGameSessionRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameSessionRepository for InMemoryGameSessionRepository {
    async fn insert_within_limit(&self, session: &GameSession, since: DateTime<Utc>, limit: u32) -> IkonResult<bool> {
        let mut sessions = self.sessions.write();
        let played = sessions
            .iter()
            .filter(|s| s.user_id == session.user_id && s.played_at >= since)
            .count();
        if played >= limit as usize {
            return Ok(false);
        }
        sessions.push(session.clone());
        Ok(true)
    }

    async fn count_since(&self, user_id: UserId, since: DateTime<Utc>) -> IkonResult<u32> {
        let count = self
            .sessions
            .read()
            .iter()
            .filter(|s| s.user_id == user_id && s.played_at >= since)
            .count();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }

    async fn find_since(&self, user_id: UserId, since: DateTime<Utc>) -> IkonResult<Vec<GameSession>> {
        let mut sessions: Vec<GameSession> = self
            .sessions
            .read()
            .iter()
            .filter(|s| s.user_id == user_id && s.played_at >= since)
            .cloned()
            .collect();
        sessions.sort_by_key(|s| s.played_at);
        Ok(sessions)
    }
}
