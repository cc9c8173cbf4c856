//! Integration tests for the quest, game session and leaderboard
//! repositories.
//!
//! Requires Docker to be available on the system.

mod common;

use chrono::{Duration, Utc};
use ikon_core::calendar::local_day_end;
use ikon_core::domain::{rank_users, DailyQuest, GameResult, GameSession, GameType, QUEST_TEMPLATES};
use ikon_repository::{
    GameSessionRepository, LeaderboardRepository, MySqlGameSessionRepository, MySqlLeaderboardRepository,
    MySqlQuestRepository, MySqlUserRepository, QuestRepository, UserRepository,
};
use common::{player, TestDatabase};
use std::sync::Arc;

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_daily_batch_is_inserted_once() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let quests = MySqlQuestRepository::new(db.pool());

    let user = users.save(&player(10, "Quester")).await.unwrap();
    let now = Utc::now();
    let since = now - Duration::hours(1);
    let batch: Vec<DailyQuest> = QUEST_TEMPLATES
        .iter()
        .map(|t| DailyQuest::from_template(user.id, t, user.level, now, local_day_end(now)))
        .collect();

    assert!(quests.insert_daily_batch(user.id, since, batch.len(), &batch).await.unwrap());
    assert!(!quests.insert_daily_batch(user.id, since, batch.len(), &batch).await.unwrap());
    assert_eq!(quests.find_created_since(user.id, since).await.unwrap().len(), batch.len());

    let first = batch[0].id;
    assert!(quests.mark_completed(first, user.id, now).await.unwrap());
    assert!(!quests.mark_completed(first, user.id, now).await.unwrap());
    assert_eq!(quests.find_active(user.id, now).await.unwrap().len(), batch.len() - 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_concurrent_game_inserts_respect_limit() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let games = Arc::new(MySqlGameSessionRepository::new(db.pool()));

    let user = users.save(&player(11, "Gamer")).await.unwrap();
    let now = Utc::now();
    let since = now - Duration::hours(1);

    let mut handles = Vec::new();
    for _ in 0..8 {
        let games = Arc::clone(&games);
        let user_id = user.id;
        handles.push(tokio::spawn(async move {
            let session = GameSession::record(user_id, GameType::Reaction, 100, GameResult::Win, 5_000, 1, now);
            games.insert_within_limit(&session, since, 5).await.unwrap()
        }));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap() {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 5);
    assert_eq!(games.count_since(user.id, since).await.unwrap(), 5);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_replace_season_is_total() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let leaderboard = MySqlLeaderboardRepository::new(db.pool());

    let mut saved = Vec::new();
    for (i, level) in [3u32, 7, 5].into_iter().enumerate() {
        let mut user = player(100 + i as i64, "Ranked");
        user.level = level;
        saved.push(users.save(&user).await.unwrap());
    }

    let entries = rank_users(saved.clone(), 4, Utc::now());
    leaderboard.replace_season(4, &entries).await.unwrap();
    leaderboard.replace_season(4, &entries[..1]).await.unwrap();

    let top = leaderboard.find_top(4, 100).await.unwrap();
    assert_eq!(top.len(), 1);
    assert_eq!(top[0].level, 7);
    assert_eq!(top[0].rank, 1);

    let friends = leaderboard
        .find_by_users(4, &[saved[0].id, saved[1].id])
        .await
        .unwrap();
    assert_eq!(friends.len(), 1);
}
