//! Integration tests for the MySQL user and character repositories.
//!
//! Requires Docker to be available on the system.

mod common;

use chrono::Utc;
use ikon_core::domain::{Character, CharacterClass};
use ikon_core::UserId;
use ikon_repository::{CharacterRepository, MySqlCharacterRepository, MySqlUserRepository, UserRepository};
use common::{player, TestDatabase};

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_save_and_find_by_telegram_id() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let user = player(4242, "Ada");
    repo.save(&user).await.expect("Failed to save user");

    let found = repo
        .find_by_telegram_id(4242)
        .await
        .expect("Query failed")
        .expect("User not found");
    assert_eq!(found.id, user.id);
    assert_eq!(found.first_name, "Ada");
    assert_eq!(found.gold, user.gold);
    assert_eq!(found.version, 0);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_find_by_id_not_found() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    assert!(repo.find_by_id(UserId::new()).await.expect("Query failed").is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_duplicate_telegram_id_conflicts() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    repo.save(&player(1, "One")).await.expect("Failed to save user");
    let err = repo.save(&player(1, "Again")).await.unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_stale_version_update_conflicts() {
    let db = TestDatabase::new().await;
    let repo = MySqlUserRepository::new(db.pool());

    let saved = repo.save(&player(9, "Nine")).await.expect("Failed to save user");

    let mut fresh = saved.clone();
    fresh.gold += 25;
    let updated = repo.update(&fresh).await.expect("Update failed");
    assert_eq!(updated.version, saved.version + 1);

    let mut stale = saved;
    stale.gold += 50;
    assert!(repo.update(&stale).await.unwrap_err().is_conflict());

    let stored = repo.find_by_id(fresh.id).await.unwrap().unwrap();
    assert_eq!(stored.gold, fresh.gold);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn test_character_round_trip() {
    let db = TestDatabase::new().await;
    let users = MySqlUserRepository::new(db.pool());
    let characters = MySqlCharacterRepository::new(db.pool());

    let user = users.save(&player(77, "Mira")).await.unwrap();
    let mut character = Character::new(user.id, "Mira's Mage".to_string(), CharacterClass::Mage, Utc::now());
    characters.save(&character).await.expect("Failed to save character");

    character.level_up(Utc::now());
    characters.update(&character).await.expect("Failed to update character");

    let owned = characters.find_by_user(user.id).await.unwrap();
    assert_eq!(owned.len(), 1);
    assert_eq!(owned[0].level, 2);
    assert_eq!(owned[0].skills.len(), 3);
    assert_eq!(owned[0].class, CharacterClass::Mage);
}
