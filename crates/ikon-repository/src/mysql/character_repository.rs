//! MySQL character repository implementation.

use super::{parse_enum, parse_id, to_i32, to_u32};
use crate::{traits::CharacterRepository, DatabasePoolInterface};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use ikon_core::domain::{Appearance, Character, CharacterStats, Equipment, Skill};
use ikon_core::{CharacterId, IkonError, IkonResult, UserId};
use shaku::Component;
use sqlx::types::Json;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const CHARACTER_COLUMNS: &str = r#"
    id, user_id, name, class, level, experience, health, mana, strength,
    intelligence, agility, endurance, skills, equipment, appearance,
    created_at, last_used_at
"#;

/// MySQL character repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = CharacterRepository)]
pub struct MySqlCharacterRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl MySqlCharacterRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct CharacterRow {
    id: String,
    user_id: String,
    name: String,
    class: String,
    level: i32,
    experience: i64,
    health: i32,
    mana: i32,
    strength: i32,
    intelligence: i32,
    agility: i32,
    endurance: i32,
    skills: Json<Vec<Skill>>,
    equipment: Json<Equipment>,
    appearance: Json<Appearance>,
    created_at: DateTime<Utc>,
    last_used_at: DateTime<Utc>,
}

impl TryFrom<CharacterRow> for Character {
    type Error = IkonError;

    fn try_from(row: CharacterRow) -> Result<Self, Self::Error> {
        Ok(Character {
            id: parse_id(&row.id, "characters.id")?,
            user_id: parse_id(&row.user_id, "characters.user_id")?,
            name: row.name,
            class: parse_enum(&row.class)?,
            level: to_u32(row.level, "characters.level")?,
            experience: row.experience,
            stats: CharacterStats {
                health: to_u32(row.health, "characters.health")?,
                mana: to_u32(row.mana, "characters.mana")?,
                strength: to_u32(row.strength, "characters.strength")?,
                intelligence: to_u32(row.intelligence, "characters.intelligence")?,
                agility: to_u32(row.agility, "characters.agility")?,
                endurance: to_u32(row.endurance, "characters.endurance")?,
            },
            skills: row.skills.0,
            equipment: row.equipment.0,
            appearance: row.appearance.0,
            created_at: row.created_at,
            last_used_at: row.last_used_at,
        })
    }
}

#[async_trait]
impl CharacterRepository for MySqlCharacterRepository {
    async fn find_by_id(&self, id: CharacterId) -> IkonResult<Option<Character>> {
        debug!("Finding character by id: {}", id);

        let row = sqlx::query_as::<_, CharacterRow>(&format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters WHERE id = ?"
        ))
        .bind(id.into_inner().to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Character::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: UserId) -> IkonResult<Vec<Character>> {
        debug!("Finding characters for user: {}", user_id);

        let rows = sqlx::query_as::<_, CharacterRow>(&format!(
            "SELECT {CHARACTER_COLUMNS} FROM characters WHERE user_id = ? ORDER BY created_at ASC"
        ))
        .bind(user_id.into_inner().to_string())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Character::try_from).collect()
    }

    async fn save(&self, character: &Character) -> IkonResult<Character> {
        debug!("Saving character {} for user {}", character.id, character.user_id);

        let stats = &character.stats;
        sqlx::query(
            r#"
            INSERT INTO characters (id, user_id, name, class, level, experience, health, mana,
                                    strength, intelligence, agility, endurance, skills, equipment,
                                    appearance, created_at, last_used_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(character.id.into_inner().to_string())
        .bind(character.user_id.into_inner().to_string())
        .bind(&character.name)
        .bind(character.class.as_str())
        .bind(to_i32(character.level, "level")?)
        .bind(character.experience)
        .bind(to_i32(stats.health, "health")?)
        .bind(to_i32(stats.mana, "mana")?)
        .bind(to_i32(stats.strength, "strength")?)
        .bind(to_i32(stats.intelligence, "intelligence")?)
        .bind(to_i32(stats.agility, "agility")?)
        .bind(to_i32(stats.endurance, "endurance")?)
        .bind(Json(&character.skills))
        .bind(Json(&character.equipment))
        .bind(Json(&character.appearance))
        .bind(character.created_at)
        .bind(character.last_used_at)
        .execute(self.pool.inner())
        .await?;

        Ok(character.clone())
    }

    async fn update(&self, character: &Character) -> IkonResult<Character> {
        debug!("Updating character: {}", character.id);

        let stats = &character.stats;
        let result = sqlx::query(
            r#"
            UPDATE characters
            SET name = ?, level = ?, experience = ?, health = ?, mana = ?, strength = ?,
                intelligence = ?, agility = ?, endurance = ?, skills = ?, equipment = ?,
                appearance = ?, last_used_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&character.name)
        .bind(to_i32(character.level, "level")?)
        .bind(character.experience)
        .bind(to_i32(stats.health, "health")?)
        .bind(to_i32(stats.mana, "mana")?)
        .bind(to_i32(stats.strength, "strength")?)
        .bind(to_i32(stats.intelligence, "intelligence")?)
        .bind(to_i32(stats.agility, "agility")?)
        .bind(to_i32(stats.endurance, "endurance")?)
        .bind(Json(&character.skills))
        .bind(Json(&character.equipment))
        .bind(Json(&character.appearance))
        .bind(character.last_used_at)
        .bind(character.id.into_inner().to_string())
        .execute(self.pool.inner())
        .await?;

        if result.rows_affected() == 0 && self.find_by_id(character.id).await?.is_none() {
            return Err(IkonError::not_found("Character", character.id));
        }
        Ok(character.clone())
    }
}

impl std::fmt::Debug for MySqlCharacterRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlCharacterRepository").finish_non_exhaustive()
    }
}
