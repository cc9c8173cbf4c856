//! Character DTOs.

use chrono::{DateTime, Utc};
use ikon_core::domain::{
    Appearance, AppearanceChange, Character, CharacterClass, CharacterStats, Equipment, EquipmentSlot, EquippedItem,
    Skill, StatKind,
};
use ikon_core::{CharacterId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

/// Request to create a character.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacterRequest {
    #[serde(rename = "class")]
    pub character_class: CharacterClass,

    #[validate(
        length(min = 1, max = 64, message = "Name must be 1-64 characters"),
        custom(function = "ikon_core::validation::rules::not_blank")
    )]
    pub name: String,
}

/// Request to raise one attribute.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeStatRequest {
    pub stat: StatKind,

    #[validate(range(min = 1, max = 1000, message = "Amount must be between 1 and 1000"))]
    pub amount: u32,
}

/// Request to equip an item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipItemRequest {
    pub slot: EquipmentSlot,

    #[validate(length(min = 1, max = 64))]
    pub item_id: String,

    #[validate(length(min = 1, max = 64))]
    pub name: String,

    #[validate(length(min = 1, max = 32))]
    pub rarity: String,
}

impl From<EquipItemRequest> for EquippedItem {
    fn from(request: EquipItemRequest) -> Self {
        Self {
            item_id: request.item_id,
            name: request.name,
            rarity: request.rarity,
        }
    }
}

/// Partial appearance update. Customization entries are merged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomizeAppearanceRequest {
    #[validate(custom(function = "ikon_core::validation::rules::hex_color"))]
    pub skin_color: Option<String>,

    #[validate(custom(function = "ikon_core::validation::rules::hex_color"))]
    pub hair_color: Option<String>,

    #[validate(custom(function = "ikon_core::validation::rules::hex_color"))]
    pub eye_color: Option<String>,

    #[serde(default)]
    pub customization: Option<BTreeMap<String, String>>,
}

impl From<CustomizeAppearanceRequest> for AppearanceChange {
    fn from(request: CustomizeAppearanceRequest) -> Self {
        Self {
            skin_color: request.skin_color,
            hair_color: request.hair_color,
            eye_color: request.eye_color,
            customization: request.customization.unwrap_or_default(),
        }
    }
}

/// Character response DTO.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponse {
    pub id: CharacterId,
    pub user_id: UserId,
    pub name: String,
    #[serde(rename = "class")]
    pub character_class: CharacterClass,
    pub level: u32,
    pub experience: i64,
    pub stats: CharacterStats,
    pub skills: Vec<Skill>,
    pub equipment: Equipment,
    pub appearance: Appearance,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl From<Character> for CharacterResponse {
    fn from(character: Character) -> Self {
        Self {
            id: character.id,
            user_id: character.user_id,
            name: character.name,
            character_class: character.class,
            level: character.level,
            experience: character.experience,
            stats: character.stats,
            skills: character.skills,
            equipment: character.equipment,
            appearance: character.appearance,
            created_at: character.created_at,
            last_used_at: character.last_used_at,
        }
    }
}
