//! Character entity.

use crate::domain::value_objects::{CharacterClass, EquipmentSlot, StatKind};
use crate::{CharacterId, IkonError, IkonResult, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const DEFAULT_SKIN_COLOR: &str = "#FDBCB4";
pub const DEFAULT_HAIR_COLOR: &str = "#8B4513";
pub const DEFAULT_EYE_COLOR: &str = "#8B4513";

/// Combat attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct CharacterStats {
    pub health: u32,
    pub mana: u32,
    pub strength: u32,
    pub intelligence: u32,
    pub agility: u32,
    pub endurance: u32,
}

impl CharacterStats {
    fn for_class(class: CharacterClass) -> Self {
        let base = class.base_stats();
        Self {
            health: base.health,
            mana: base.mana,
            strength: base.strength,
            intelligence: base.intelligence,
            agility: base.agility,
            endurance: base.endurance,
        }
    }

    fn get_mut(&mut self, stat: StatKind) -> &mut u32 {
        match stat {
            StatKind::Health => &mut self.health,
            StatKind::Mana => &mut self.mana,
            StatKind::Strength => &mut self.strength,
            StatKind::Intelligence => &mut self.intelligence,
            StatKind::Agility => &mut self.agility,
            StatKind::Endurance => &mut self.endurance,
        }
    }
}

/// A class skill and whether it is usable yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub skill_id: String,
    pub name: String,
    pub level: u32,
    pub unlocked: bool,
    pub required_level: u32,
}

/// An item occupying an equipment slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct EquippedItem {
    pub item_id: String,
    pub name: String,
    pub rarity: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Equipment {
    pub weapon: Option<EquippedItem>,
    pub armor: Option<EquippedItem>,
    pub accessory: Option<EquippedItem>,
}

/// Visual customisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Appearance {
    pub skin_color: String,
    pub hair_color: String,
    pub eye_color: String,
    #[serde(default)]
    pub customization: BTreeMap<String, String>,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            skin_color: DEFAULT_SKIN_COLOR.to_string(),
            hair_color: DEFAULT_HAIR_COLOR.to_string(),
            eye_color: DEFAULT_EYE_COLOR.to_string(),
            customization: BTreeMap::new(),
        }
    }
}

/// Partial appearance update; `customization` entries are merged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppearanceChange {
    pub skin_color: Option<String>,
    pub hair_color: Option<String>,
    pub eye_color: Option<String>,
    pub customization: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub user_id: UserId,
    pub name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub experience: i64,
    pub stats: CharacterStats,
    pub skills: Vec<Skill>,
    pub equipment: Equipment,
    pub appearance: Appearance,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

impl Character {
    /// Creates a level 1 character from the class template.
    #[must_use]
    pub fn new(user_id: UserId, name: impl Into<String>, class: CharacterClass, now: DateTime<Utc>) -> Self {
        let skills = class
            .skills()
            .iter()
            .map(|template| Skill {
                skill_id: template.skill_id.to_string(),
                name: template.name.to_string(),
                level: 1,
                unlocked: template.required_level <= 1,
                required_level: template.required_level,
            })
            .collect();

        Self {
            id: CharacterId::new(),
            user_id,
            name: name.into(),
            class,
            level: 1,
            experience: 0,
            stats: CharacterStats::for_class(class),
            skills,
            equipment: Equipment::default(),
            appearance: Appearance::default(),
            created_at: now,
            last_used_at: now,
        }
    }

    /// The warrior every new player starts with.
    #[must_use]
    pub fn starter(user_id: UserId, first_name: &str, now: DateTime<Utc>) -> Self {
        Self::new(user_id, format!("{first_name}'s Warrior"), CharacterClass::Warrior, now)
    }

    /// Advances one level, grows stats and unlocks newly reachable skills.
    pub fn level_up(&mut self, now: DateTime<Utc>) {
        self.level += 1;
        self.experience = 0;
        self.stats.health += 10;
        self.stats.strength += 1;
        self.stats.intelligence += 1;
        self.stats.agility += 1;
        self.stats.endurance += 1;
        self.stats.mana += 5;

        for skill in &mut self.skills {
            if skill.required_level <= self.level {
                skill.unlocked = true;
            }
        }
        self.last_used_at = now;
    }

    /// Raises a single attribute.
    pub fn upgrade_stat(&mut self, stat: StatKind, amount: u32, now: DateTime<Utc>) -> IkonResult<()> {
        if amount == 0 {
            return Err(IkonError::validation("stat upgrade amount must be at least 1"));
        }
        let value = self.stats.get_mut(stat);
        *value = value
            .checked_add(amount)
            .ok_or_else(|| IkonError::validation("stat value out of range"))?;
        self.last_used_at = now;
        Ok(())
    }

    /// Puts an item in a slot, replacing whatever was there.
    pub fn equip(&mut self, slot: EquipmentSlot, item: EquippedItem, now: DateTime<Utc>) {
        let target = match slot {
            EquipmentSlot::Weapon => &mut self.equipment.weapon,
            EquipmentSlot::Armor => &mut self.equipment.armor,
            EquipmentSlot::Accessory => &mut self.equipment.accessory,
        };
        *target = Some(item);
        self.last_used_at = now;
    }

    /// Applies an appearance change.
    pub fn customize(&mut self, change: AppearanceChange, now: DateTime<Utc>) {
        if let Some(skin) = change.skin_color {
            self.appearance.skin_color = skin;
        }
        if let Some(hair) = change.hair_color {
            self.appearance.hair_color = hair;
        }
        if let Some(eye) = change.eye_color {
            self.appearance.eye_color = eye;
        }
        self.appearance.customization.extend(change.customization);
        self.last_used_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn warrior() -> Character {
        Character::starter(UserId::new(), "Aria", Utc::now())
    }

    #[test]
    fn test_starter_character() {
        let character = warrior();
        assert_eq!(character.name, "Aria's Warrior");
        assert_eq!(character.class, CharacterClass::Warrior);
        assert_eq!(character.stats.health, 150);
        assert_eq!(character.skills.len(), 3);
        assert!(character.skills[0].unlocked);
        assert!(!character.skills[1].unlocked);
        assert_eq!(character.appearance.skin_color, DEFAULT_SKIN_COLOR);
    }

    #[test]
    fn test_level_up_grows_stats_and_unlocks_skills() {
        let mut character = Character::new(UserId::new(), "Merlin", CharacterClass::Mage, Utc::now());
        for _ in 0..4 {
            character.level_up(Utc::now());
        }
        assert_eq!(character.level, 5);
        assert_eq!(character.stats.health, 80 + 40);
        assert_eq!(character.stats.mana, 100 + 20);
        assert_eq!(character.stats.intelligence, 18 + 4);
        assert!(character.skills[1].unlocked);
        assert!(!character.skills[2].unlocked);
    }

    #[test]
    fn test_upgrade_stat() {
        let mut character = warrior();
        character.upgrade_stat(StatKind::Agility, 3, Utc::now()).unwrap();
        assert_eq!(character.stats.agility, 13);
        assert!(character.upgrade_stat(StatKind::Agility, 0, Utc::now()).is_err());
    }

    #[test]
    fn test_equip_replaces_slot() {
        let mut character = warrior();
        let item = |id: &str| EquippedItem {
            item_id: id.to_string(),
            name: "Blade".to_string(),
            rarity: "rare".to_string(),
        };
        character.equip(EquipmentSlot::Weapon, item("sword-1"), Utc::now());
        character.equip(EquipmentSlot::Weapon, item("sword-2"), Utc::now());
        assert_eq!(character.equipment.weapon.map(|w| w.item_id), Some("sword-2".to_string()));
        assert!(character.equipment.armor.is_none());
    }

    #[test]
    fn test_customize_merges_customization() {
        let mut character = warrior();
        let mut first = AppearanceChange::default();
        first.customization.insert("hat".to_string(), "wizard".to_string());
        character.customize(first, Utc::now());

        let mut second = AppearanceChange {
            hair_color: Some("#000000".to_string()),
            ..AppearanceChange::default()
        };
        second.customization.insert("cape".to_string(), "red".to_string());
        character.customize(second, Utc::now());

        assert_eq!(character.appearance.hair_color, "#000000");
        assert_eq!(character.appearance.skin_color, DEFAULT_SKIN_COLOR);
        assert_eq!(character.appearance.customization.len(), 2);
    }
}
