//! Character class value objects and class templates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Playable character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    /// Sturdy melee fighter; the starter class.
    #[default]
    Warrior,
    /// Spellcaster with a large mana pool.
    Mage,
    /// Agile striker.
    Rogue,
    /// Holy knight.
    Paladin,
}

/// Base attribute values for a freshly created character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseStats {
    pub health: u32,
    pub strength: u32,
    pub endurance: u32,
    pub intelligence: u32,
    pub agility: u32,
    pub mana: u32,
}

/// Static description of a class skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkillTemplate {
    pub skill_id: &'static str,
    pub name: &'static str,
    pub required_level: u32,
}

impl CharacterClass {
    /// Returns the class's starting attributes.
    #[must_use]
    pub const fn base_stats(self) -> BaseStats {
        match self {
            Self::Warrior => BaseStats { health: 150, strength: 15, endurance: 13, intelligence: 8, agility: 10, mana: 30 },
            Self::Mage => BaseStats { health: 80, strength: 8, endurance: 10, intelligence: 18, agility: 12, mana: 100 },
            Self::Rogue => BaseStats { health: 100, strength: 12, endurance: 11, intelligence: 10, agility: 16, mana: 50 },
            Self::Paladin => BaseStats { health: 130, strength: 13, endurance: 14, intelligence: 12, agility: 10, mana: 60 },
        }
    }

    /// Returns the class's skill tree, cheapest first.
    #[must_use]
    pub const fn skills(self) -> [SkillTemplate; 3] {
        const fn skill(skill_id: &'static str, name: &'static str, required_level: u32) -> SkillTemplate {
            SkillTemplate { skill_id, name, required_level }
        }
        match self {
            Self::Warrior => [
                skill("slash", "Slash", 1),
                skill("power_strike", "Power Strike", 5),
                skill("whirlwind", "Whirlwind", 15),
            ],
            Self::Mage => [
                skill("fireball", "Fireball", 1),
                skill("ice_bolt", "Ice Bolt", 5),
                skill("teleport", "Teleport", 15),
            ],
            Self::Rogue => [
                skill("backstab", "Backstab", 1),
                skill("shadow_clone", "Shadow Clone", 5),
                skill("invisibility", "Invisibility", 15),
            ],
            Self::Paladin => [
                skill("holy_strike", "Holy Strike", 1),
                skill("shield_bash", "Shield Bash", 5),
                skill("divine_protection", "Divine Protection", 15),
            ],
        }
    }

    /// Returns all available classes.
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Warrior, Self::Mage, Self::Rogue, Self::Paladin]
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Warrior => "warrior",
            Self::Mage => "mage",
            Self::Rogue => "rogue",
            Self::Paladin => "paladin",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CharacterClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown character class: {s}"))
    }
}

/// Character attributes that can be upgraded individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum StatKind {
    Health,
    Mana,
    Strength,
    Intelligence,
    Agility,
    Endurance,
}

/// Equipment slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Accessory,
}
