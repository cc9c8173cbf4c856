//! Quest difficulty tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Difficulty label attached to a generated quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "lowercase")]
pub enum QuestDifficulty {
    Easy,
    Normal,
    Hard,
    Legendary,
}

impl QuestDifficulty {
    /// Picks the tier for a player level.
    #[must_use]
    pub const fn for_level(level: u32) -> Self {
        match level {
            0..=19 => Self::Easy,
            20..=49 => Self::Normal,
            50..=79 => Self::Hard,
            _ => Self::Legendary,
        }
    }

    /// Returns the lowercase wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Normal => "normal",
            Self::Hard => "hard",
            Self::Legendary => "legendary",
        }
    }
}

impl fmt::Display for QuestDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestDifficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "easy" => Ok(Self::Easy),
            "normal" => Ok(Self::Normal),
            "hard" => Ok(Self::Hard),
            "legendary" => Ok(Self::Legendary),
            other => Err(format!("unknown quest difficulty: {other}")),
        }
    }
}
