//! Reward bundle value object.

use serde::{Deserialize, Serialize};

/// Gold, experience and optional gems granted by a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub gold: i64,
    pub experience: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gems: Option<i64>,
}

impl Reward {
    /// Scales gold and experience by player level.
    ///
    /// `gold * (1 + level / 100)` and `experience * (1 + level / 50)`, both
    /// rounded up. Gems are never scaled.
    #[must_use]
    pub const fn scaled_for_level(self, level: u32) -> Self {
        let level = level as i64;
        Self {
            gold: (self.gold * (100 + level) + 99) / 100,
            experience: (self.experience * (50 + level) + 49) / 50,
            gems: self.gems,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaling_rounds_up() {
        let base = Reward { gold: 100, experience: 50, gems: None };
        let scaled = base.scaled_for_level(1);
        assert_eq!(scaled.gold, 101);
        assert_eq!(scaled.experience, 51);

        let scaled = Reward { gold: 75, experience: 100, gems: None }.scaled_for_level(3);
        // 77.25 -> 78, 106 -> 106
        assert_eq!(scaled.gold, 78);
        assert_eq!(scaled.experience, 106);
    }

    #[test]
    fn test_gems_are_not_scaled() {
        let base = Reward { gold: 300, experience: 150, gems: Some(10) };
        let scaled = base.scaled_for_level(50);
        assert_eq!(scaled.gold, 450);
        assert_eq!(scaled.experience, 300);
        assert_eq!(scaled.gems, Some(10));
    }
}
