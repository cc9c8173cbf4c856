//! User entity: the aggregate root of a player's progression.

use crate::calendar::local_day_start;
use crate::domain::value_objects::TelegramProfile;
use crate::{CharacterId, IkonError, IkonResult, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Experience needed to advance one level.
pub const EXPERIENCE_PER_LEVEL: i64 = 100;

/// Highest reachable player level.
pub const MAX_LEVEL: u32 = 100;

/// Gold granted for every level gained.
pub const LEVEL_UP_GOLD_BONUS: i64 = 50;

/// Gold granted on every seventh consecutive login day.
pub const WEEKLY_STREAK_GOLD_BONUS: i64 = 200;

/// Starting gold for a new player.
pub const STARTING_GOLD: i64 = 100;

/// Lifetime counters shown on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UserStatistics {
    pub total_quests_completed: u32,
    pub total_games_played: u32,
    pub total_games_won: u32,
    pub total_gold_earned: i64,
}

/// A player, keyed by Telegram identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub telegram_id: i64,
    pub username: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
    pub profile_picture: Option<String>,
    pub level: u32,
    /// Always below [`EXPERIENCE_PER_LEVEL`].
    pub experience: i64,
    pub gold: i64,
    pub gems: i64,
    pub login_streak: u32,
    pub referral_code: String,
    pub referred_by: Option<String>,
    pub selected_character_id: Option<CharacterId>,
    pub statistics: UserStatistics,
    /// Accumulated session duration in milliseconds.
    pub total_play_time: i64,
    pub joined_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    /// Optimistic concurrency token, bumped by every persisted update.
    pub version: u64,
}

/// Result of applying experience to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelProgress {
    pub levels_gained: u32,
    pub bonus_gold: i64,
}

/// Result of registering a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginProgress {
    pub streak: u32,
    pub bonus_gold: i64,
}

impl User {
    /// Creates a new level 1 player from a Telegram profile.
    #[must_use]
    pub fn from_telegram(profile: &TelegramProfile, now: DateTime<Utc>) -> Self {
        Self {
            id: UserId::new(),
            telegram_id: profile.id,
            username: profile.username.clone(),
            first_name: profile.first_name.clone(),
            last_name: profile.last_name.clone(),
            profile_picture: None,
            level: 1,
            experience: 0,
            gold: STARTING_GOLD,
            gems: 0,
            login_streak: 0,
            referral_code: new_referral_code(),
            referred_by: None,
            selected_character_id: None,
            statistics: UserStatistics::default(),
            total_play_time: 0,
            joined_at: now,
            last_active_at: now,
            version: 0,
        }
    }

    /// Name shown on leaderboards: the username, or the first name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.first_name)
    }

    /// Refreshes names from Telegram and marks the user active.
    pub fn refresh_profile(&mut self, profile: &TelegramProfile) {
        self.username = profile.username.clone();
        self.first_name = profile.first_name.clone();
        self.last_name = profile.last_name.clone();
    }

    /// Adds (or with a negative amount, spends) gold.
    ///
    /// Only positive amounts count towards `total_gold_earned`.
    pub fn add_gold(&mut self, amount: i64) -> IkonResult<()> {
        let gold = self
            .gold
            .checked_add(amount)
            .ok_or_else(|| IkonError::validation("gold amount out of range"))?;
        if gold < 0 {
            return Err(IkonError::business_rule(format!(
                "Insufficient gold: balance {} cannot cover {}",
                self.gold, -amount
            )));
        }
        self.gold = gold;
        self.statistics.total_gold_earned += amount.max(0);
        Ok(())
    }

    /// Adds gems; the balance can never drop below zero.
    pub fn add_gems(&mut self, amount: i64) -> IkonResult<()> {
        let gems = self.gems.saturating_add(amount);
        if gems < 0 {
            return Err(IkonError::business_rule("Insufficient gems"));
        }
        self.gems = gems;
        Ok(())
    }

    /// Adds experience and rolls it into levels.
    ///
    /// Each level costs [`EXPERIENCE_PER_LEVEL`]; at [`MAX_LEVEL`] the surplus
    /// is capped so experience stays below one level's worth. Every level
    /// gained by this call pays [`LEVEL_UP_GOLD_BONUS`].
    pub fn gain_experience(&mut self, amount: i64) -> IkonResult<LevelProgress> {
        if amount < 0 {
            return Err(IkonError::validation("experience amount must not be negative"));
        }

        let starting_level = self.level;
        self.experience = self.experience.saturating_add(amount);
        while self.experience >= EXPERIENCE_PER_LEVEL && self.level < MAX_LEVEL {
            self.experience -= EXPERIENCE_PER_LEVEL;
            self.level += 1;
        }
        if self.level >= MAX_LEVEL {
            self.experience = self.experience.min(EXPERIENCE_PER_LEVEL - 1);
        }

        let levels_gained = self.level - starting_level;
        let bonus_gold = i64::from(levels_gained) * LEVEL_UP_GOLD_BONUS;
        if bonus_gold > 0 {
            self.add_gold(bonus_gold)?;
        }

        Ok(LevelProgress { levels_gained, bonus_gold })
    }

    /// Registers a daily login and updates the streak.
    ///
    /// A gap of at most one whole day continues the streak; anything longer
    /// restarts it at 1. Only the first login of a local day counts.
    pub fn register_login(&mut self, now: DateTime<Utc>) -> IkonResult<LoginProgress> {
        if self.login_streak > 0 && self.last_active_at >= local_day_start(now) {
            self.last_active_at = now;
            return Ok(LoginProgress {
                streak: self.login_streak,
                bonus_gold: 0,
            });
        }

        let days_since_last = (now - self.last_active_at).num_days();
        let mut bonus_gold = 0;

        if days_since_last <= 1 {
            self.login_streak += 1;
            if self.login_streak % 7 == 0 {
                bonus_gold = WEEKLY_STREAK_GOLD_BONUS;
                self.add_gold(bonus_gold)?;
            }
        } else {
            self.login_streak = 1;
        }
        self.last_active_at = now;

        Ok(LoginProgress {
            streak: self.login_streak,
            bonus_gold,
        })
    }

    /// Records a finished game session.
    pub fn record_game(&mut self, won: bool, duration_ms: i64) {
        self.statistics.total_games_played += 1;
        if won {
            self.statistics.total_games_won += 1;
        }
        self.total_play_time += duration_ms.max(0);
    }

    /// Records a completed quest.
    pub fn record_quest_completed(&mut self) {
        self.statistics.total_quests_completed += 1;
    }
}

/// Generates an eight character upper-case hexadecimal referral code.
#[must_use]
pub fn new_referral_code() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_uppercase()
}
