//! Recurring tasks of the game backend.

mod daily_reminder;
mod leaderboard_refresh;

pub use daily_reminder::{DailyReminderTask, DAILY_REMINDER_TEXT};
pub use leaderboard_refresh::LeaderboardRefreshTask;
