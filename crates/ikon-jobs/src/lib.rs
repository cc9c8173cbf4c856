//! Ikon Jobs - background work for the IkonGrind backend.
//!
//! An in-process cron scheduler drives two recurring tasks:
//! - hourly leaderboard recomputation
//! - the daily reminder sent to every player through the bot
//!
//! ```text
//! Scheduler ──poll──▶ due ScheduledJob ──spawn──▶ ScheduledTask::run
//!     ▲                                                  │
//!     └──────────── broadcast shutdown         metrics + tracing
//! ```
//!
//! A failing run is logged and counted; the job simply fires again at its
//! next scheduled time.

pub mod error;
pub mod metrics;
pub mod scheduler;
pub mod task;
pub mod tasks;

pub use error::{JobError, JobResult};
pub use metrics::{register_metrics, SchedulerMetrics};
pub use scheduler::{ScheduledJob, ScheduledJobInfo, Scheduler};
pub use task::ScheduledTask;
pub use tasks::{DailyReminderTask, LeaderboardRefreshTask, DAILY_REMINDER_TEXT};
