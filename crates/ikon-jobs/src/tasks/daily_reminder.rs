//! Daily play reminder.

use crate::error::{JobError, JobResult};
use crate::task::ScheduledTask;
use async_trait::async_trait;
use ikon_service::{Notifier, UserService};
use std::sync::Arc;
use tracing::{info, warn};

/// Text of the morning reminder.
pub const DAILY_REMINDER_TEXT: &str =
    "🌅 New daily quests are waiting!\n\nYou have 5 games to play today. Open IkonGrind to keep your streak going.";

/// Sends the reminder to every registered player.
pub struct DailyReminderTask {
    user_service: Arc<dyn UserService>,
    notifier: Arc<dyn Notifier>,
}

impl DailyReminderTask {
    pub const NAME: &'static str = "daily_reminder";

    #[must_use]
    pub fn new(user_service: Arc<dyn UserService>, notifier: Arc<dyn Notifier>) -> Self {
        Self { user_service, notifier }
    }
}

#[async_trait]
impl ScheduledTask for DailyReminderTask {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Individual delivery failures are logged; the run fails only when
    /// nobody could be reached.
    async fn run(&self) -> JobResult<()> {
        let recipients = self.user_service.list_notification_recipients().await?;

        let mut delivered = 0usize;
        for chat_id in &recipients {
            match self.notifier.send_notification(*chat_id, DAILY_REMINDER_TEXT).await {
                Ok(()) => delivered += 1,
                Err(e) => warn!(chat_id, error = %e, "Daily reminder not delivered"),
            }
        }

        info!(recipients = recipients.len(), delivered, "Daily reminder sent");
        if delivered == 0 && !recipients.is_empty() {
            return Err(JobError::ExecutionFailed(format!(
                "Daily reminder reached none of {} players",
                recipients.len()
            )));
        }
        Ok(())
    }
}

impl std::fmt::Debug for DailyReminderTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DailyReminderTask").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ikon_core::domain::TelegramProfile;
    use ikon_core::{IkonError, IkonResult, UserId};
    use ikon_service::{LoginStreakResponse, UserResponse};
    use mockall::mock;
    use parking_lot::Mutex;

    mock! {
        Users {}

        #[async_trait]
        impl UserService for Users {
            async fn create_or_update_user(&self, profile: &TelegramProfile) -> IkonResult<UserResponse>;
            async fn get_user(&self, id: UserId) -> IkonResult<UserResponse>;
            async fn get_user_by_telegram_id(&self, telegram_id: i64) -> IkonResult<UserResponse>;
            async fn update_user_experience(&self, id: UserId, amount: i64) -> IkonResult<UserResponse>;
            async fn update_user_gold(&self, id: UserId, amount: i64) -> IkonResult<UserResponse>;
            async fn add_login_streak(&self, id: UserId) -> IkonResult<LoginStreakResponse>;
            async fn list_notification_recipients(&self) -> IkonResult<Vec<i64>>;
        }
    }

    /// Records deliveries and fails for the listed chats.
    #[derive(Default)]
    struct RecordingNotifier {
        sent: Mutex<Vec<(i64, String)>>,
        unreachable: Vec<i64>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send_notification(&self, chat_id: i64, text: &str) -> IkonResult<()> {
            if self.unreachable.contains(&chat_id) {
                return Err(IkonError::external("telegram", "Forbidden: bot was blocked by the user"));
            }
            self.sent.lock().push((chat_id, text.to_string()));
            Ok(())
        }
    }

    fn users_returning(ids: Vec<i64>) -> Arc<MockUsers> {
        let mut users = MockUsers::new();
        users
            .expect_list_notification_recipients()
            .times(1)
            .returning(move || Ok(ids.clone()));
        Arc::new(users)
    }

    #[tokio::test]
    async fn test_reminder_reaches_every_player() {
        let notifier = Arc::new(RecordingNotifier::default());
        let task = DailyReminderTask::new(users_returning(vec![1, 2, 3]), notifier.clone());

        task.run().await.unwrap();

        let sent = notifier.sent.lock();
        assert_eq!(sent.iter().map(|(id, _)| *id).collect::<Vec<_>>(), [1, 2, 3]);
        assert!(sent.iter().all(|(_, text)| text == DAILY_REMINDER_TEXT));
    }

    #[tokio::test]
    async fn test_blocked_player_does_not_stop_the_run() {
        let notifier = Arc::new(RecordingNotifier {
            unreachable: vec![2],
            ..RecordingNotifier::default()
        });
        let task = DailyReminderTask::new(users_returning(vec![1, 2, 3]), notifier.clone());

        task.run().await.unwrap();
        assert_eq!(notifier.sent.lock().len(), 2);
    }

    #[tokio::test]
    async fn test_nobody_reached_is_a_failure() {
        let notifier = Arc::new(RecordingNotifier {
            unreachable: vec![1],
            ..RecordingNotifier::default()
        });
        let task = DailyReminderTask::new(users_returning(vec![1]), notifier);

        assert!(matches!(task.run().await, Err(JobError::ExecutionFailed(_))));
    }

    #[tokio::test]
    async fn test_no_players_is_fine() {
        let task = DailyReminderTask::new(users_returning(Vec::new()), Arc::new(RecordingNotifier::default()));
        assert!(task.run().await.is_ok());
    }
}
