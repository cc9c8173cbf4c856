//! Outbound player notifications.

use async_trait::async_trait;
use ikon_core::IkonResult;

/// Delivers a text message to a player's chat.
///
/// Implemented by the Telegram bot adapter; the scheduler's daily reminder
/// depends on this trait only.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends `text` to the chat identified by `chat_id`.
    async fn send_notification(&self, chat_id: i64, text: &str) -> IkonResult<()>;
}
