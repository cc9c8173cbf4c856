//! Telegram-backed [`Notifier`].

use crate::client::TelegramClient;
use async_trait::async_trait;
use ikon_core::IkonResult;
use ikon_service::Notifier;

/// Sends notifications as Markdown chat messages.
#[derive(Debug, Clone)]
pub struct TelegramNotifier {
    client: TelegramClient,
}

impl TelegramNotifier {
    pub fn new(client: TelegramClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send_notification(&self, chat_id: i64, text: &str) -> IkonResult<()> {
        self.client.send_message(chat_id, text, None).await
    }
}
