//! Long-polling bot loop.

use crate::client::TelegramClient;
use crate::commands::BotCommand;
use crate::handler::CommandHandler;
use crate::messages;
use crate::types::{TelegramUser, Update};
use ikon_core::IkonResult;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Pause after a failed `getUpdates` call.
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Receives updates with `getUpdates` and answers them.
///
/// Updates are handled one at a time in arrival order. A failing command is
/// logged and answered with a short error message; it never stops the loop.
pub struct BotService {
    client: TelegramClient,
    handler: Arc<CommandHandler>,
    shutdown_tx: broadcast::Sender<()>,
    running: AtomicBool,
}

impl BotService {
    pub fn new(client: TelegramClient, handler: Arc<CommandHandler>) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            client,
            handler,
            shutdown_tx,
            running: AtomicBool::new(false),
        }
    }

    /// Polls until [`BotService::stop`] is called.
    pub async fn start(&self) {
        if self.running.swap(true, Ordering::SeqCst) {
            warn!("Bot already running");
            return;
        }
        info!("Starting Telegram bot");

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut offset = 0;

        // shutdown only interrupts the fetch; a received batch is always handled in full
        loop {
            let polled = tokio::select! {
                biased;
                _ = shutdown_rx.recv() => break,
                polled = self.client.get_updates(offset) => polled,
            };

            match polled {
                Ok(updates) => offset = self.handle_batch(offset, updates).await,
                Err(e) => {
                    warn!(error = %e, "getUpdates failed, retrying in {}s", RETRY_DELAY.as_secs());
                    tokio::select! {
                        _ = shutdown_rx.recv() => break,
                        () = tokio::time::sleep(RETRY_DELAY) => {}
                    }
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
        info!("Telegram bot stopped");
    }

    pub fn stop(&self) {
        info!("Stopping Telegram bot...");
        let _ = self.shutdown_tx.send(());
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Fetches one batch of updates, handles it, and returns the next offset.
    pub async fn poll_once(&self, offset: i64) -> IkonResult<i64> {
        let updates = self.client.get_updates(offset).await?;
        Ok(self.handle_batch(offset, updates).await)
    }

    async fn handle_batch(&self, offset: i64, updates: Vec<Update>) -> i64 {
        let mut next = offset;
        for update in updates {
            next = next.max(update.update_id + 1);
            self.handle_update(update).await;
        }
        next
    }

    /// Dispatches a single update.
    pub async fn handle_update(&self, update: Update) {
        if let Some(message) = update.message {
            let (Some(text), Some(sender)) = (message.text.as_deref(), message.from.as_ref()) else {
                return;
            };
            if let Some(command) = BotCommand::parse(text) {
                self.respond(message.chat.id, command, sender).await;
            }
        } else if let Some(callback) = update.callback_query {
            if let Err(e) = self.client.answer_callback_query(&callback.id).await {
                debug!(error = %e, "answerCallbackQuery failed");
            }
            let Some(command) = callback.data.as_deref().and_then(BotCommand::from_callback) else {
                return;
            };
            let chat_id = callback.message.as_ref().map_or(callback.from.id, |m| m.chat.id);
            self.respond(chat_id, command, &callback.from).await;
        }
    }

    async fn respond(&self, chat_id: i64, command: BotCommand, sender: &TelegramUser) {
        debug!(chat_id, ?command, "Handling bot command");

        let sent = match self.handler.handle(command, sender).await {
            Ok(reply) => {
                self.client
                    .send_message(chat_id, &reply.text, reply.keyboard.as_ref())
                    .await
            }
            Err(e) => {
                warn!(chat_id, ?command, error = %e, "Bot command failed");
                self.client.send_message(chat_id, messages::error(command), None).await
            }
        };

        if let Err(e) = sent {
            error!(chat_id, ?command, error = %e, "Failed to send bot reply");
        }
    }
}

impl std::fmt::Debug for BotService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotService")
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}
