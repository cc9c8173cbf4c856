//! # Ikon Bot
//!
//! Telegram side of IkonGrind: a long-polling bot answering `/start`,
//! `/profile`, `/quests`, `/leaderboard` and `/help`, and the
//! [`TelegramNotifier`] used by scheduled reminders.
//!
//! The bot talks to the Bot API through [`TelegramClient`] and to the game
//! through the `ikon-service` traits only.

pub mod client;
pub mod commands;
pub mod handler;
pub mod messages;
pub mod notifier;
pub mod service;
pub mod types;

pub use client::TelegramClient;
pub use commands::BotCommand;
pub use handler::{CommandHandler, Reply};
pub use notifier::TelegramNotifier;
pub use service::BotService;
