//! # Ikon Server Library
//!
//! Wires the IkonGrind crates into one process: Shaku modules for the MySQL
//! and in-memory backends, the REST router, the job scheduler and the
//! Telegram bot.

pub mod app;
pub mod di;
pub mod startup;

pub use app::run;
