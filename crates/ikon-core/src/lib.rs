//! # Ikon Core
//!
//! Core types, traits, and error definitions for the IkonGrind backend.
//! The `domain` module holds the game entities and the pure rules that
//! compute rewards, levels, and seasons; every other crate builds on it.

pub mod calendar;
pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod traits;
pub mod validation;

pub use error::*;
pub use id::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
