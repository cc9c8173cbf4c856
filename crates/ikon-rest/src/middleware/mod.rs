//! Request middleware.

mod auth;
mod logging;

pub use auth::*;
pub use logging::*;
