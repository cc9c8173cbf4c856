//! Custom Axum extractors.

mod claims;
mod validated;

pub use claims::*;
pub use validated::*;
