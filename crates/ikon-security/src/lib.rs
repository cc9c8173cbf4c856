//! # Ikon Security
//!
//! JWT bearer tokens for the IkonGrind Mini App. A token is issued by the
//! auth bootstrap endpoint and checked by the REST auth middleware.

pub mod jwt;

pub use jwt::*;
