//! # Ikon REST
//!
//! HTTP API of the IkonGrind Mini App, built on Axum.
//! All game endpoints live under `/api`; `/health` and `/ready` are
//! served at the root, with the OpenAPI document at `/swagger-ui`.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
