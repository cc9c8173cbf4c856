//! # Ikon Repository
//!
//! Data access for the IkonGrind backend.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn UserRepository>      (traits.rs)
//! MySqlUserRepository               (mysql/, SQLx over DatabasePool)
//! InMemoryUserRepository            (memory/, for tests and local runs)
//! ```
//!
//! Every repository trait has both implementations, so services and
//! handlers can be exercised without a database.

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
