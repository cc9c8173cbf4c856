//! Game domain: entities, value objects, and the pure rules applied to them.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
