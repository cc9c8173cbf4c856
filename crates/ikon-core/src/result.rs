//! Result type aliases for IkonGrind.

use crate::IkonError;

/// A specialized `Result` type for IkonGrind operations.
pub type IkonResult<T> = Result<T, IkonError>;
