//! Core traits shared across layers.

use async_trait::async_trait;

/// A dependency probed by the readiness endpoint.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Short name reported when the probe fails.
    fn name(&self) -> &str;

    async fn check(&self) -> HealthStatus;
}

/// Outcome of a [`HealthCheck`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    Unhealthy(String),
}

impl HealthStatus {
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    /// Returns the failure reason, if any.
    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Healthy => None,
            Self::Unhealthy(reason) => Some(reason),
        }
    }
}
