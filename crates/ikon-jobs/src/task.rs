//! Unit of scheduled work.

use crate::error::JobResult;
use async_trait::async_trait;

/// Work run by the scheduler on each trigger.
#[async_trait]
pub trait ScheduledTask: Send + Sync {
    /// Stable name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Runs once.
    async fn run(&self) -> JobResult<()>;
}
