//! Job error types.

use thiserror::Error;

/// Result type for job operations.
pub type JobResult<T> = Result<T, JobError>;

/// Job-related errors.
#[derive(Debug, Error)]
pub enum JobError {
    /// Job execution failed.
    #[error("Job execution failed: {0}")]
    ExecutionFailed(String),

    /// A service call made by the job failed.
    #[error("Service error: {0}")]
    Service(#[from] ikon_core::IkonError),

    /// Job not found.
    #[error("Job not found: {0}")]
    NotFound(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Scheduler error.
    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

impl JobError {
    /// Short label used as a metric tag.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::ExecutionFailed(_) => "execution",
            Self::Service(_) => "service",
            Self::NotFound(_) => "not_found",
            Self::Configuration(_) => "configuration",
            Self::Scheduler(_) => "scheduler",
        }
    }
}
