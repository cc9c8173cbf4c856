//! Scheduler metrics.
//!
//! Recorded through the `metrics` facade; the binary decides whether an
//! exporter is installed.

use metrics::{counter, describe_counter, describe_histogram, histogram};
use std::time::Duration;

/// Metric names.
pub mod names {
    /// Scheduled jobs triggered.
    pub const SCHEDULER_JOBS_TRIGGERED: &str = "ikon_scheduler_jobs_triggered_total";
    /// Scheduled job runs that returned an error.
    pub const SCHEDULER_JOBS_FAILED: &str = "ikon_scheduler_jobs_failed_total";
    /// Scheduled job run duration in seconds.
    pub const SCHEDULER_JOB_DURATION_SECONDS: &str = "ikon_scheduler_job_duration_seconds";
    /// Leaderboard partitions rewritten.
    pub const LEADERBOARD_RECOMPUTATIONS: &str = "ikon_leaderboard_recomputations_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::SCHEDULER_JOBS_TRIGGERED, "Total number of scheduled jobs triggered");
    describe_counter!(names::SCHEDULER_JOBS_FAILED, "Total number of scheduled job runs that failed");
    describe_histogram!(names::SCHEDULER_JOB_DURATION_SECONDS, "Scheduled job run duration in seconds");
    describe_counter!(names::LEADERBOARD_RECOMPUTATIONS, "Total number of leaderboard recomputations");
}

/// Scheduler metrics recorder.
#[derive(Debug, Clone, Copy)]
pub struct SchedulerMetrics;

impl SchedulerMetrics {
    /// Record a scheduled job triggered.
    pub fn job_triggered(job_name: &str) {
        counter!(names::SCHEDULER_JOBS_TRIGGERED, "job_name" => job_name.to_string()).increment(1);
    }

    /// Record a finished run.
    pub fn job_completed(job_name: &str, duration: Duration) {
        histogram!(
            names::SCHEDULER_JOB_DURATION_SECONDS,
            "job_name" => job_name.to_string(),
            "status" => "completed"
        )
        .record(duration.as_secs_f64());
    }

    /// Record a failed run.
    pub fn job_failed(job_name: &str, error_kind: &str, duration: Duration) {
        counter!(
            names::SCHEDULER_JOBS_FAILED,
            "job_name" => job_name.to_string(),
            "error_type" => error_kind.to_string()
        )
        .increment(1);

        histogram!(
            names::SCHEDULER_JOB_DURATION_SECONDS,
            "job_name" => job_name.to_string(),
            "status" => "failed"
        )
        .record(duration.as_secs_f64());
    }

    /// Record a rewritten leaderboard season.
    pub fn leaderboard_recomputed(season_number: u32) {
        counter!(names::LEADERBOARD_RECOMPUTATIONS, "season" => season_number.to_string()).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_exporter() {
        register_metrics();
        SchedulerMetrics::job_triggered("leaderboard_refresh");
        SchedulerMetrics::job_completed("leaderboard_refresh", Duration::from_millis(12));
        SchedulerMetrics::job_failed("daily_reminder", "service", Duration::from_secs(1));
        SchedulerMetrics::leaderboard_recomputed(11);
    }
}
