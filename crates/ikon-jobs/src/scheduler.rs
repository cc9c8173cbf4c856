//! In-process cron scheduler.

use crate::error::{JobError, JobResult};
use crate::metrics::SchedulerMetrics;
use crate::task::ScheduledTask;
use chrono::{DateTime, Utc};
use cron::Schedule;
use ikon_config::SchedulerConfig;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

/// Scheduled job definition.
#[derive(Clone)]
pub struct ScheduledJob {
    /// Unique name, taken from the task.
    pub name: String,

    /// Cron expression (six fields, UTC).
    pub cron: String,

    schedule: Schedule,

    task: Arc<dyn ScheduledTask>,

    next_run: Option<DateTime<Utc>>,
}

impl std::fmt::Debug for ScheduledJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScheduledJob")
            .field("name", &self.name)
            .field("cron", &self.cron)
            .field("next_run", &self.next_run)
            .finish_non_exhaustive()
    }
}

impl ScheduledJob {
    /// Create a new scheduled job.
    pub fn new(cron_expr: &str, task: Arc<dyn ScheduledTask>) -> JobResult<Self> {
        let schedule = Schedule::from_str(cron_expr)
            .map_err(|e| JobError::Configuration(format!("Invalid cron expression '{cron_expr}': {e}")))?;

        Ok(Self {
            name: task.name().to_string(),
            cron: cron_expr.to_string(),
            schedule,
            task,
            next_run: None,
        })
    }

    /// Calculate the next run time strictly after `from`.
    pub fn next_run_from(&self, from: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&from).next()
    }
}

/// Cron scheduler running each due job in its own task.
pub struct Scheduler {
    poll_interval: Duration,

    jobs: RwLock<HashMap<String, ScheduledJob>>,

    shutdown_tx: broadcast::Sender<()>,

    running: AtomicBool,
}

impl Scheduler {
    /// Create a new scheduler.
    #[must_use]
    pub fn new(poll_interval: Duration) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            poll_interval,
            jobs: RwLock::new(HashMap::new()),
            shutdown_tx,
            running: AtomicBool::new(false),
        }
    }

    /// Create a scheduler polling at the configured interval.
    #[must_use]
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.poll_interval())
    }

    /// Register a scheduled job. Its first run is the next cron time after now.
    pub fn register(&self, mut job: ScheduledJob) {
        job.next_run = job.next_run_from(Utc::now());
        let name = job.name.clone();
        info!(job_name = %name, cron = %job.cron, next_run = ?job.next_run, "Registered scheduled job");
        self.jobs.write().insert(name, job);
    }

    /// Register a task with a cron expression.
    pub fn schedule(&self, cron_expr: &str, task: Arc<dyn ScheduledTask>) -> JobResult<()> {
        self.register(ScheduledJob::new(cron_expr, task)?);
        Ok(())
    }

    /// Run the poll loop until [`Scheduler::stop`] is called.
    pub async fn start(&self) -> JobResult<()> {
        if self.running.swap(true, Ordering::SeqCst) {
            return Err(JobError::Scheduler("Scheduler already running".to_string()));
        }

        info!(
            poll_interval_ms = u64::try_from(self.poll_interval.as_millis()).unwrap_or(u64::MAX),
            jobs = self.jobs.read().len(),
            "Starting scheduler"
        );

        let mut shutdown_rx = self.shutdown_tx.subscribe();
        let mut poll_interval = interval(self.poll_interval);
        poll_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!("Received shutdown signal");
                    break;
                }

                _ = poll_interval.tick() => {
                    self.run_due_jobs(Utc::now());
                }
            }
        }

        self.running.store(false, Ordering::SeqCst);
        info!("Scheduler stopped");

        Ok(())
    }

    /// Stop the scheduler. Runs already in flight finish on their own.
    pub fn stop(&self) {
        info!("Stopping scheduler...");
        let _ = self.shutdown_tx.send(());
    }

    /// Spawns every job whose next run time has passed and
    /// advances its schedule.
    pub fn run_due_jobs(&self, now: DateTime<Utc>) -> Vec<JoinHandle<()>> {
        let due: Vec<Arc<dyn ScheduledTask>> = {
            let mut jobs = self.jobs.write();
            jobs.values_mut()
                .filter(|job| job.next_run.is_some_and(|at| at <= now))
                .map(|job| {
                    job.next_run = job.next_run_from(now);
                    debug!(job_name = %job.name, next_run = ?job.next_run, "Scheduled job due");
                    job.task.clone()
                })
                .collect()
        };

        due.into_iter().map(|task| self.spawn(task)).collect()
    }

    /// Trigger a scheduled job immediately, outside its schedule.
    pub fn trigger_job(&self, name: &str) -> JobResult<JoinHandle<()>> {
        let task = self
            .jobs
            .read()
            .get(name)
            .map(|job| job.task.clone())
            .ok_or_else(|| JobError::NotFound(format!("Scheduled job not found: {name}")))?;

        Ok(self.spawn(task))
    }

    fn spawn(&self, task: Arc<dyn ScheduledTask>) -> JoinHandle<()> {
        tokio::spawn(async move {
            let name = task.name();
            SchedulerMetrics::job_triggered(name);

            let start = Instant::now();
            match task.run().await {
                Ok(()) => {
                    SchedulerMetrics::job_completed(name, start.elapsed());
                    debug!(job_name = name, duration_ms = %start.elapsed().as_millis(), "Scheduled job completed");
                }
                Err(e) => {
                    SchedulerMetrics::job_failed(name, e.kind(), start.elapsed());
                    error!(job_name = name, error = %e, "Scheduled job failed");
                }
            }
        })
    }

    /// List all registered scheduled jobs.
    pub fn list_jobs(&self) -> Vec<ScheduledJobInfo> {
        self.jobs
            .read()
            .values()
            .map(|job| ScheduledJobInfo {
                name: job.name.clone(),
                cron: job.cron.clone(),
                next_run: job.next_run,
            })
            .collect()
    }
}

impl std::fmt::Debug for Scheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scheduler")
            .field("poll_interval", &self.poll_interval)
            .field("jobs", &self.jobs.read().len())
            .field("running", &self.running.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Information about a scheduled job.
#[derive(Debug, Clone)]
pub struct ScheduledJobInfo {
    /// Job name.
    pub name: String,

    /// Cron expression.
    pub cron: String,

    /// Next scheduled run time.
    pub next_run: Option<DateTime<Utc>>,
}
