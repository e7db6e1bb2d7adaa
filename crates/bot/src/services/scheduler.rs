mod nin_update_job;
mod traits;

pub use nin_update_job::NinUpdateJob;
pub use traits::{JobResult, SchedulerJob};

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Scheduler service that manages periodic background tasks.
///
/// Each job runs in its own tokio task. A job's loop awaits `execute`
/// before waiting for the next tick, so runs of one job never overlap, and
/// ticks missed while a run is still going are skipped.
///
/// # Example
///
/// ```rust,ignore
/// let (ready_tx, ready_rx) = tokio::sync::watch::channel(false);
/// let scheduler = SchedulerService::new().with_job(NinUpdateJob::new(monitor, interval));
///
/// let handles = scheduler.start(ready_rx);
/// ready_tx.send(true)?;
/// ```
pub struct SchedulerService {
    jobs: Vec<Arc<dyn SchedulerJob>>,
}

impl SchedulerService {
    /// Creates a new scheduler service with no jobs.
    pub fn new() -> Self {
        Self { jobs: Vec::new() }
    }

    /// Adds a job to the scheduler.
    ///
    /// Jobs are not started until [`start`](Self::start) is called.
    pub fn with_job<J: SchedulerJob + 'static>(mut self, job: J) -> Self {
        self.jobs.push(Arc::new(job));
        self
    }

    /// Starts all registered jobs.
    ///
    /// Every job waits until `ready` turns `true`, then runs immediately and
    /// afterwards once per interval. Returns immediately after spawning.
    pub fn start(&self, ready: watch::Receiver<bool>) -> Vec<JoinHandle<()>> {
        self.jobs
            .iter()
            .map(|job| {
                let job = Arc::clone(job);
                let ready = ready.clone();
                tokio::spawn(async move {
                    Self::run_job_loop(job, ready).await;
                })
            })
            .collect()
    }

    /// Runs a single job in an infinite loop.
    async fn run_job_loop(job: Arc<dyn SchedulerJob>, mut ready: watch::Receiver<bool>) {
        let name = job.name();
        let interval = job.interval();

        if ready.wait_for(|ready| *ready).await.is_err() {
            tracing::warn!("Job '{}' not started: readiness signal dropped", name);
            return;
        }

        tracing::info!("Job '{}' started (every {}s)", name, interval.as_secs());

        let mut timer = tokio::time::interval(interval);
        timer.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            timer.tick().await;

            match job.execute().await {
                Ok(()) => {
                    tracing::debug!("Job '{}' completed successfully", name);
                }
                Err(e) => {
                    tracing::error!("Job '{}' failed: {:#}", name, e);
                }
            }
        }
    }

    /// Returns the number of registered jobs.
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }
}

impl Default for SchedulerService {
    fn default() -> Self {
        Self::new()
    }
}
