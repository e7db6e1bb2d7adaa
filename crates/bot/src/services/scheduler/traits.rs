use std::time::Duration;

use async_trait::async_trait;

pub type JobResult = anyhow::Result<()>;

/// A periodic background job.
#[async_trait]
pub trait SchedulerJob: Send + Sync {
    /// Job name (used for logging)
    fn name(&self) -> &'static str;

    /// The interval between executions
    fn interval(&self) -> Duration;

    /// Execute one run. Errors are logged by the scheduler.
    async fn execute(&self) -> JobResult;
}
