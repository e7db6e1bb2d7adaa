use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::traits::{JobResult, SchedulerJob};
use crate::services::{CycleOutcome, FeedMonitor};

/// Console firmware update check, hourly by default.
pub struct NinUpdateJob {
    monitor: Arc<FeedMonitor>,
    interval: Duration,
}

impl NinUpdateJob {
    pub fn new(monitor: Arc<FeedMonitor>, interval: Duration) -> Self {
        Self { monitor, interval }
    }
}

#[async_trait]
impl SchedulerJob for NinUpdateJob {
    fn name(&self) -> &'static str {
        "NinUpdate"
    }

    fn interval(&self) -> Duration {
        self.interval
    }

    async fn execute(&self) -> JobResult {
        tracing::debug!("Checking console update feed");

        match self.monitor.poll_cycle().await? {
            CycleOutcome::Disabled => tracing::debug!("Console update feed disabled"),
            CycleOutcome::Bootstrapped => tracing::info!("Console update feed snapshot created"),
            CycleOutcome::Unchanged => tracing::debug!("Console update feed unchanged"),
            CycleOutcome::Updated { notifications } => tracing::info!(
                "Console update feed changed: {} notification(s) sent",
                notifications
            ),
        }

        Ok(())
    }
}
