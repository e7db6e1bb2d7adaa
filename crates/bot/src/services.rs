mod feed_monitor;
mod feed_source;
mod notifier;
mod scheduler;
mod snapshot;

pub use feed_monitor::{version_changes, CycleOutcome, FeedMonitor, MonitorConfig, VersionChange};
pub use feed_source::{FeedSource, HttpFeedSource};
pub use notifier::{DiscordNotifier, Notifier};
pub use scheduler::{JobResult, NinUpdateJob, SchedulerJob, SchedulerService};
pub use snapshot::{content_hash, SnapshotStore};
