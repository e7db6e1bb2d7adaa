use std::sync::Arc;

use discord::Embed;
use feed::{parse_feed, FeedEntry};
use tokio::sync::Mutex;

use super::feed_source::FeedSource;
use super::notifier::Notifier;
use super::snapshot::{content_hash, SnapshotStore};
use crate::config::NinUpdateSettings;
use crate::error::MonitorError;

/// Monitor settings, fixed at construction
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub enabled: bool,
    pub channel_id: Option<String>,
    pub tracked_systems: Vec<String>,
}

impl MonitorConfig {
    /// Channel to notify, or `None` when the monitor should not run.
    fn target_channel(&self) -> Option<&str> {
        if !self.enabled {
            return None;
        }
        self.channel_id.as_deref().filter(|id| !id.is_empty())
    }
}

impl From<&NinUpdateSettings> for MonitorConfig {
    fn from(settings: &NinUpdateSettings) -> Self {
        Self {
            enabled: settings.enabled,
            channel_id: settings.channel_id.clone(),
            tracked_systems: settings.tracked_systems.clone(),
        }
    }
}

/// Result of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Monitor disabled or no channel configured
    Disabled,
    /// First document stored, nothing compared
    Bootstrapped,
    /// Fetched document identical to the snapshot
    Unchanged,
    /// Snapshot replaced after diffing
    Updated { notifications: usize },
}

/// A tracked system whose version differs from an older feed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChange<'a> {
    pub system: &'a str,
    pub version: &'a str,
    pub link: &'a str,
}

impl VersionChange<'_> {
    pub fn message(&self) -> String {
        format!(
            "ℹ️ New update version for {}: [{}]({})",
            self.system, self.version, self.link
        )
    }

    pub fn embed(&self) -> Embed {
        Embed::new().description(self.message())
    }
}

/// Compare new entries against old ones.
///
/// Every tracked new entry is checked against every old entry of the same
/// system, and each old entry with a different version yields a change. An
/// old feed holding several stale entries for one system therefore yields
/// several changes for the same new entry.
pub fn version_changes<'a>(
    new_entries: &'a [FeedEntry],
    old_entries: &[FeedEntry],
    tracked_systems: &[String],
) -> Vec<VersionChange<'a>> {
    let is_tracked = |system: &str| tracked_systems.iter().any(|tracked| tracked == system);
    let mut changes = Vec::new();

    for entry in new_entries {
        let Some((system, version)) = entry.system_and_version() else {
            tracing::debug!("Skipping feed entry with unexpected title: {:?}", entry.title);
            continue;
        };
        if !is_tracked(system) {
            continue;
        }

        for old in old_entries {
            let Some((old_system, old_version)) = old.system_and_version() else {
                continue;
            };
            if !is_tracked(old_system) {
                continue;
            }
            if system == old_system && version != old_version {
                changes.push(VersionChange {
                    system,
                    version,
                    link: &entry.link,
                });
            }
        }
    }

    changes
}

/// Watches the console update feed and announces firmware version changes.
pub struct FeedMonitor {
    config: MonitorConfig,
    source: Arc<dyn FeedSource>,
    notifier: Arc<dyn Notifier>,
    snapshot: SnapshotStore,
    cycle_lock: Mutex<()>,
}

impl FeedMonitor {
    pub fn new(
        config: MonitorConfig,
        source: Arc<dyn FeedSource>,
        notifier: Arc<dyn Notifier>,
        snapshot: SnapshotStore,
    ) -> Self {
        Self {
            config,
            source,
            notifier,
            snapshot,
            cycle_lock: Mutex::new(()),
        }
    }

    /// Run one fetch/compare/notify/persist cycle.
    ///
    /// The snapshot is only written after the whole document has been
    /// fetched (and, when a snapshot already exists, parsed). Any error
    /// leaves the previous snapshot in place. Concurrent calls queue up
    /// behind each other.
    pub async fn poll_cycle(&self) -> Result<CycleOutcome, MonitorError> {
        let Some(channel_id) = self.config.target_channel() else {
            tracing::debug!("Feed monitor disabled, skipping cycle");
            return Ok(CycleOutcome::Disabled);
        };

        let _guard = self.cycle_lock.lock().await;

        let fetched = self.source.fetch().await.map_err(MonitorError::Fetch)?;

        let Some(previous) = self.snapshot.load().await? else {
            self.snapshot.save(&fetched).await?;
            tracing::info!("Stored initial feed snapshot ({} bytes)", fetched.len());
            return Ok(CycleOutcome::Bootstrapped);
        };

        if content_hash(&previous) == content_hash(&fetched) {
            tracing::debug!("Feed unchanged");
            return Ok(CycleOutcome::Unchanged);
        }

        let new_entries = parse_feed(&fetched).map_err(MonitorError::Parse)?;
        let old_entries = match parse_feed(&previous) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Stored snapshot is unreadable, replacing it: {}", e);
                Vec::new()
            }
        };

        let changes = version_changes(&new_entries, &old_entries, &self.config.tracked_systems);
        let mut notifications = 0;
        for change in &changes {
            tracing::info!("{} updated to {}", change.system, change.version);
            match self.notifier.send_embed(channel_id, change.embed()).await {
                Ok(()) => notifications += 1,
                Err(e) => tracing::error!("Failed to send update notification: {}", e),
            }
        }

        self.snapshot.save(&fetched).await?;

        Ok(CycleOutcome::Updated { notifications })
    }
}
