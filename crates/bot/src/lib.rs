//! Console update bot.
//!
//! Wires the console update feed monitor into the scheduler and exposes the
//! helpers command handlers share.

pub mod config;
pub mod error;
pub mod services;
pub mod utils;

use std::sync::Arc;
use std::time::Duration;

use discord::{DiscordClient, User};
use feed::FeedClient;
use tokio::sync::watch;

pub use config::{load_or_create, Config, Settings};
pub use error::{ConfigError, MonitorError, PersistenceError};
pub use services::{
    CycleOutcome, DiscordNotifier, FeedMonitor, FeedSource, HttpFeedSource, MonitorConfig,
    NinUpdateJob, Notifier, SchedulerJob, SchedulerService, SnapshotStore,
};

const USER_AGENT: &str = concat!("ninbot/", env!("CARGO_PKG_VERSION"));

const READY_RETRY_MIN: Duration = Duration::from_secs(5);
const READY_RETRY_MAX: Duration = Duration::from_secs(300);

/// Block until the Discord API accepts the bot token.
async fn wait_until_ready(client: &DiscordClient) -> User {
    let mut delay = READY_RETRY_MIN;
    loop {
        match client.current_user().await {
            Ok(user) => return user,
            Err(e) => {
                tracing::warn!("Discord not ready ({}), retrying in {}s", e, delay.as_secs());
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(READY_RETRY_MAX);
            }
        }
    }
}

/// Run the bot until ctrl-c.
pub async fn run_bot(config: Config) -> anyhow::Result<()> {
    let settings = load_or_create(&config.settings_path()).await?;
    let ninupdate = &settings.ninupdate;

    let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
    let discord_client = Arc::new(DiscordClient::new(http.clone(), &config.discord_token));

    let source = HttpFeedSource::new(
        FeedClient::with_client(http).timeout(ninupdate.timeout()),
        &ninupdate.feed_url,
    );
    let monitor = FeedMonitor::new(
        MonitorConfig::from(ninupdate),
        Arc::new(source),
        Arc::new(DiscordNotifier::new(Arc::clone(&discord_client))),
        SnapshotStore::new(config.snapshot_path()),
    );

    if !ninupdate.enabled {
        tracing::info!("Console update notifications are disabled in settings");
    }

    let scheduler = SchedulerService::new()
        .with_job(NinUpdateJob::new(Arc::new(monitor), ninupdate.interval()));

    let (ready_tx, ready_rx) = watch::channel(false);
    let handles = scheduler.start(ready_rx);
    tracing::info!("Scheduler started with {} job(s)", scheduler.job_count());

    tokio::select! {
        user = wait_until_ready(&discord_client) => {
            tracing::info!("Logged in as {} ({})", user.username, user.id);
            let _ = ready_tx.send(true);
            tokio::signal::ctrl_c().await?;
        }
        result = tokio::signal::ctrl_c() => {
            result?;
        }
    }

    tracing::info!("Shutting down");
    for handle in handles {
        handle.abort();
    }

    Ok(())
}
