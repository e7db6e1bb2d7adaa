use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use discord::{DiscordClient, Embed};

/// Delivery of embed notifications to a channel
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_embed(&self, channel_id: &str, embed: Embed) -> Result<()>;
}

/// Discord implementation
pub struct DiscordNotifier {
    client: Arc<DiscordClient>,
}

impl DiscordNotifier {
    pub fn new(client: Arc<DiscordClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send_embed(&self, channel_id: &str, embed: Embed) -> Result<()> {
        self.client
            .send_embed(channel_id, embed)
            .await
            .map(|_| ())
            .map_err(|e| anyhow::anyhow!("Discord send failed: {}", e))
    }
}
