use async_trait::async_trait;
use feed::FeedClient;

/// Where the monitor gets the raw feed document from
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the complete document. Only fetch errors are expected here.
    async fn fetch(&self) -> feed::Result<Vec<u8>>;
}

/// Fetches a fixed URL over HTTP
pub struct HttpFeedSource {
    client: FeedClient,
    url: String,
}

impl HttpFeedSource {
    pub fn new(client: FeedClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl FeedSource for HttpFeedSource {
    async fn fetch(&self) -> feed::Result<Vec<u8>> {
        self.client.fetch_bytes(&self.url).await
    }
}
