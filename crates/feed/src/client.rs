use std::time::Duration;

use reqwest::Client;

use crate::error::FeedError;

/// Default upper bound for a single feed request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Feed fetcher client
pub struct FeedClient {
    client: Client,
    timeout: Duration,
}

impl FeedClient {
    /// Create a new FeedClient with a custom reqwest Client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Fetch the raw bytes of a feed document.
    ///
    /// Fails with [`FeedError::Request`] on network errors or timeouts and
    /// with [`FeedError::Status`] on any non-2xx response. The body is read
    /// fully into memory before returning.
    pub async fn fetch_bytes(&self, url: &str) -> crate::Result<Vec<u8>> {
        tracing::debug!("Fetching feed from: {}", url);

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!("Fetched {} bytes from {}", bytes.len(), url);

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_bytes_connection_refused_is_fetch_error() {
        let client = FeedClient::with_client(Client::new()).timeout(Duration::from_secs(2));
        let err = client
            .fetch_bytes("http://127.0.0.1:9/feed.xml")
            .await
            .unwrap_err();
        assert!(err.is_fetch());
    }
}
