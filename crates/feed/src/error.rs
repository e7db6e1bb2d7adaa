use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("HTTP request failed")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} when fetching {url}")]
    Status { status: u16, url: String },

    #[error("Failed to parse feed: {0}")]
    Parse(String),
}

impl FeedError {
    /// Whether the error happened while fetching (network or HTTP status)
    /// rather than while parsing the document.
    pub fn is_fetch(&self) -> bool {
        matches!(self, FeedError::Request(_) | FeedError::Status { .. })
    }
}
