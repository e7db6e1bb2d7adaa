#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP 422: Validation error")]
    Validation,

    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(u16),
}
