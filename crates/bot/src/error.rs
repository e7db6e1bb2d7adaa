use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML")]
    Parse(#[from] toml::de::Error),
    #[error("Failed to serialize TOML")]
    Serialize(#[from] toml::ser::Error),
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),
}

/// Snapshot file could not be read or replaced
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to read snapshot {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to write snapshot {path}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Why a monitor cycle stopped early
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("Feed fetch failed")]
    Fetch(#[source] feed::FeedError),
    #[error("Feed parse failed")]
    Parse(#[source] feed::FeedError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
