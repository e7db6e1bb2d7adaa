use serde::{Deserialize, Serialize};

/// A single item of a feed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
}

impl FeedEntry {
    pub fn new(title: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }

    /// Split the title into its `system` and `version` tokens.
    ///
    /// Returns `None` unless the title is exactly two whitespace-separated tokens.
    pub fn system_and_version(&self) -> Option<(&str, &str)> {
        let mut parts = self.title.split_whitespace();
        let system = parts.next()?;
        let version = parts.next()?;
        if parts.next().is_some() {
            return None;
        }
        Some((system, version))
    }
}
