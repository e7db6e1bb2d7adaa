use thiserror::Error;

/// Discord API errors
#[derive(Debug, Error)]
pub enum DiscordError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Discord API returned an error
    #[error("Discord API error ({status}): {body}")]
    Api { status: u16, body: String },
}

impl DiscordError {
    /// The API answered 404 (unknown channel, user or message).
    pub fn is_not_found(&self) -> bool {
        matches!(self, DiscordError::Api { status: 404, .. })
    }

    /// The API answered 403 (missing permissions, DMs closed).
    pub fn is_forbidden(&self) -> bool {
        matches!(self, DiscordError::Api { status: 403, .. })
    }

    /// Response body of an API error, if any.
    pub fn text(&self) -> Option<&str> {
        match self {
            DiscordError::Api { body, .. } => Some(body),
            DiscordError::Http(_) => None,
        }
    }
}
