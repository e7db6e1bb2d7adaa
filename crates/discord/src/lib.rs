//! Discord REST API client library.
//!
//! This crate covers the small slice of the Discord HTTP API the bot needs:
//! posting messages and embeds to a channel, opening DM channels, checking
//! the bot user, and answering component interactions.
//!
//! # Example
//!
//! ```rust,ignore
//! use discord::{DiscordClient, Embed};
//!
//! let client = DiscordClient::new(reqwest::Client::new(), "BOT_TOKEN");
//! client
//!     .send_embed("123456789", Embed::new().description("Hello, World!"))
//!     .await?;
//! ```

mod client;
mod error;
mod markdown;
pub mod models;

pub use client::DiscordClient;
pub use error::DiscordError;
pub use markdown::escape_markdown;
pub use models::{
    ActionRow, Button, ButtonStyle, Channel, CreateMessage, Embed, EmbedAuthor, EmbedField,
    EmbedThumbnail, InteractionResponse, Message, User,
};

pub type Result<T> = std::result::Result<T, DiscordError>;
