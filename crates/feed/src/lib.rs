//! RSS 2.0 / Atom feed client.
//!
//! Fetches feed documents as raw bytes and parses them into a flat list of
//! [`FeedEntry`] values (title + link), independent of the feed dialect.

mod client;
mod error;
pub mod models;
mod parser;

pub use client::{FeedClient, DEFAULT_TIMEOUT};
pub use error::FeedError;
pub use models::FeedEntry;
pub use parser::parse_feed;

pub type Result<T> = std::result::Result<T, FeedError>;
