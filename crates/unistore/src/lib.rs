//! Homebrew catalog browser.
//!
//! Queries Universal-DB and the TWiLight Menu++ skin stores, renders the
//! results as Discord embeds, and keeps the Previous/Next/Close pagination
//! state of a search result view.

mod client;
mod embed;
mod error;
mod lookup;
pub mod models;
mod slug;
mod view;

pub use client::CatalogClient;
pub use embed::{app_embed, landing_embed};
pub use error::CatalogError;
pub use lookup::{lookup, LookupReply};
pub use models::{App, SkinStore, Store};
pub use slug::web_name;
pub use view::{PageAction, StoreView};

pub type Result<T> = std::result::Result<T, CatalogError>;
