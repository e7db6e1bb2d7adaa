use discord::{CreateMessage, Embed};

use crate::client::CatalogClient;
use crate::embed::{app_embed, landing_embed};
use crate::models::Store;
use crate::view::StoreView;
use crate::CatalogError;

/// What the command should answer with
#[derive(Debug, Clone)]
pub enum LookupReply {
    /// A single embed, no buttons
    Embed(Embed),
    /// A paginated search result view
    View(StoreView),
    /// A plain text notice
    Text(String),
}

impl LookupReply {
    /// Channel message for this reply. A view is posted with its buttons.
    pub fn message(&self) -> CreateMessage {
        match self {
            LookupReply::Embed(embed) => CreateMessage::embed(embed.clone()),
            LookupReply::View(view) => CreateMessage::embed(view.embed()).components(view.components()),
            LookupReply::Text(text) => CreateMessage::text(text.as_str()),
        }
    }
}

/// Run a catalog command.
///
/// With `random` set one random entry is shown. A non-empty `argument`
/// searches the store, and an empty one shows the store's landing embed.
pub async fn lookup(client: &CatalogClient, store: Store, argument: &str, random: bool) -> LookupReply {
    let argument = argument.trim();

    if random {
        return match client.random(store).await {
            Ok(apps) => match apps.first() {
                Some(app) => LookupReply::Embed(app_embed(app, store)),
                None => LookupReply::Text(not_found_message(store).to_string()),
            },
            Err(e) => error_reply(e),
        };
    }

    if argument.is_empty() {
        return LookupReply::Embed(landing_embed(store));
    }

    match client.search(store, argument).await {
        Ok(apps) => match StoreView::new(store, apps) {
            Some(view) => LookupReply::View(view),
            None => LookupReply::Text(not_found_message(store).to_string()),
        },
        Err(e) => error_reply(e),
    }
}

fn not_found_message(store: Store) -> &'static str {
    match store {
        Store::Udb => "App cannot be found. Please try again.",
        Store::Skins(_) => "Skin cannot be found. Please try again.",
    }
}

fn error_reply(error: CatalogError) -> LookupReply {
    tracing::warn!("Catalog lookup failed: {}", error);
    let text = match error {
        CatalogError::Validation => "HTTP 422: Validation error. Please try again later.",
        _ => "Unknown response from API. Please try again later.",
    };
    LookupReply::Text(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkinStore;

    fn offline_client() -> CatalogClient {
        CatalogClient::with_base_urls(reqwest::Client::new(), "http://127.0.0.1:9", "http://127.0.0.1:9")
    }

    #[tokio::test]
    async fn test_empty_argument_shows_landing_without_request() {
        let reply = lookup(&offline_client(), Store::Skins(SkinStore::Font), "  ", false).await;
        match reply {
            LookupReply::Embed(embed) => {
                assert_eq!(embed.title.as_deref(), Some("TWiLight Menu++ Fonts"))
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_request_failure_maps_to_unknown_response() {
        let reply = lookup(&offline_client(), Store::Udb, "checkpoint", false).await;
        match reply {
            LookupReply::Text(text) => {
                assert_eq!(text, "Unknown response from API. Please try again later.")
            }
            other => panic!("unexpected reply: {:?}", other),
        }
    }

    #[test]
    fn test_reply_messages() {
        let app = crate::models::App {
            title: "Checkpoint".to_string(),
            author: "FlagBrew".to_string(),
            color: None,
            avatar: None,
            icon: None,
            image: None,
            description: None,
            systems: vec!["3DS".to_string()],
        };
        let view = StoreView::new(Store::Udb, vec![app]).unwrap();

        let message = LookupReply::View(view).message();
        assert_eq!(message.embeds.len(), 1);
        assert_eq!(message.embeds[0].title.as_deref(), Some("Checkpoint"));
        assert_eq!(message.components.as_ref().map(Vec::len), Some(1));

        let message = LookupReply::Embed(landing_embed(Store::Udb)).message();
        assert_eq!(message.embeds.len(), 1);
        assert!(message.components.is_none());

        let message = LookupReply::Text("App cannot be found. Please try again.".to_string()).message();
        assert_eq!(
            message.content.as_deref(),
            Some("App cannot be found. Please try again.")
        );
        assert!(message.embeds.is_empty());
    }

    #[test]
    fn test_error_texts() {
        match error_reply(CatalogError::Validation) {
            LookupReply::Text(text) => {
                assert_eq!(text, "HTTP 422: Validation error. Please try again later.")
            }
            other => panic!("unexpected reply: {:?}", other),
        }
        assert_eq!(
            not_found_message(Store::Skins(SkinStore::Icon)),
            "Skin cannot be found. Please try again."
        );
    }
}
