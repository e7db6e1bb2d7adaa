use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::models::{App, SearchResponse, Store};
use crate::CatalogError;

const UDB_API_URL: &str = "https://udb-api.lightsage.dev";
const EXTRAS_API_URL: &str = "https://twlmenu-extras.api.hansol.ca";

/// Client for the Universal-DB and TWiLight Menu++ extras APIs
pub struct CatalogClient {
    client: Client,
    udb_url: String,
    extras_url: String,
}

impl CatalogClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            udb_url: UDB_API_URL.to_string(),
            extras_url: EXTRAS_API_URL.to_string(),
        }
    }

    pub fn with_base_urls(
        client: Client,
        udb_url: impl Into<String>,
        extras_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            udb_url: udb_url.into(),
            extras_url: extras_url.into(),
        }
    }

    pub(crate) fn search_url(&self, store: Store, query: &str) -> String {
        let query = urlencoding::encode(query);
        match store {
            Store::Udb => format!("{}/search/{}", self.udb_url, query),
            Store::Skins(skins) => format!(
                "{}/search/{}/{}",
                self.extras_url,
                urlencoding::encode(skins.display_name()),
                query
            ),
        }
    }

    pub(crate) fn random_url(&self, store: Store) -> String {
        match store {
            Store::Udb => format!("{}/random", self.udb_url),
            Store::Skins(skins) => format!(
                "{}/random/{}",
                self.extras_url,
                urlencoding::encode(skins.display_name())
            ),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> crate::Result<T> {
        tracing::debug!("Querying catalog: {}", url);
        let response = self.client.get(url).send().await?;

        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::UNPROCESSABLE_ENTITY => Err(CatalogError::Validation),
            status => Err(CatalogError::UnexpectedStatus(status.as_u16())),
        }
    }

    /// Search a store. An empty result list is not an error.
    pub async fn search(&self, store: Store, query: &str) -> crate::Result<Vec<App>> {
        let response: SearchResponse = self.get_json(&self.search_url(store, query)).await?;
        Ok(response.results)
    }

    /// Random picks from a store (the API answers with a list)
    pub async fn random(&self, store: Store) -> crate::Result<Vec<App>> {
        self.get_json(&self.random_url(store)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkinStore;

    #[test]
    fn test_urls() {
        let client = CatalogClient::new(Client::new());
        assert_eq!(
            client.search_url(Store::Udb, "twilight menu"),
            "https://udb-api.lightsage.dev/search/twilight%20menu"
        );
        assert_eq!(
            client.search_url(Store::Skins(SkinStore::NintendoDsi), "pink"),
            "https://twlmenu-extras.api.hansol.ca/search/Nintendo%20DSi/pink"
        );
        assert_eq!(client.random_url(Store::Udb), "https://udb-api.lightsage.dev/random");
        assert_eq!(
            client.random_url(Store::Skins(SkinStore::Font)),
            "https://twlmenu-extras.api.hansol.ca/random/Font"
        );
    }
}
