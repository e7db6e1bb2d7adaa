use serde::{Deserialize, Serialize};

use crate::slug::web_name;

/// A single catalog entry (homebrew app or skin)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct App {
    pub title: String,
    pub author: String,
    /// Hex colour such as `#1d8056`
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    /// Target systems, e.g. `["3DS"]` (Universal-DB only)
    #[serde(default)]
    pub systems: Vec<String>,
}

/// Search endpoint response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<App>,
}

/// TWiLight Menu++ extras categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkinStore {
    Unlaunch,
    NintendoDsi,
    R4Original,
    Nintendo3ds,
    Font,
    Icon,
}

impl SkinStore {
    pub const ALL: [SkinStore; 6] = [
        SkinStore::Unlaunch,
        SkinStore::NintendoDsi,
        SkinStore::R4Original,
        SkinStore::Nintendo3ds,
        SkinStore::Font,
        SkinStore::Icon,
    ];

    /// Name as used by the extras API
    pub fn display_name(&self) -> &'static str {
        match self {
            SkinStore::Unlaunch => "Unlaunch",
            SkinStore::NintendoDsi => "Nintendo DSi",
            SkinStore::R4Original => "R4 Original",
            SkinStore::Nintendo3ds => "Nintendo 3DS",
            SkinStore::Font => "Font",
            SkinStore::Icon => "Icon",
        }
    }

    /// Path segment on skins.ds-homebrew.com
    pub fn slug(&self) -> String {
        web_name(self.display_name())
    }
}

/// Catalog to query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Store {
    /// Universal-DB (DS and 3DS homebrew)
    Udb,
    Skins(SkinStore),
}

impl Store {
    /// Resolve a store from user input: `udb`, a skin store display name or
    /// its slug (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim();
        if name.eq_ignore_ascii_case("udb") {
            return Some(Store::Udb);
        }
        SkinStore::ALL
            .into_iter()
            .find(|store| {
                store.display_name().eq_ignore_ascii_case(name) || store.slug() == web_name(name)
            })
            .map(Store::Skins)
    }

    /// Base of the public page URL an app title slug is appended to
    pub fn page_base_url(&self, app: &App) -> String {
        match self {
            Store::Udb => format!(
                "https://db.universal-team.net/{}/",
                app.systems
                    .first()
                    .map(|system| system.to_lowercase())
                    .unwrap_or_default()
            ),
            Store::Skins(store) => format!("https://skins.ds-homebrew.com/{}/", store.slug()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_parse() {
        assert_eq!(Store::parse("udb"), Some(Store::Udb));
        assert_eq!(Store::parse("UDB"), Some(Store::Udb));
        assert_eq!(
            Store::parse("Nintendo DSi"),
            Some(Store::Skins(SkinStore::NintendoDsi))
        );
        assert_eq!(
            Store::parse("r4-original"),
            Some(Store::Skins(SkinStore::R4Original))
        );
        assert_eq!(Store::parse("font"), Some(Store::Skins(SkinStore::Font)));
        assert_eq!(Store::parse("gba"), None);
    }

    #[test]
    fn test_app_deserialize_minimal() {
        let app: App = serde_json::from_str(r#"{"title":"Checkpoint","author":"FlagBrew"}"#).unwrap();
        assert_eq!(app.title, "Checkpoint");
        assert!(app.color.is_none());
        assert!(app.systems.is_empty());
    }
}
