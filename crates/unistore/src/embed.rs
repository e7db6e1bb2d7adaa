use discord::Embed;

use crate::models::{App, SkinStore, Store};
use crate::slug::web_name;

const UDB_COLOR: u32 = 0x1d8056;
const SKINS_COLOR: u32 = 0xda4a53;

const UNIVERSAL_TEAM_AVATAR: &str = "https://avatars.githubusercontent.com/u/49733679?s=400&v=4";
const DS_HOMEBREW_AVATAR: &str = "https://avatars.githubusercontent.com/u/46971470?s=400&v=4";
const EXTRAS_ICONS: &str =
    "https://raw.githubusercontent.com/DS-Homebrew/twlmenu-extras/master/unistore/icons";

/// Parse a `#rrggbb` colour. Anything else yields `None`.
fn parse_color(color: &str) -> Option<u32> {
    u32::from_str_radix(color.strip_prefix('#')?, 16).ok()
}

/// Render a catalog entry
pub fn app_embed(app: &App, store: Store) -> Embed {
    let mut embed = Embed::new()
        .title(&app.title)
        .author(&app.author, app.avatar.clone())
        .url(format!("{}{}", store.page_base_url(app), web_name(&app.title)));

    if let Some(color) = app.color.as_deref().and_then(parse_color) {
        embed = embed.color(color);
    }

    if let Some(thumbnail) = app
        .icon
        .as_ref()
        .or(app.image.as_ref())
        .or(app.avatar.as_ref())
    {
        embed = embed.thumbnail(thumbnail);
    }

    if let Some(description) = &app.description {
        embed = embed.description(description);
    }

    embed
}

/// Store overview shown when no search term is given
pub fn landing_embed(store: Store) -> Embed {
    let skins = match store {
        Store::Udb => {
            return Embed::new()
                .title("Universal-DB")
                .color(UDB_COLOR)
                .url("https://db.universal-team.net/")
                .author("Universal-Team", None)
                .thumbnail(UNIVERSAL_TEAM_AVATAR)
                .description("A database of DS and 3DS homebrew");
        }
        Store::Skins(skins) => skins,
    };

    let (title, thumbnail, description) = match skins {
        SkinStore::Unlaunch => (
            "Unlaunch Backgrounds",
            DS_HOMEBREW_AVATAR.to_string(),
            "Custom backgrounds for Unlaunch",
        ),
        SkinStore::NintendoDsi => (
            "DSi Menu Skins",
            format!("{}/dsi.png", EXTRAS_ICONS),
            "Custom skins for TWiLight Menu++'s DSi Menu theme",
        ),
        SkinStore::R4Original => (
            "R4 Original Menu Skins",
            format!("{}/r4.png", EXTRAS_ICONS),
            "Custom skins for TWiLight Menu++'s R4 Original Menu theme",
        ),
        SkinStore::Nintendo3ds => (
            "3DS Menu Skins",
            format!("{}/3ds.png", EXTRAS_ICONS),
            "Custom skins for TWiLight Menu++'s 3DS Menu theme",
        ),
        SkinStore::Font => (
            "TWiLight Menu++ Fonts",
            format!("{}/font.png", EXTRAS_ICONS),
            "Custom fonts for TWiLight Menu++",
        ),
        SkinStore::Icon => (
            "TWiLight Menu++ Icons",
            DS_HOMEBREW_AVATAR.to_string(),
            "Custom icons for TWiLight Menu++",
        ),
    };

    Embed::new()
        .title(title)
        .color(SKINS_COLOR)
        .url(format!("https://skins.ds-homebrew.com/{}/", skins.slug()))
        .author("DS-Homebrew", None)
        .thumbnail(thumbnail)
        .description(description)
}
