use discord::{ActionRow, Button, ButtonStyle, Embed, InteractionResponse};

use crate::embed::app_embed;
use crate::models::{App, Store};

/// Buttons of a search result view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageAction {
    Previous,
    Next,
    Close,
}

impl PageAction {
    pub fn custom_id(&self) -> &'static str {
        match self {
            PageAction::Previous => "unistore:previous",
            PageAction::Next => "unistore:next",
            PageAction::Close => "unistore:close",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PageAction::Previous => "Previous",
            PageAction::Next => "Next",
            PageAction::Close => "Close",
        }
    }

    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        [PageAction::Previous, PageAction::Next, PageAction::Close]
            .into_iter()
            .find(|action| action.custom_id() == custom_id)
    }
}

/// Paginated view over search results.
///
/// The index always points at a valid result. Moving past either end is a
/// no-op answered with a deferred update; closing strips the buttons and
/// finishes the view, after which every action is deferred.
#[derive(Debug, Clone)]
pub struct StoreView {
    store: Store,
    apps: Vec<App>,
    index: usize,
    finished: bool,
}

impl StoreView {
    /// `None` when there is nothing to page through.
    pub fn new(store: Store, apps: Vec<App>) -> Option<Self> {
        if apps.is_empty() {
            return None;
        }
        Some(Self {
            store,
            apps,
            index: 0,
            finished: false,
        })
    }

    pub fn current(&self) -> &App {
        &self.apps[self.index]
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn embed(&self) -> Embed {
        app_embed(self.current(), self.store)
    }

    /// Button row, or nothing once the view is closed
    pub fn components(&self) -> Vec<ActionRow> {
        if self.finished {
            return Vec::new();
        }
        let buttons = [PageAction::Previous, PageAction::Next, PageAction::Close]
            .into_iter()
            .map(|action| {
                let style = match action {
                    PageAction::Close => ButtonStyle::Danger,
                    _ => ButtonStyle::Secondary,
                };
                Button::new(style, action.label(), action.custom_id())
            })
            .collect();
        vec![ActionRow::new(buttons)]
    }

    /// Apply a button press and build the interaction answer.
    pub fn handle(&mut self, action: PageAction) -> InteractionResponse {
        if self.finished {
            return InteractionResponse::deferred_update();
        }

        match action {
            PageAction::Previous => {
                if self.index == 0 {
                    return InteractionResponse::deferred_update();
                }
                self.index -= 1;
            }
            PageAction::Next => {
                if self.index + 1 == self.apps.len() {
                    return InteractionResponse::deferred_update();
                }
                self.index += 1;
            }
            PageAction::Close => {
                self.finished = true;
            }
        }

        InteractionResponse::update_message(self.embed(), self.components())
    }
}
