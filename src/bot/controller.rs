//! Category selection → feed fetch → render.
//!
//! The controller is transport-agnostic: it turns a decoded [`Action`] into
//! the [`RenderedPage`] the current message should show. Sending and editing
//! messages is left to the transport adapter.
use crate::bot::action::Action;
use crate::bot::format::{self, FAILURE_NOTICE, MENU_GREETING, MENU_PROMPT};
use crate::bot::keyboard::{self, Keyboard};
use crate::feed::{CategoryKey, FeedFetcher, FeedSource};
use std::sync::Arc;

/// What a bot message currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    MenuShown,
    ArticlesShown(CategoryKey),
}

/// Text plus keyboard for one reply. Lives only until it is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedPage {
    pub text: String,
    pub keyboard: Keyboard,
    pub screen: Screen,
}

/// Owns the bot's two interactions: choosing a category and going back.
///
/// Holds only immutable state, so a single instance behind an `Arc` serves
/// every concurrently running handler.
pub struct BotController {
    source: Arc<FeedSource>,
    fetcher: FeedFetcher,
}

impl BotController {
    pub fn new(source: Arc<FeedSource>, fetcher: FeedFetcher) -> Self {
        Self { source, fetcher }
    }

    /// The menu sent in reply to `/start`.
    pub fn start(&self) -> RenderedPage {
        self.menu_page(MENU_GREETING)
    }

    /// The page that should replace the current message after `action`.
    pub async fn handle(&self, action: Action) -> RenderedPage {
        match action {
            Action::SelectCategory(key) => self.show_category(key).await,
            Action::Back => self.menu_page(MENU_PROMPT),
        }
    }

    /// Fetches and renders `key`. Used for both first selection and refresh.
    ///
    /// On any failure the message shows [`FAILURE_NOTICE`] over the category
    /// menu and the screen stays [`Screen::MenuShown`].
    async fn show_category(&self, key: CategoryKey) -> RenderedPage {
        let entries = self.fetcher.latest(&self.source, key).await;

        if entries.is_empty() {
            tracing::info!(category = %key, "Showing failure notice");
            return self.menu_page(FAILURE_NOTICE);
        }

        let label = self.source.label(key);
        RenderedPage {
            text: format::render(&entries, label, self.fetcher.max_entries()),
            keyboard: keyboard::article_panel(key),
            screen: Screen::ArticlesShown(key),
        }
    }

    fn menu_page(&self, text: &str) -> RenderedPage {
        RenderedPage {
            text: text.to_string(),
            keyboard: keyboard::category_menu(&self.source),
            screen: Screen::MenuShown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::FetchSettings;
    use pretty_assertions::assert_eq;

    fn controller(source: FeedSource) -> BotController {
        let fetcher = FeedFetcher::new(&FetchSettings::default()).unwrap();
        BotController::new(Arc::new(source), fetcher)
    }

    #[test]
    fn test_start_shows_greeting_menu() {
        let page = controller(FeedSource::from_urls([])).start();
        assert_eq!(page.text, MENU_GREETING);
        assert_eq!(page.screen, Screen::MenuShown);
        assert_eq!(page.keyboard.buttons().count(), CategoryKey::ALL.len());
    }

    #[tokio::test]
    async fn test_back_shows_prompt_menu() {
        let controller = controller(FeedSource::from_urls([]));
        let page = controller.handle(Action::Back).await;
        assert_eq!(page.text, MENU_PROMPT);
        assert_eq!(page.screen, Screen::MenuShown);
        assert_eq!(page.keyboard, controller.start().keyboard);
    }

    #[tokio::test]
    async fn test_unconfigured_category_shows_failure_notice() {
        let controller = controller(FeedSource::from_urls([]));
        let page = controller
            .handle(Action::SelectCategory(CategoryKey::Entertainment))
            .await;
        assert_eq!(page.text, FAILURE_NOTICE);
        assert_eq!(page.screen, Screen::MenuShown);
        assert_eq!(page.keyboard, controller.start().keyboard);
    }
}
