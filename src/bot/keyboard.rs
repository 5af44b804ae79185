//! Inline keyboards shown under bot messages.
//!
//! Keyboards are built as plain data ([`Keyboard`]) so the controller can be
//! exercised without a chat transport, and converted into Telegram markup at
//! the edge.
use crate::bot::action::Action;
use crate::feed::{CategoryKey, FeedSource};
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

pub const REFRESH_LABEL: &str = "🔄 Update feed";
pub const BACK_LABEL: &str = "⬅️ Choose another category";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Rows of buttons, top to bottom.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    /// All buttons in reading order.
    pub fn buttons(&self) -> impl Iterator<Item = &Button> {
        self.rows.iter().flatten()
    }
}

/// One row per category, in menu order, each selecting that category.
pub fn category_menu(source: &FeedSource) -> Keyboard {
    let rows = source
        .categories()
        .iter()
        .map(|c| vec![Button::new(c.label, Action::SelectCategory(c.key))])
        .collect();
    Keyboard { rows }
}

/// The two-button panel shown under a category's headlines.
///
/// Refresh re-selects the same category; back returns to the menu.
pub fn article_panel(key: CategoryKey) -> Keyboard {
    Keyboard {
        rows: vec![
            vec![Button::new(REFRESH_LABEL, Action::SelectCategory(key))],
            vec![Button::new(BACK_LABEL, Action::Back)],
        ],
    }
}

impl From<&Keyboard> for InlineKeyboardMarkup {
    fn from(keyboard: &Keyboard) -> Self {
        InlineKeyboardMarkup::new(keyboard.rows.iter().map(|row| {
            row.iter()
                .map(|b| InlineKeyboardButton::callback(b.label.clone(), b.action.encode()))
                .collect::<Vec<_>>()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use teloxide::types::InlineKeyboardButtonKind;

    #[test]
    fn test_category_menu_lists_every_category_in_order() {
        let menu = category_menu(&FeedSource::from_urls([]));
        let labels: Vec<&str> = menu.buttons().map(|b| b.label.as_str()).collect();
        assert_eq!(
            labels,
            vec![
                "🌍 World news",
                "🧩 Technology",
                "⚽ Sports",
                "🩺 Health",
                "🎬 Gaming"
            ]
        );
        assert!(menu.rows.iter().all(|row| row.len() == 1));
        assert_eq!(
            menu.rows[2][0].action,
            Action::SelectCategory(CategoryKey::Sports)
        );
    }

    #[test]
    fn test_article_panel_has_refresh_and_back() {
        let panel = article_panel(CategoryKey::Health);
        let buttons: Vec<&Button> = panel.buttons().collect();
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0].label, REFRESH_LABEL);
        assert_eq!(
            buttons[0].action,
            Action::SelectCategory(CategoryKey::Health)
        );
        assert_eq!(buttons[1].label, BACK_LABEL);
        assert_eq!(buttons[1].action, Action::Back);
    }

    #[test]
    fn test_markup_carries_encoded_actions() {
        let markup = InlineKeyboardMarkup::from(&article_panel(CategoryKey::Sports));
        assert_eq!(markup.inline_keyboard.len(), 2);

        let data: Vec<String> = markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|button| match &button.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(data, vec!["rss_sports", "back_to_categories"]);
    }
}
