//! Button action identifiers.
//!
//! Category buttons carry `rss_<key>`; the back button carries the fixed
//! literal `back_to_categories`. Raw callback data is decoded into an
//! [`Action`] once, at the transport boundary.
use crate::feed::CategoryKey;

/// Prefix of every category-selection identifier.
pub const SELECT_PREFIX: &str = "rss_";
/// Identifier of the "back to categories" button.
pub const BACK: &str = "back_to_categories";

/// A decoded button press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Show (or refresh) the headlines of a category.
    SelectCategory(CategoryKey),
    /// Return to the category menu.
    Back,
}

impl Action {
    pub fn encode(self) -> String {
        match self {
            Self::SelectCategory(key) => format!("{SELECT_PREFIX}{key}"),
            Self::Back => BACK.to_string(),
        }
    }

    /// Decodes callback data. Unknown or stale identifiers yield `None`.
    pub fn decode(data: &str) -> Option<Self> {
        if data == BACK {
            return Some(Self::Back);
        }
        data.strip_prefix(SELECT_PREFIX)
            .and_then(|key| key.parse().ok())
            .map(Self::SelectCategory)
    }
}
