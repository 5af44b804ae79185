//! The fixed set of news categories and the feed URL configured for each.
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

/// The fixed set of news categories the bot offers.
///
/// Declaration order is menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CategoryKey {
    General,
    Technology,
    Sports,
    Health,
    Entertainment,
}

impl CategoryKey {
    /// All categories, in menu order.
    pub const ALL: [CategoryKey; 5] = [
        Self::General,
        Self::Technology,
        Self::Sports,
        Self::Health,
        Self::Entertainment,
    ];

    /// Stable string key used in configuration and action identifiers.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Technology => "technology",
            Self::Sports => "sports",
            Self::Health => "health",
            Self::Entertainment => "entertainment",
        }
    }

    /// Button label shown in the category menu.
    pub fn label(self) -> &'static str {
        match self {
            Self::General => "🌍 World news",
            Self::Technology => "🧩 Technology",
            Self::Sports => "⚽ Sports",
            Self::Health => "🩺 Health",
            Self::Entertainment => "🎬 Gaming",
        }
    }

    /// Environment variable holding this category's feed URL.
    pub fn env_var(self) -> &'static str {
        match self {
            Self::General => "RSS_GENERAL",
            Self::Technology => "RSS_TECHNOLOGY",
            Self::Sports => "RSS_SPORTS",
            Self::Health => "RSS_HEALTH",
            Self::Entertainment => "RSS_ENTERTAINMENT",
        }
    }
}

impl fmt::Display for CategoryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for CategoryKey {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A category together with its (optional) feed endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub key: CategoryKey,
    pub label: &'static str,
    pub url: Option<Url>,
}

/// Immutable category → feed URL lookup, built once at startup.
///
/// Always holds every [`CategoryKey`] in menu order; categories without a
/// configured URL are kept so they still appear in the menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedSource {
    categories: Vec<Category>,
}

impl FeedSource {
    /// Builds a source from the URLs that are configured. Keys missing from
    /// `urls` stay in the menu with no endpoint.
    pub fn from_urls(urls: impl IntoIterator<Item = (CategoryKey, Url)>) -> Self {
        let mut categories: Vec<Category> = CategoryKey::ALL
            .into_iter()
            .map(|key| Category {
                key,
                label: key.label(),
                url: None,
            })
            .collect();

        for (key, url) in urls {
            if let Some(category) = categories.iter_mut().find(|c| c.key == key) {
                category.url = Some(url);
            }
        }

        Self { categories }
    }

    /// Feed endpoint for `key`, or `None` when the category is unconfigured.
    pub fn url_for(&self, key: CategoryKey) -> Option<&Url> {
        self.get(key).and_then(|c| c.url.as_ref())
    }

    /// Display label for `key`.
    pub fn label(&self, key: CategoryKey) -> &'static str {
        self.get(key).map_or_else(|| key.label(), |c| c.label)
    }

    /// Every category, in menu order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn get(&self, key: CategoryKey) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }
}
