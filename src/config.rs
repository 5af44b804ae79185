//! Configuration: an optional TOML file overlaid with environment variables.
//!
//! The file is optional: a missing file yields `Config::default()`.
//! Environment variables (`BOT_TOKEN`, `RSS_<CATEGORY>`) take precedence
//! over file values. The result is read once at startup and never mutated.
use crate::feed::{
    CategoryKey, FeedSource, FetchSettings, DEFAULT_MAX_FEED_SIZE, DEFAULT_USER_AGENT, MAX_ENTRIES,
};
use crate::util::validate_feed_url;
use secrecy::SecretString;
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

pub const TOKEN_ENV: &str = "BOT_TOKEN";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Config file too large: {0}")]
    TooLarge(String),
}

// ============================================================================
// Configuration Struct
// ============================================================================

/// Top-level bot configuration.
///
/// All fields use `#[serde(default)]` so any subset of keys can be specified.
/// The custom Debug impl masks `bot_token`.
#[derive(Deserialize)]
#[serde(default)]
pub struct Config {
    /// Telegram bot token. Required at startup.
    #[serde(deserialize_with = "deserialize_secret")]
    pub bot_token: Option<SecretString>,

    /// Per-request timeout for feed downloads, in seconds.
    pub fetch_timeout_secs: u64,

    /// Entries shown per category (clamped to 1..=5).
    pub max_entries: usize,

    /// User-Agent header sent with feed requests.
    pub user_agent: String,

    /// Largest feed body accepted, in bytes.
    pub max_feed_bytes: usize,

    /// Feed URL per category key (`general`, `technology`, ...).
    pub feeds: HashMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bot_token: None,
            fetch_timeout_secs: 10,
            max_entries: MAX_ENTRIES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_feed_bytes: DEFAULT_MAX_FEED_SIZE,
            feeds: HashMap::new(),
        }
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("bot_token", &self.bot_token.as_ref().map(|_| "[REDACTED]"))
            .field("fetch_timeout_secs", &self.fetch_timeout_secs)
            .field("max_entries", &self.max_entries)
            .field("user_agent", &self.user_agent)
            .field("max_feed_bytes", &self.max_feed_bytes)
            .field("feeds", &self.feeds)
            .finish()
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.trim().is_empty()).map(SecretString::from))
}

impl Config {
    /// Maximum config file size (1 MB).
    const MAX_FILE_SIZE: u64 = 1_048_576;

    const KNOWN_KEYS: [&'static str; 6] = [
        "bot_token",
        "fetch_timeout_secs",
        "max_entries",
        "user_agent",
        "max_feed_bytes",
        "feeds",
    ];

    /// Load configuration from a TOML file.
    ///
    /// - Missing file → `Ok(Config::default())`
    /// - Empty file → `Ok(Config::default())`
    /// - Invalid TOML → `Err(ConfigError::Parse)`
    /// - Unknown keys → accepted, logged as warning
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::metadata(path) {
            Ok(meta) if meta.len() > Self::MAX_FILE_SIZE => {
                return Err(ConfigError::TooLarge(format!(
                    "Config file is {} bytes (max {} bytes)",
                    meta.len(),
                    Self::MAX_FILE_SIZE
                )));
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
            Ok(_) => {}
        }

        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Config file disappeared, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(ConfigError::Io(e)),
        };

        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
            return Ok(Self::default());
        }

        if let Ok(raw) = content.parse::<toml::Table>() {
            for key in raw.keys() {
                if !Self::KNOWN_KEYS.contains(&key.as_str()) {
                    tracing::warn!(key = %key, "Unknown key in config file, ignoring");
                }
            }
        }

        let config: Config = toml::from_str(content)?;
        tracing::info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Loads `path`, then applies process environment overrides.
    pub fn from_sources(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env();
        Ok(config)
    }

    /// Applies `BOT_TOKEN` and `RSS_<CATEGORY>` from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Applies overrides from `lookup`; empty values are ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(token) = get(TOKEN_ENV) {
            self.bot_token = Some(SecretString::from(token));
        }

        for key in CategoryKey::ALL {
            if let Some(url) = get(key.env_var()) {
                self.feeds.insert(key.as_str().to_string(), url);
            }
        }
    }

    /// Builds the category lookup.
    ///
    /// Unknown category keys and invalid URLs are logged and dropped; a
    /// dropped URL leaves only its own category unconfigured.
    pub fn feed_source(&self) -> FeedSource {
        for name in self.feeds.keys() {
            if name.parse::<CategoryKey>().is_err() {
                tracing::warn!(category = %name, "Unknown category in [feeds], ignoring");
            }
        }

        let urls = CategoryKey::ALL.into_iter().filter_map(|key| {
            let raw = self.feeds.get(key.as_str())?;
            match validate_feed_url(raw) {
                Ok(url) => Some((key, url)),
                Err(e) => {
                    tracing::warn!(category = %key, url = %raw, error = %e, "Invalid feed URL, category disabled");
                    None
                }
            }
        });

        FeedSource::from_urls(urls)
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            timeout: Duration::from_secs(self.fetch_timeout_secs.max(1)),
            user_agent: self.user_agent.clone(),
            max_feed_size: self.max_feed_bytes,
            max_entries: self.max_entries.clamp(1, MAX_ENTRIES),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
