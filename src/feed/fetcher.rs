//! HTTP retrieval of category feeds, bounded in time and in body size.
use crate::feed::category::{CategoryKey, FeedSource};
use crate::feed::parser::{parse_feed, FeedEntry};
use futures::StreamExt;
use reqwest::redirect::Policy;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Some providers reject clients that don't look like a browser.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0 Safari/537.36";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_FEED_SIZE: usize = 10 * 1024 * 1024; // 10MB
/// Upper bound on entries shown per fetch.
pub const MAX_ENTRIES: usize = 5;

const MAX_REDIRECTS: usize = 3;

/// Errors that can occur while downloading a feed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// Response body exceeded the size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Response was incomplete (received fewer bytes than Content-Length)
    #[error("Incomplete response: expected {expected} bytes, received {received}")]
    IncompleteResponse { expected: u64, received: usize },
}

/// Why a category produced no headlines.
///
/// All variants look the same to the user; the distinction only
/// reaches the logs.
#[derive(Debug, Error)]
pub enum NewsError {
    /// The category has no configured feed URL
    #[error("No feed URL configured for category {0}")]
    MissingUrl(CategoryKey),
    /// The download failed
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The body was not a readable RSS/Atom document
    #[error("Parse error: {0}")]
    Parse(String),
    /// The feed parsed but listed no entries
    #[error("Feed contains no entries")]
    Empty,
}

/// Knobs for [`FeedFetcher`], derived from the loaded configuration.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub timeout: Duration,
    pub user_agent: String,
    pub max_feed_size: usize,
    pub max_entries: usize,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_feed_size: DEFAULT_MAX_FEED_SIZE,
            max_entries: MAX_ENTRIES,
        }
    }
}

/// Redirect policy with a hop limit and loop detection.
fn create_redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("Too many redirects (max 3)");
        }

        let url = attempt.url();
        for prev in attempt.previous() {
            if prev.as_str() == url.as_str() {
                return attempt.error("Redirect loop detected");
            }
        }

        tracing::debug!(
            from = %attempt.previous().last().map(|u| u.as_str()).unwrap_or("initial"),
            to = %url,
            hop = attempt.previous().len() + 1,
            "Following redirect"
        );

        attempt.follow()
    })
}

/// Downloads feeds and reduces them to the first few entries.
///
/// Cheap to clone: the underlying `reqwest::Client` is reference-counted,
/// so one fetcher can be shared across concurrently running handlers.
#[derive(Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
    timeout: Duration,
    max_feed_size: usize,
    max_entries: usize,
}

impl FeedFetcher {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(settings.user_agent.as_str())
            .redirect(create_redirect_policy())
            .pool_idle_timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            timeout: settings.timeout,
            max_feed_size: settings.max_feed_size,
            max_entries: settings.max_entries.clamp(1, MAX_ENTRIES),
        })
    }

    /// Number of entries [`FeedFetcher::latest`] returns at most.
    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Fetches the raw body of `url`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Timeout`] - the whole request exceeded the timeout
    /// - [`FetchError::Network`] - connection, DNS or TLS failure
    /// - [`FetchError::HttpStatus`] - any non-2xx response
    /// - [`FetchError::ResponseTooLarge`] - body exceeded the size limit
    /// - [`FetchError::IncompleteResponse`] - body shorter than Content-Length
    pub async fn fetch(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        tracing::info!(url = %url, "Requesting feed");

        let timeout = self.timeout;
        let request = async {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            tracing::info!(url = %url, status = status.as_u16(), "Feed responded");

            if !status.is_success() {
                return Err(FetchError::HttpStatus(status.as_u16()));
            }

            read_limited_bytes(response, self.max_feed_size).await
        };

        tokio::time::timeout(timeout, request)
            .await
            .map_err(|_| FetchError::Timeout)?
    }

    /// Fetches and parses the feed for `key`, keeping the first
    /// [`max_entries`](FeedFetcher::max_entries) entries in feed order.
    pub async fn try_latest(
        &self,
        source: &FeedSource,
        key: CategoryKey,
    ) -> Result<Vec<FeedEntry>, NewsError> {
        let url = source.url_for(key).ok_or(NewsError::MissingUrl(key))?;

        let bytes = self.fetch(url).await?;
        let mut entries = parse_feed(&bytes).map_err(|e| NewsError::Parse(e.to_string()))?;
        entries.truncate(self.max_entries);

        if entries.is_empty() {
            return Err(NewsError::Empty);
        }

        tracing::info!(category = %key, entries = entries.len(), "Fetched feed entries");
        Ok(entries)
    }

    /// Like [`FeedFetcher::try_latest`], but every failure is logged and
    /// reported as an empty list.
    pub async fn latest(&self, source: &FeedSource, key: CategoryKey) -> Vec<FeedEntry> {
        match self.try_latest(source, key).await {
            Ok(entries) => entries,
            Err(NewsError::MissingUrl(_)) => {
                tracing::warn!(category = %key, "No feed URL configured");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    category = %key,
                    url = ?source.url_for(key).map(Url::as_str),
                    error = %e,
                    "Failed to load feed"
                );
                Vec::new()
            }
        }
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, FetchError> {
    let expected_length = response.content_length();

    // Fast path: check Content-Length header
    if let Some(len) = expected_length {
        if len > limit as u64 {
            return Err(FetchError::ResponseTooLarge);
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(FetchError::ResponseTooLarge);
        }
        bytes.extend_from_slice(&chunk);
    }

    if let Some(expected) = expected_length {
        if (bytes.len() as u64) < expected {
            return Err(FetchError::IncompleteResponse {
                expected,
                received: bytes.len(),
            });
        }
    }

    Ok(bytes)
}
