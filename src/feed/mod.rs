//! Feed retrieval for the news categories.
//!
//! - [`category`] - the fixed category set and the category → URL lookup
//! - [`fetcher`] - HTTP download with timeout, size limit and error collapsing
//! - [`parser`] - RSS/Atom parsing using the `feed-rs` crate
//!
//! # Example
//!
//! ```ignore
//! use newsbot::feed::{CategoryKey, FeedFetcher, FetchSettings};
//!
//! let fetcher = FeedFetcher::new(&FetchSettings::default())?;
//! let entries = fetcher.latest(&source, CategoryKey::Sports).await;
//! ```

mod category;
mod fetcher;
mod parser;

pub use category::{Category, CategoryKey, FeedSource, UnknownCategory};
pub use fetcher::{
    FeedFetcher, FetchError, FetchSettings, NewsError, DEFAULT_MAX_FEED_SIZE, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT, MAX_ENTRIES,
};
pub use parser::{parse_feed, FeedEntry, UNKNOWN_PUBLISHED};
