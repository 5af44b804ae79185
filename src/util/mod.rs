//! Utility functions for common operations.
//!
//! - **URL validation**: checks configured feed URLs before they reach the fetcher
//! - **Text processing**: message-length capping for the chat transport
//!
//! # Examples
//!
//! ```
//! use newsbot::util::{truncate_message, validate_feed_url};
//!
//! let url = validate_feed_url("https://example.com/feed.xml").unwrap();
//! assert_eq!(url.host_str(), Some("example.com"));
//!
//! assert_eq!(truncate_message("Short", 10), "Short");
//! ```

mod text;
mod url_validator;

pub use text::truncate_message;
pub use url_validator::{validate_feed_url, UrlValidationError};

/// Maximum length of a single chat message, in UTF-16 code units (Telegram Bot API limit).
pub const MAX_MESSAGE_LEN: usize = 4096;
