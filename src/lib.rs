//! Telegram news bot: pick a category, get its latest headlines.
//!
//! - [`config`] - TOML file plus environment overrides
//! - [`feed`] - category lookup, feed download and parsing
//! - [`bot`] - keyboards, message texts, the controller and the Telegram adapter
//! - [`util`] - URL validation and message-length helpers

pub mod bot;
pub mod config;
pub mod feed;
pub mod util;
