//! Chat-bot front-end.
//!
//! - `action`: typed button actions and their wire encoding
//! - `keyboard`: category menu and article-view panel
//! - `format`: message texts
//! - `controller`: the select / refresh / back state machine
//! - `telegram`: teloxide dispatcher and handlers

pub mod action;
pub mod controller;
pub mod format;
pub mod keyboard;
pub mod telegram;

pub use action::Action;
pub use controller::{BotController, RenderedPage, Screen};
pub use keyboard::{Button, Keyboard};
