//! Storage infrastructure: preference and streamer-list persistence.
//!
//! The `config` sub-module handles:
//!
//! - Locating the platform-appropriate config directory.
//! - Reading `preferences.toml` and `streamer-list.json`, with defaults on
//!   first run.
//! - Writing both documents back atomically when the user changes something.

pub mod config;
