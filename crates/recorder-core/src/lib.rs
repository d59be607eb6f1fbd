//! # recorder-core
//!
//! Shared library for Auto Live Recorder containing the recording-path
//! validator, the preference and streamer-list data model, the platform
//! registry, and VOD path template rendering.
//!
//! This crate performs no I/O.  It is used by the desktop backend
//! (`recorder-app`), which owns the configuration files and the UI bridge.
//!
//! # Overview
//!
//! - **`domain::path_policy`** – decides whether a user-typed recording path
//!   is safe to write under a trusted base directory: no traversal, no
//!   reserved device names, no forbidden characters, `.mp4` only, and a
//!   100-byte ceiling on the joined path.
//!
//! - **`domain::lexical`** – the string-only path operations the validator is
//!   built on, for both Unix and Windows path syntax.
//!
//! - **`domain::preferences`** – the preferences document with its default
//!   merging rules, and the ordered streamer list.
//!
//! - **`domain::template`** / **`domain::platforms`** – turning a streamer and
//!   a stream into a concrete recording path.

pub mod domain;

// Re-export the most-used types at the crate root so callers can write
// `recorder_core::PathValidator` instead of the full module path.
pub use domain::path_policy::{
    validate_name, validate_recording_path, NameViolation, PathError, PathErrorKind,
    PathValidator, Platform, MAX_FULL_PATH_LEN, RECORDING_EXTENSION,
};
pub use domain::platforms::{find_platform, SupportedPlatform, SUPPORTED_PLATFORMS};
pub use domain::preferences::{
    default_column_visibility, ColumnVisibility, Preferences, PreferencesPatch, Streamer,
    StreamerList,
};
pub use domain::template::{render_template, TemplateError, TemplateVars};
