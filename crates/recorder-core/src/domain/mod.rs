//! Domain logic for Auto Live Recorder.
//!
//! Everything here is pure: no file system access, no environment lookups,
//! no UI.  The storage and UI layers in `recorder-app` depend on these types,
//! never the other way round, so the rules below can be tested on any
//! platform without setup.

/// String-level path cleaning, joining and comparison.
pub mod lexical;

/// Validation of untrusted recording paths.
///
/// See [`path_policy::PathValidator`] for the main type.
pub mod path_policy;

/// Streaming platforms and their URL formats.
pub mod platforms;

/// Preference and streamer-list documents.
pub mod preferences;

/// VOD path template rendering.
pub mod template;
