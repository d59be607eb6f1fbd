//! Infrastructure layer for the recorder backend.
//!
//! Contains OS-facing adapters: file-system storage, the folder picker seam,
//! and the UI command bridge.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `recorder_core`, but MUST NOT be imported by the `application` or domain
//! layers.

pub mod dialog;
pub mod storage;
pub mod ui_bridge;
