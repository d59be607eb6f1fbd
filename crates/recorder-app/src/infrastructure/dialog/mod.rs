//! Native "choose a folder" dialog.
//!
//! The settings screen lets the user pick the root folder recordings are
//! written under.  The desktop shell provides the actual dialog; this module
//! only defines the seam so the command layer can be exercised without one.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PickerError {
    /// No dialog can be shown (e.g. headless session).
    #[error("no directory dialog available")]
    Unavailable,
    #[error("directory dialog failed: {0}")]
    Failed(String),
}

/// Shows a directory picker to the user.
#[cfg_attr(test, mockall::automock)]
pub trait DirectoryPicker {
    /// Blocks until the user picks a directory or dismisses the dialog.
    ///
    /// Returns `Ok(None)` when the dialog was cancelled.
    fn choose_directory(&self, title: &str) -> Result<Option<PathBuf>, PickerError>;
}
