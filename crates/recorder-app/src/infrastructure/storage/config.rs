//! Preference and streamer-list persistence.
//!
//! Both documents live in the platform-appropriate config directory:
//! - Windows:  `%LOCALAPPDATA%\AutoLiveRecorder\`
//! - macOS:    `~/Library/Preferences/AutoLiveRecorder/`
//! - other:    `~/.config/AutoLiveRecorder/`
//!
//! | File                  | Format | Type                                   |
//! |-----------------------|--------|----------------------------------------|
//! | `preferences.toml`    | TOML   | [`Preferences`]                        |
//! | `streamer-list.json`  | JSON   | [`StreamerList`] (`"streamer-list"`)   |
//!
//! # Load semantics
//!
//! A missing or unreadable file is never an error: callers get the defaults
//! (or an empty list).  A file that exists but does not parse is reported,
//! and for preferences the defaults are still returned alongside the error so
//! the UI can keep working.
//!
//! # Save semantics
//!
//! Documents are written whole to a temporary sibling file and then renamed
//! over the target, so a failed save never leaves a truncated file behind.
//!
//! The store assumes a single caller (one desktop process, UI-driven calls);
//! nothing here locks the files.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use recorder_core::{Preferences, PreferencesPatch, StreamerList};
use thiserror::Error;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::application::manage_streamers::{RosterError, StreamerStore};

/// Directory name used under the platform config base.
pub const APP_NAME: &str = "AutoLiveRecorder";

/// File name of the preferences document.
pub const PREFERENCES_FILE: &str = "preferences.toml";

/// File name of the streamer-list document.
pub const STREAMER_LIST_FILE: &str = "streamer-list.json";

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file could not be read.
    #[error("I/O error reading {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written or moved into place.
    #[error("I/O error writing {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preferences TOML could not be parsed.
    #[error("failed to parse preferences TOML: {0}")]
    DecodePreferences(#[from] toml::de::Error),

    /// The preferences could not be serialized to TOML.
    #[error("failed to serialize preferences: {0}")]
    EncodePreferences(#[from] toml::ser::Error),

    /// The streamer-list JSON could not be parsed.
    #[error("failed to parse streamer list JSON: {0}")]
    DecodeStreamers(#[source] serde_json::Error),

    /// The streamer list could not be serialized to JSON.
    #[error("failed to serialize streamer list: {0}")]
    EncodeStreamers(#[source] serde_json::Error),
}

/// Result of [`ConfigStore::load_preferences`].
///
/// `preferences` is always usable.  When `error` is set the file existed but
/// could not be parsed; treat it as "use the preferences, log the error".
#[derive(Debug)]
pub struct PreferencesLoad {
    pub preferences: Preferences,
    pub error: Option<StoreError>,
}

// ── Directory resolution ──────────────────────────────────────────────────────

/// Returns `<platform config base>/<app_name>`, creating it if needed.
///
/// Creation failures are logged and otherwise ignored; the path is returned
/// regardless and later writes will report the real problem.
pub fn resolve_config_dir(app_name: &str) -> PathBuf {
    let dir = platform_config_base().join(app_name);
    if let Err(e) = std::fs::create_dir_all(&dir) {
        warn!(path = %dir.display(), "could not create config directory: {e}");
    }
    dir
}

/// The user's Downloads directory, used as the default root folder.
///
/// Looked up through the OS known-folder mechanism (XDG user dirs on Linux),
/// so a relocated Downloads folder is honoured.  Returns an empty string (and
/// logs an error) when it cannot be determined.
pub fn default_download_dir() -> String {
    download_dir_or_empty(dirs::download_dir())
}

fn download_dir_or_empty(dir: Option<PathBuf>) -> String {
    match dir {
        Some(dir) => dir.to_string_lossy().into_owned(),
        None => {
            error!("could not determine the Downloads folder");
            String::new()
        }
    }
}

#[cfg(not(target_os = "windows"))]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Resolves the platform config base directory without the app subdirectory.
fn platform_config_base() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        // %LOCALAPPDATA% e.g. C:\Users\<user>\AppData\Local
        std::env::var_os("LOCALAPPDATA")
            .map(PathBuf::from)
            .unwrap_or_default()
    }

    #[cfg(target_os = "macos")]
    {
        home_dir()
            .unwrap_or_default()
            .join("Library")
            .join("Preferences")
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        home_dir().unwrap_or_default().join(".config")
    }
}

// ── Store ─────────────────────────────────────────────────────────────────────

/// Owns the on-disk preference and streamer-list documents.
///
/// Build one at startup with [`ConfigStore::open`] and pass it by reference;
/// callers receive owned copies of whatever it loads.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    config_dir: PathBuf,
    download_dir: String,
}

impl ConfigStore {
    /// Resolves (and creates) the config directory for `app_name` and the
    /// user's Downloads directory.
    pub fn open(app_name: &str) -> Self {
        let store = Self::at(resolve_config_dir(app_name), default_download_dir());
        info!(path = %store.config_dir.display(), "user config path");
        info!(path = %store.download_dir, "user download path");
        store
    }

    /// A store rooted at an explicit directory.  Used by tests and by
    /// callers that manage their own config location.
    pub fn at(config_dir: impl Into<PathBuf>, download_dir: impl Into<String>) -> Self {
        Self {
            config_dir: config_dir.into(),
            download_dir: download_dir.into(),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn download_dir(&self) -> &str {
        &self.download_dir
    }

    pub fn preferences_path(&self) -> PathBuf {
        self.config_dir.join(PREFERENCES_FILE)
    }

    pub fn streamer_list_path(&self) -> PathBuf {
        self.config_dir.join(STREAMER_LIST_FILE)
    }

    /// The hardcoded defaults, rooted at the Downloads directory.
    pub fn default_preferences(&self) -> Preferences {
        Preferences::with_root_folder(self.download_dir.clone())
    }

    /// Loads preferences, falling back to defaults.
    ///
    /// Fields present in the file override the defaults; missing dashboard
    /// columns are always backfilled.
    pub fn load_preferences(&self) -> PreferencesLoad {
        let mut preferences = self.default_preferences();
        let mut error = None;

        if let Some(content) = read_optional(&self.preferences_path()) {
            match toml::from_str::<PreferencesPatch>(&content) {
                Ok(patch) => preferences.apply(patch),
                Err(e) => {
                    warn!("preferences file is malformed, using defaults: {e}");
                    error = Some(StoreError::DecodePreferences(e));
                }
            }
        }

        preferences.normalize();
        PreferencesLoad { preferences, error }
    }

    /// Overwrites the preferences file with `preferences`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EncodePreferences`] or [`StoreError::Write`];
    /// the existing file is left untouched in either case.
    pub fn save_preferences(&self, preferences: &Preferences) -> Result<(), StoreError> {
        let content = toml::to_string_pretty(preferences)?;
        write_atomically(&self.preferences_path(), content.as_bytes())?;
        debug!("preferences saved");
        Ok(())
    }

    /// Loads the streamer list; a missing file yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DecodeStreamers`] if the file is malformed.
    pub fn load_streamer_list(&self) -> Result<StreamerList, StoreError> {
        match read_optional(&self.streamer_list_path()) {
            Some(content) => serde_json::from_str(&content).map_err(StoreError::DecodeStreamers),
            None => Ok(StreamerList::default()),
        }
    }

    /// Overwrites the streamer-list file with `list` (pretty JSON, 4-space
    /// indent).
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::EncodeStreamers`] or [`StoreError::Write`].
    pub fn save_streamer_list(&self, list: &StreamerList) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        serde::Serialize::serialize(list, &mut ser).map_err(StoreError::EncodeStreamers)?;
        write_atomically(&self.streamer_list_path(), &buf)?;
        debug!(count = list.len(), "streamer list saved");
        Ok(())
    }
}

impl StreamerStore for ConfigStore {
    fn load_streamers(&self) -> Result<StreamerList, RosterError> {
        self.load_streamer_list()
            .map_err(|e| RosterError::LoadFailed(e.to_string()))
    }

    fn save_streamers(&self, list: &StreamerList) -> Result<(), RosterError> {
        self.save_streamer_list(list)
            .map_err(|e| RosterError::SaveFailed(e.to_string()))
    }
}

/// Reads `path`, treating any read failure as "no file".
///
/// Failures other than "not found" are logged.
fn read_optional(path: &Path) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            let e = StoreError::Read {
                path: path.to_path_buf(),
                source: e,
            };
            warn!("{e}; using defaults");
            None
        }
    }
}

/// Writes `contents` to a temporary sibling of `path`, then renames it over
/// `path`.  The temporary file is removed if either step fails.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), StoreError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|source| StoreError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{file_name}.{}.tmp", Uuid::new_v4().simple()));

    let result = std::fs::write(&tmp, contents).and_then(|()| std::fs::rename(&tmp, path));
    if let Err(source) = result {
        let _ = std::fs::remove_file(&tmp);
        return Err(StoreError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
