//! User preferences and the persisted streamer list.
//!
//! These are plain data types: reading and writing them is the job of the
//! storage layer in `recorder-app`.  What lives here is the shape of the
//! documents and the rules for filling in missing values.
//!
//! # Default merging
//!
//! A preferences file may be absent, empty, or written by an older version
//! that lacks newer fields.  Loading therefore works in two steps:
//!
//! 1. Start from [`Preferences::with_root_folder`] and overlay whatever the
//!    file provides ([`PreferencesPatch`]).
//! 2. Run [`Preferences::normalize`], which backfills every dashboard column
//!    missing from the visibility map.
//!
//! Step 2 runs on every load, whatever happened in step 1.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Visibility of each dashboard column, keyed by column id.
pub type ColumnVisibility = BTreeMap<String, bool>;

/// Default theme name understood by the UI.
pub const DEFAULT_THEME: &str = "system";

/// Default template for naming recordings inside the root folder.
pub const DEFAULT_VOD_PATH_TEMPLATE: &str = "VODs/{platform}/{username}/{date}_{start_time}.mp4";

/// Value of [`Streamer::last_live`] when the streamer has never been seen live.
pub const LAST_LIVE_UNKNOWN: &str = "unknown";

/// Dashboard columns and whether each is shown when the user has not chosen.
pub const DEFAULT_COLUMN_VISIBILITY: [(&str, bool); 4] = [
    ("last_live", true),
    ("vods", true),
    ("platform", false),
    ("auto_record", false),
];

/// Returns a fresh map holding [`DEFAULT_COLUMN_VISIBILITY`].
pub fn default_column_visibility() -> ColumnVisibility {
    DEFAULT_COLUMN_VISIBILITY
        .iter()
        .map(|(k, v)| (k.to_string(), *v))
        .collect()
}

// ── Preferences ───────────────────────────────────────────────────────────────

/// Application preferences, stored as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// UI theme: `"system"`, `"light"` or `"dark"`.
    pub theme: String,
    /// Trusted directory recordings are written under.
    pub root_folder: String,
    /// Template for the recording path relative to `root_folder`.
    pub vod_path_template: String,
    /// Which dashboard columns are shown.
    pub dashboard_column_visibility: ColumnVisibility,
}

impl Preferences {
    /// The hardcoded defaults, with `root_folder` set to `root_folder`
    /// (normally the user's Downloads directory).
    pub fn with_root_folder(root_folder: impl Into<String>) -> Self {
        Self {
            theme: DEFAULT_THEME.to_string(),
            root_folder: root_folder.into(),
            vod_path_template: DEFAULT_VOD_PATH_TEMPLATE.to_string(),
            dashboard_column_visibility: default_column_visibility(),
        }
    }

    /// Overlays every field present in `patch`.
    ///
    /// A patched visibility map is merged key by key, so a patch carrying
    /// only `vods = false` leaves the other columns as they were.
    pub fn apply(&mut self, patch: PreferencesPatch) {
        if let Some(theme) = patch.theme {
            self.theme = theme;
        }
        if let Some(root_folder) = patch.root_folder {
            self.root_folder = root_folder;
        }
        if let Some(template) = patch.vod_path_template {
            self.vod_path_template = template;
        }
        if let Some(columns) = patch.dashboard_column_visibility {
            self.dashboard_column_visibility.extend(columns);
        }
    }

    /// Backfills every default dashboard column absent from the map.
    ///
    /// Columns the map already has keep their value; columns unknown to
    /// this version are left alone.
    pub fn normalize(&mut self) {
        for (column, visible) in DEFAULT_COLUMN_VISIBILITY {
            self.dashboard_column_visibility
                .entry(column.to_string())
                .or_insert(visible);
        }
    }
}

/// A partial [`Preferences`]: the on-disk document as written, or a UI edit.
///
/// Every field is optional so that a file missing some keys still parses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferencesPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vod_path_template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dashboard_column_visibility: Option<ColumnVisibility>,
}

// ── Streamers ─────────────────────────────────────────────────────────────────

/// A streamer the user follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streamer {
    /// Platform name as registered in [`crate::domain::platforms`], e.g. `"tiktok"`.
    pub platform: String,
    pub username: String,
    /// `true` when monitoring is suspended.
    #[serde(default)]
    pub paused: bool,
    /// ISO-8601 timestamp of the last live session, or `"unknown"`.
    #[serde(default = "default_last_live")]
    pub last_live: String,
    /// Number of recordings made so far.
    #[serde(default)]
    pub vods: i64,
    #[serde(default)]
    pub auto_record: bool,
    /// Folder recordings of this streamer are saved to.
    #[serde(default)]
    pub vod_path: String,
}

fn default_last_live() -> String {
    LAST_LIVE_UNKNOWN.to_string()
}

impl Streamer {
    /// A newly added streamer: monitored, never seen live, no recordings.
    pub fn new(platform: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            username: username.into(),
            paused: false,
            last_live: default_last_live(),
            vods: 0,
            auto_record: false,
            vod_path: String::new(),
        }
    }

    /// Identity of the streamer within a list: `"<platform>/<username>"`.
    pub fn id(&self) -> String {
        format!("{}/{}", self.platform, self.username)
    }

    /// Returns `true` if the streamer has never been seen live.
    pub fn last_live_unknown(&self) -> bool {
        self.last_live.is_empty() || self.last_live == LAST_LIVE_UNKNOWN
    }
}

/// The ordered list of followed streamers, stored as JSON.
///
/// Order is the order the user added them in and is preserved across saves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamerList {
    #[serde(
        rename = "streamer-list",
        default,
        deserialize_with = "null_as_empty"
    )]
    pub streamers: Vec<Streamer>,
}

/// Older files store an empty list as `null`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Streamer>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Streamer>>::deserialize(deserializer)?.unwrap_or_default())
}

impl StreamerList {
    pub fn new(streamers: Vec<Streamer>) -> Self {
        Self { streamers }
    }

    pub fn len(&self) -> usize {
        self.streamers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streamers.is_empty()
    }

    /// Finds a streamer by [`Streamer::id`].
    pub fn find(&self, id: &str) -> Option<&Streamer> {
        self.streamers.iter().find(|s| s.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
