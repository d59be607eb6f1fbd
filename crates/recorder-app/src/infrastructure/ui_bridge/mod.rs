//! Command bridge: exposes application-layer operations to the desktop UI.
//!
//! Every command function lives here and delegates to the shared
//! [`AppState`].  The presentation layer is the only consumer of this module;
//! it must NOT be imported by the application or domain layers.
//!
//! The UI calls commands by name, e.g.
//! ```js
//! const result = await invoke("get_preferences");
//! ```
//! and receives the return value serialized to JSON.
//!
//! # `CommandResult<T>` wrapper
//!
//! All commands return `CommandResult<T>` rather than `Result<T, E>`, so
//! every response has the same shape:
//! `{ success: bool, data: T | null, error: string | null }`.
//! The frontend can always safely read `result.success` without wrapping
//! the call in try/catch.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use recorder_core::domain::template::placeholders;
use recorder_core::{
    find_platform, ColumnVisibility, PathValidator, Preferences, PreferencesPatch, Streamer,
};

use crate::application::manage_streamers::{StreamerChanges, StreamerRoster};
use crate::infrastructure::dialog::DirectoryPicker;
use crate::infrastructure::storage::config::ConfigStore;

/// Title of the root-folder picker dialog.
pub const CHOOSE_ROOT_FOLDER_TITLE: &str = "Select a root folder for recordings";

// ── Shared application state ──────────────────────────────────────────────────

/// State shared by all commands.
///
/// Preferences are cached in memory after the first load; the streamer list
/// is not, every streamer command goes to disk.
pub struct AppState {
    pub store: ConfigStore,
    pub validator: PathValidator,
    preferences: Mutex<Preferences>,
}

impl AppState {
    /// Loads preferences from `store`.  A malformed preferences file is
    /// logged and the defaults are used.
    pub fn new(store: ConfigStore, validator: PathValidator) -> Arc<Self> {
        let loaded = store.load_preferences();
        if let Some(e) = &loaded.error {
            warn!("error loading preferences: {e}");
        }
        Arc::new(Self {
            store,
            validator,
            preferences: Mutex::new(loaded.preferences),
        })
    }

    fn preferences(&self) -> MutexGuard<'_, Preferences> {
        self.preferences
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// The streamer-list use case over this state's store.
    pub fn roster(&self) -> StreamerRoster<&ConfigStore> {
        StreamerRoster::new(&self.store)
    }
}

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// A followed streamer as shown on the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamerDto {
    pub id: String,
    pub platform: String,
    pub username: String,
    pub profile_url: Option<String>,
    pub paused: bool,
    pub last_live: String,
    pub vods: i64,
    pub auto_record: bool,
    pub vod_path: String,
}

impl From<&Streamer> for StreamerDto {
    fn from(s: &Streamer) -> Self {
        Self {
            id: s.id(),
            platform: s.platform.clone(),
            username: s.username.clone(),
            profile_url: find_platform(&s.platform).map(|p| p.profile_url(&s.username)),
            paused: s.paused,
            last_live: s.last_live.clone(),
            vods: s.vods,
            auto_record: s.auto_record,
            vod_path: s.vod_path.clone(),
        }
    }
}

/// Input of the "add streamer" form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddStreamerDto {
    pub platform: String,
    /// A bare username, `@username`, or a profile/live URL.
    pub username_or_url: String,
    #[serde(default)]
    pub auto_record: bool,
}

/// Unified response wrapper used by commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

impl<T: Serialize, E: std::fmt::Display> From<Result<T, E>> for CommandResult<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

// ── Preference commands ───────────────────────────────────────────────────────

pub fn get_preferences(state: &AppState) -> CommandResult<Preferences> {
    CommandResult::ok(state.preferences().clone())
}

/// Applies `patch` to the current preferences and persists the result.
///
/// When the patch touches the root folder or the VOD path template, the
/// template is validated as a path under the root folder first; a rejected
/// template leaves both memory and disk unchanged.
pub fn update_preferences(state: &AppState, patch: PreferencesPatch) -> CommandResult<Preferences> {
    let mut prefs = state.preferences();
    let mut next = prefs.clone();
    let path_changed = patch.root_folder.is_some() || patch.vod_path_template.is_some();
    next.apply(patch);
    commit(state, &mut prefs, next, path_changed)
}

/// Replaces the preferences wholesale.  Same validation as
/// [`update_preferences`].
pub fn save_preferences(state: &AppState, preferences: Preferences) -> CommandResult<Preferences> {
    let mut prefs = state.preferences();
    commit(state, &mut prefs, preferences, true)
}

fn commit(
    state: &AppState,
    current: &mut Preferences,
    mut next: Preferences,
    check_path: bool,
) -> CommandResult<Preferences> {
    next.normalize();

    if check_path {
        if let Err(msg) = check_template(&state.validator, &next) {
            return CommandResult::err(msg);
        }
    }

    if let Err(e) = state.store.save_preferences(&next) {
        return CommandResult::err(format!("failed to save preferences: {e}"));
    }
    *current = next.clone();
    CommandResult::ok(next)
}

pub fn set_theme(state: &AppState, theme: String) -> CommandResult<Preferences> {
    update_preferences(
        state,
        PreferencesPatch {
            theme: Some(theme),
            ..PreferencesPatch::default()
        },
    )
}

pub fn set_root_folder(state: &AppState, root_folder: String) -> CommandResult<Preferences> {
    update_preferences(
        state,
        PreferencesPatch {
            root_folder: Some(root_folder),
            ..PreferencesPatch::default()
        },
    )
}

pub fn set_vod_path_template(state: &AppState, template: String) -> CommandResult<Preferences> {
    update_preferences(
        state,
        PreferencesPatch {
            vod_path_template: Some(template),
            ..PreferencesPatch::default()
        },
    )
}

/// Merges `columns` into the dashboard column visibility map.
pub fn set_column_visibility(
    state: &AppState,
    columns: ColumnVisibility,
) -> CommandResult<Preferences> {
    update_preferences(
        state,
        PreferencesPatch {
            dashboard_column_visibility: Some(columns),
            ..PreferencesPatch::default()
        },
    )
}

fn check_template(validator: &PathValidator, prefs: &Preferences) -> Result<(), String> {
    placeholders(&prefs.vod_path_template).map_err(|e| e.to_string())?;
    validator
        .validate(&prefs.root_folder, &prefs.vod_path_template)
        .map(|_| ())
        .map_err(|e| {
            info!(kind = e.kind().as_str(), "VOD path template rejected");
            e.to_string()
        })
}

// ── Path commands ─────────────────────────────────────────────────────────────

/// Validates `candidate` as a recording path under `base_dir`.
///
/// On success the data is the sanitized relative path.
pub fn validate_download_path(
    state: &AppState,
    base_dir: &str,
    candidate: &str,
) -> CommandResult<String> {
    state.validator.validate(base_dir, candidate).into()
}

/// Opens the folder picker.  `data` is `null` when the user cancelled.
pub fn choose_directory(picker: &dyn DirectoryPicker) -> CommandResult<Option<String>> {
    match picker.choose_directory(CHOOSE_ROOT_FOLDER_TITLE) {
        Ok(Some(dir)) => match dir.into_os_string().into_string() {
            Ok(dir) => CommandResult::ok(Some(dir)),
            Err(dir) => CommandResult::err(format!(
                "selected folder is not valid UTF-8: {}",
                dir.to_string_lossy()
            )),
        },
        Ok(None) => CommandResult::ok(None),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

// ── Streamer commands ─────────────────────────────────────────────────────────

pub fn get_streamers(state: &AppState) -> CommandResult<Vec<StreamerDto>> {
    state
        .roster()
        .list()
        .map(|list| list.streamers.iter().map(StreamerDto::from).collect::<Vec<_>>())
        .into()
}

/// Adds a streamer; `data` is `false` when it was already listed.
pub fn add_streamer(state: &AppState, input: AddStreamerDto) -> CommandResult<bool> {
    let Some(platform) = find_platform(&input.platform) else {
        return CommandResult::err(format!("unsupported platform: {}", input.platform));
    };
    let username = platform
        .username_from_url(&input.username_or_url)
        .unwrap_or_else(|| input.username_or_url.clone());

    let mut streamer = Streamer::new(platform.name, username);
    streamer.auto_record = input.auto_record;
    state.roster().add(streamer).into()
}

/// Removes a streamer; `data` is `false` when it was not listed.
pub fn remove_streamer(state: &AppState, id: &str) -> CommandResult<bool> {
    state.roster().remove(id).into()
}

pub fn update_streamer(
    state: &AppState,
    id: &str,
    changes: StreamerChanges,
) -> CommandResult<StreamerDto> {
    state
        .roster()
        .update(id, &changes)
        .map(|s| StreamerDto::from(&s))
        .into()
}

pub fn set_streamer_paused(state: &AppState, id: &str, paused: bool) -> CommandResult<StreamerDto> {
    update_streamer(state, id, StreamerChanges::paused(paused))
}

pub fn remove_all_streamers(state: &AppState) -> CommandResult<()> {
    state.roster().clear().into()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
