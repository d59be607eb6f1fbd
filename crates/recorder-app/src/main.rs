//! Auto Live Recorder backend entry point.
//!
//! Wires the config store and path validator into the shared [`AppState`]
//! and reports what was loaded.  The desktop shell registers the
//! `ui_bridge` commands against this same state.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ ConfigStore::open()   -- resolves config dir + Downloads dir
//!  └─ AppState::new()       -- loads preferences
//!  └─ startup checks
//!       ├─ VOD path template validated against the root folder
//!       └─ streamer list loaded and summarized
//! ```

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use recorder_app::infrastructure::storage::config::{ConfigStore, APP_NAME};
use recorder_app::infrastructure::ui_bridge::{get_preferences, AppState};
use recorder_core::PathValidator;

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Auto Live Recorder starting");

    let store = ConfigStore::open(APP_NAME);
    let validator = PathValidator::for_current_platform();
    let state = AppState::new(store, validator);

    let prefs = get_preferences(&state)
        .data
        .ok_or_else(|| anyhow::anyhow!("preferences unavailable"))?;
    info!(
        theme = %prefs.theme,
        root_folder = %prefs.root_folder,
        template = %prefs.vod_path_template,
        "preferences loaded"
    );

    match state
        .validator
        .validate(&prefs.root_folder, &prefs.vod_path_template)
    {
        Ok(path) => info!(%path, "VOD path template accepted"),
        Err(e) => warn!(kind = e.kind().as_str(), "VOD path template is not usable: {e}"),
    }

    let streamers = state.roster().list()?;
    info!(count = streamers.len(), "streamer list loaded");
    for s in &streamers.streamers {
        info!(
            id = %s.id(),
            paused = s.paused,
            auto_record = s.auto_record,
            last_live = %s.last_live,
            "following"
        );
    }

    info!("Auto Live Recorder ready");
    Ok(())
}
