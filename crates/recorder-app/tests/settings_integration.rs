//! Integration tests for the settings and streamer-list flow.
//!
//! These exercise recorder-app end-to-end against a real directory:
//! `ConfigStore` + `AppState` commands + `plan_recording`, including a
//! restart (a second `AppState` over the same directory).

use std::path::PathBuf;

use recorder_app::application::plan_recording::{plan_recording, StreamInfo};
use recorder_app::infrastructure::storage::config::{ConfigStore, PREFERENCES_FILE};
use recorder_app::infrastructure::ui_bridge::{
    add_streamer, get_preferences, get_streamers, set_root_folder, set_streamer_paused,
    set_vod_path_template, AddStreamerDto, AppState,
};
use recorder_core::{PathValidator, Platform, Streamer};
use uuid::Uuid;

const DOWNLOADS: &str = "/home/alice/Downloads";

struct TempDir(PathBuf);

impl TempDir {
    fn new() -> Self {
        let dir = std::env::temp_dir().join(format!("alr_it_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        Self(dir)
    }

    fn state(&self) -> std::sync::Arc<AppState> {
        AppState::new(
            ConfigStore::at(&self.0, DOWNLOADS),
            PathValidator::new(Platform::Unix),
        )
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        std::fs::remove_dir_all(&self.0).ok();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_settings_survive_restart() {
    // Arrange
    let dir = TempDir::new();
    let state = dir.state();

    // Act
    assert!(set_root_folder(&state, "/srv/recordings".to_string()).success);
    assert!(set_vod_path_template(&state, "{user}/{date}_{time}.mp4".to_string()).success);
    drop(state);
    let restarted = dir.state();

    // Assert
    let prefs = get_preferences(&restarted).data.unwrap();
    assert_eq!(prefs.root_folder, "/srv/recordings");
    assert_eq!(prefs.vod_path_template, "{user}/{date}_{time}.mp4");
}

#[test]
fn test_streamers_survive_restart_in_order() {
    let dir = TempDir::new();
    let state = dir.state();
    for name in ["zed", "amy", "bob"] {
        let r = add_streamer(
            &state,
            AddStreamerDto {
                platform: "tiktok".to_string(),
                username_or_url: format!("@{name}"),
                auto_record: false,
            },
        );
        assert_eq!(r.data, Some(true));
    }
    set_streamer_paused(&state, "tiktok/amy", true);
    drop(state);

    let listed = get_streamers(&dir.state()).data.unwrap();

    let ids: Vec<_> = listed.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["tiktok/zed", "tiktok/amy", "tiktok/bob"]);
    assert!(listed[1].paused);
    assert!(!listed[0].paused);
}

#[test]
fn test_malformed_preferences_fall_back_to_defaults() {
    let dir = TempDir::new();
    std::fs::write(dir.0.join(PREFERENCES_FILE), "theme = ").unwrap();

    let prefs = get_preferences(&dir.state()).data.unwrap();

    assert_eq!(prefs.theme, "system");
    assert_eq!(prefs.root_folder, DOWNLOADS);
}

#[test]
fn test_saved_template_plans_a_path_under_root() {
    // Arrange
    let dir = TempDir::new();
    let state = dir.state();
    set_vod_path_template(&state, "VODs/{platform}/{user}/{date}.mp4".to_string());
    let prefs = get_preferences(&state).data.unwrap();
    let stream = StreamInfo {
        date: "2024-05-01".to_string(),
        time: "20-15-00".to_string(),
        title: String::new(),
    };

    // Act
    let plan = plan_recording(
        &state.validator,
        &prefs,
        &Streamer::new("tiktok", "alice"),
        &stream,
    )
    .unwrap();

    // Assert
    assert_eq!(
        plan.full_path,
        "/home/alice/Downloads/VODs/tiktok/alice/2024-05-01.mp4"
    );
}
