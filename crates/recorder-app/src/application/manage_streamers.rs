//! ManageStreamersUseCase: edits the persisted list of followed streamers.
//!
//! Every mutation is a full load-modify-save cycle against a
//! [`StreamerStore`].  Nothing is cached between calls, so the list on disk is
//! always the single source of truth, and an edit made by hand between two
//! calls is picked up by the second one.
//!
//! Streamers are identified by [`Streamer::id`] (`"<platform>/<username>"`).
//! The list keeps insertion order.

use recorder_core::{find_platform, Streamer, StreamerList};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Error type for streamer-list operations.
#[derive(Debug, Error, PartialEq)]
pub enum RosterError {
    #[error("unsupported platform: {0}")]
    UnsupportedPlatform(String),
    #[error("username must not be empty")]
    EmptyUsername,
    #[error("streamer not found: {0}")]
    NotFound(String),
    #[error("failed to load streamer list: {0}")]
    LoadFailed(String),
    #[error("failed to save streamer list: {0}")]
    SaveFailed(String),
}

/// Where the streamer list is persisted.
#[cfg_attr(test, mockall::automock)]
pub trait StreamerStore {
    /// Loads the whole list.  A store with nothing saved yet returns an
    /// empty list.
    fn load_streamers(&self) -> Result<StreamerList, RosterError>;

    /// Replaces the whole list.
    fn save_streamers(&self, list: &StreamerList) -> Result<(), RosterError>;
}

impl<T: StreamerStore + ?Sized> StreamerStore for &T {
    fn load_streamers(&self) -> Result<StreamerList, RosterError> {
        (**self).load_streamers()
    }

    fn save_streamers(&self, list: &StreamerList) -> Result<(), RosterError> {
        (**self).save_streamers(list)
    }
}

/// A partial update to one streamer; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamerChanges {
    #[serde(default)]
    pub paused: Option<bool>,
    #[serde(default)]
    pub last_live: Option<String>,
    #[serde(default)]
    pub vods: Option<i64>,
    #[serde(default)]
    pub auto_record: Option<bool>,
    #[serde(default)]
    pub vod_path: Option<String>,
}

impl StreamerChanges {
    pub fn paused(paused: bool) -> Self {
        Self {
            paused: Some(paused),
            ..Self::default()
        }
    }

    fn apply_to(&self, streamer: &mut Streamer) {
        if let Some(paused) = self.paused {
            streamer.paused = paused;
        }
        if let Some(last_live) = &self.last_live {
            streamer.last_live.clone_from(last_live);
        }
        if let Some(vods) = self.vods {
            streamer.vods = vods;
        }
        if let Some(auto_record) = self.auto_record {
            streamer.auto_record = auto_record;
        }
        if let Some(vod_path) = &self.vod_path {
            streamer.vod_path.clone_from(vod_path);
        }
    }
}

/// Use case over a [`StreamerStore`].
pub struct StreamerRoster<S> {
    store: S,
}

impl<S: StreamerStore> StreamerRoster<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The current list, in insertion order.
    pub fn list(&self) -> Result<StreamerList, RosterError> {
        self.store.load_streamers()
    }

    /// Appends `streamer` unless one with the same id is already listed.
    ///
    /// Returns `true` if the streamer was added.  The platform name is
    /// normalized to its registered spelling.
    ///
    /// # Errors
    ///
    /// [`RosterError::UnsupportedPlatform`] or [`RosterError::EmptyUsername`]
    /// for invalid input; load and save failures otherwise.
    pub fn add(&self, mut streamer: Streamer) -> Result<bool, RosterError> {
        let platform = find_platform(&streamer.platform)
            .ok_or_else(|| RosterError::UnsupportedPlatform(streamer.platform.clone()))?;
        streamer.platform = platform.name.to_string();
        streamer.username = streamer.username.trim().trim_start_matches('@').to_string();
        if streamer.username.is_empty() {
            return Err(RosterError::EmptyUsername);
        }

        let mut list = self.store.load_streamers()?;
        let id = streamer.id();
        if list.contains(&id) {
            debug!(%id, "streamer already listed");
            return Ok(false);
        }
        list.streamers.push(streamer);
        self.store.save_streamers(&list)?;
        info!(%id, "streamer added");
        Ok(true)
    }

    /// Removes the streamer with `id`.  Returns `false` if it was not listed;
    /// nothing is written in that case.
    pub fn remove(&self, id: &str) -> Result<bool, RosterError> {
        let mut list = self.store.load_streamers()?;
        let before = list.len();
        list.streamers.retain(|s| s.id() != id);
        if list.len() == before {
            return Ok(false);
        }
        self.store.save_streamers(&list)?;
        info!(%id, "streamer removed");
        Ok(true)
    }

    /// Applies `changes` to the streamer with `id` and returns its new state.
    ///
    /// # Errors
    ///
    /// [`RosterError::NotFound`] if no streamer has that id.
    pub fn update(&self, id: &str, changes: &StreamerChanges) -> Result<Streamer, RosterError> {
        let mut list = self.store.load_streamers()?;
        let streamer = list
            .streamers
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| RosterError::NotFound(id.to_string()))?;
        changes.apply_to(streamer);
        let updated = streamer.clone();
        self.store.save_streamers(&list)?;
        debug!(%id, "streamer updated");
        Ok(updated)
    }

    /// Applies several updates in one load-save cycle.
    ///
    /// Ids that are not listed are skipped.  Returns how many streamers were
    /// changed; nothing is written if that is zero.
    pub fn update_all(&self, updates: &[(String, StreamerChanges)]) -> Result<usize, RosterError> {
        let mut list = self.store.load_streamers()?;
        let mut changed = 0;
        for (id, changes) in updates {
            if let Some(streamer) = list.streamers.iter_mut().find(|s| s.id() == *id) {
                changes.apply_to(streamer);
                changed += 1;
            }
        }
        if changed > 0 {
            self.store.save_streamers(&list)?;
        }
        debug!(changed, "batch streamer update");
        Ok(changed)
    }

    /// Removes every streamer.
    pub fn clear(&self) -> Result<(), RosterError> {
        self.store.save_streamers(&StreamerList::default())?;
        info!("streamer list cleared");
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    /// In-memory store that counts saves.
    #[derive(Default)]
    struct MemoryStore {
        list: RefCell<StreamerList>,
        saves: RefCell<usize>,
    }

    impl MemoryStore {
        fn with(streamers: Vec<Streamer>) -> Self {
            Self {
                list: RefCell::new(StreamerList::new(streamers)),
                saves: RefCell::new(0),
            }
        }
    }

    impl StreamerStore for MemoryStore {
        fn load_streamers(&self) -> Result<StreamerList, RosterError> {
            Ok(self.list.borrow().clone())
        }

        fn save_streamers(&self, list: &StreamerList) -> Result<(), RosterError> {
            *self.list.borrow_mut() = list.clone();
            *self.saves.borrow_mut() += 1;
            Ok(())
        }
    }

    fn ids(store: &MemoryStore) -> Vec<String> {
        store.list.borrow().streamers.iter().map(Streamer::id).collect()
    }

    #[test]
    fn test_add_appends_in_order() {
        // Arrange
        let store = MemoryStore::default();
        let roster = StreamerRoster::new(&store);

        // Act
        roster.add(Streamer::new("tiktok", "alice")).unwrap();
        roster.add(Streamer::new("tiktok", "bob")).unwrap();

        // Assert
        assert_eq!(ids(&store), ["tiktok/alice", "tiktok/bob"]);
        assert_eq!(*store.saves.borrow(), 2);
    }

    #[test]
    fn test_add_duplicate_is_noop() {
        let store = MemoryStore::with(vec![Streamer::new("tiktok", "alice")]);
        let roster = StreamerRoster::new(&store);

        let added = roster.add(Streamer::new("TikTok", "@alice")).unwrap();

        assert!(!added);
        assert_eq!(store.list.borrow().len(), 1);
        assert_eq!(*store.saves.borrow(), 0);
    }

    #[test]
    fn test_add_rejects_bad_input() {
        let store = MemoryStore::default();
        let roster = StreamerRoster::new(&store);

        assert_eq!(
            roster.add(Streamer::new("twitch", "alice")),
            Err(RosterError::UnsupportedPlatform("twitch".to_string()))
        );
        assert_eq!(
            roster.add(Streamer::new("tiktok", "  ")),
            Err(RosterError::EmptyUsername)
        );
        assert!(store.list.borrow().is_empty());
    }

    #[test]
    fn test_remove() {
        let store = MemoryStore::with(vec![
            Streamer::new("tiktok", "alice"),
            Streamer::new("tiktok", "bob"),
        ]);
        let roster = StreamerRoster::new(&store);

        assert!(roster.remove("tiktok/alice").unwrap());
        assert!(!roster.remove("tiktok/nobody").unwrap());

        assert_eq!(ids(&store), ["tiktok/bob"]);
        assert_eq!(*store.saves.borrow(), 1);
    }

    #[test]
    fn test_update_changes_only_given_fields() {
        // Arrange
        let mut alice = Streamer::new("tiktok", "alice");
        alice.vods = 3;
        let store = MemoryStore::with(vec![alice]);
        let roster = StreamerRoster::new(&store);
        let changes = StreamerChanges {
            paused: Some(true),
            last_live: Some("2024-05-01T20:15:00Z".to_string()),
            ..StreamerChanges::default()
        };

        // Act
        let updated = roster.update("tiktok/alice", &changes).unwrap();

        // Assert
        assert!(updated.paused);
        assert_eq!(updated.last_live, "2024-05-01T20:15:00Z");
        assert_eq!(updated.vods, 3);
        assert_eq!(store.list.borrow().streamers[0], updated);
    }

    #[test]
    fn test_update_missing_streamer() {
        let store = MemoryStore::default();
        let roster = StreamerRoster::new(&store);
        assert_eq!(
            roster.update("tiktok/ghost", &StreamerChanges::paused(true)),
            Err(RosterError::NotFound("tiktok/ghost".to_string()))
        );
    }

    #[test]
    fn test_update_all_skips_unknown_ids() {
        let store = MemoryStore::with(vec![
            Streamer::new("tiktok", "alice"),
            Streamer::new("tiktok", "bob"),
        ]);
        let roster = StreamerRoster::new(&store);
        let updates = vec![
            ("tiktok/alice".to_string(), StreamerChanges::paused(true)),
            ("tiktok/ghost".to_string(), StreamerChanges::paused(true)),
            (
                "tiktok/bob".to_string(),
                StreamerChanges {
                    vods: Some(9),
                    ..StreamerChanges::default()
                },
            ),
        ];

        let changed = roster.update_all(&updates).unwrap();

        assert_eq!(changed, 2);
        assert_eq!(*store.saves.borrow(), 1);
        let list = store.list.borrow();
        assert!(list.streamers[0].paused);
        assert_eq!(list.streamers[1].vods, 9);
    }

    #[test]
    fn test_clear() {
        let store = MemoryStore::with(vec![Streamer::new("tiktok", "alice")]);
        StreamerRoster::new(&store).clear().unwrap();
        assert!(store.list.borrow().is_empty());
    }

    #[test]
    fn test_load_failure_aborts_without_saving() {
        // Arrange
        let mut store = MockStreamerStore::new();
        store
            .expect_load_streamers()
            .returning(|| Err(RosterError::LoadFailed("malformed".to_string())));
        store.expect_save_streamers().never();
        let roster = StreamerRoster::new(store);

        // Act
        let result = roster.add(Streamer::new("tiktok", "alice"));

        // Assert
        assert_eq!(result, Err(RosterError::LoadFailed("malformed".to_string())));
    }

    #[test]
    fn test_save_failure_is_reported() {
        let mut store = MockStreamerStore::new();
        store
            .expect_load_streamers()
            .returning(|| Ok(StreamerList::default()));
        store
            .expect_save_streamers()
            .times(1)
            .returning(|_| Err(RosterError::SaveFailed("disk full".to_string())));
        let roster = StreamerRoster::new(store);

        assert_eq!(
            roster.add(Streamer::new("tiktok", "alice")),
            Err(RosterError::SaveFailed("disk full".to_string()))
        );
    }
}
