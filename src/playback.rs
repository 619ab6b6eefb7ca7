//! Playback reconciliation workflow.
//!
//! The defect-reproduction path: submit every track of an album to the
//! playback queue, start playback, then immediately read the live queue
//! back and compare counts. The read intentionally races the engine's
//! asynchronous queue population; observing an interim count is the
//! behavior under demonstration, so no waiting or retrying is done here.

use std::sync::Arc;

use crate::errors::AppError;
use crate::models::{Album, QueueEntry, QueueSubmission};
use crate::providers::{CatalogProvider, PlayerControl};
use crate::store::SessionStore;

pub struct PlaybackReconciliationWorkflow {
    catalog: Arc<dyn CatalogProvider>,
    player: Arc<dyn PlayerControl>,
    store: Arc<SessionStore>,
}

impl PlaybackReconciliationWorkflow {
    pub fn new(
        catalog: Arc<dyn CatalogProvider>,
        player: Arc<dyn PlayerControl>,
        store: Arc<SessionStore>,
    ) -> Self {
        Self {
            catalog,
            player,
            store,
        }
    }

    /// Queue the album's tracks, start playback, and reconcile the counts.
    ///
    /// A count mismatch is reported through the status line, never through
    /// the error channel. Actual failures (hydration, prepare, play) land
    /// in the modal error slot, which is never suppressible.
    pub async fn play_album(&self, album: &Album) -> Result<QueueSubmission, AppError> {
        let _activity = self.store.begin_activity();

        match self.run(album).await {
            Ok(submission) => Ok(submission),
            Err(error) => {
                self.store.set_modal_error(error.clone());
                Err(error)
            }
        }
    }

    async fn run(&self, album: &Album) -> Result<QueueSubmission, AppError> {
        let hydrated = match &album.tracks {
            Some(_) => album.clone(),
            None => self
                .catalog
                .album_tracks(&album.id)
                .await
                .map_err(AppError::from)?,
        };

        let tracks = hydrated.tracks.as_deref().unwrap_or_default();
        if tracks.is_empty() {
            return Err(AppError::EmptyAlbum);
        }

        // One entry per track, catalog order preserved.
        let entries: Vec<QueueEntry> = tracks.iter().map(QueueEntry::from).collect();
        let submitted = entries.len();

        log::info!(
            "[PlaybackReconciliation] Queueing {} tracks from \"{}\"",
            submitted,
            hydrated.label()
        );
        self.player.replace_queue(entries);

        // Two-phase start: the engine rejects play while unprepared.
        if !self.player.is_prepared() {
            self.player.prepare().await.map_err(AppError::from)?;
        }
        self.player.play().await.map_err(AppError::from)?;

        // Deliberately racy read; see the module docs.
        let observed = self.player.queue_snapshot().entries.len();
        let submission = QueueSubmission {
            submitted,
            observed,
        };

        if !submission.is_match() {
            log::warn!(
                "[PlaybackReconciliation] {} of {} tracks made it into the live queue",
                observed,
                submitted
            );
        }

        self.store.set_status(submission.report());
        self.store.set_playing_album(hydrated);

        Ok(submission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QueueSnapshot, SearchQuery, Track};
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    fn track(n: u32) -> Track {
        Track {
            id: format!("t{}", n),
            title: format!("Track {}", n),
            track_number: Some(n),
            duration: Some(180),
        }
    }

    fn album_with_tracks(count: u32) -> Album {
        Album {
            id: "a1".into(),
            title: "Abbey Road".into(),
            artist: "The Beatles".into(),
            tracks: Some((1..=count).map(track).collect()),
        }
    }

    struct FakeCatalog {
        hydrated: Option<Album>,
    }

    #[async_trait]
    impl CatalogProvider for FakeCatalog {
        fn id(&self) -> &str {
            "fake"
        }

        fn name(&self) -> &str {
            "Fake Catalog"
        }

        async fn search_albums(&self, _query: &SearchQuery) -> Result<Vec<Album>> {
            Ok(Vec::new())
        }

        async fn album_tracks(&self, album_id: &str) -> Result<Album> {
            self.hydrated
                .clone()
                .ok_or_else(|| anyhow!("album {} not found", album_id))
        }
    }

    /// Fake engine that can drop a configured number of entries from the
    /// live queue, mimicking the SDK defect.
    struct FakePlayer {
        queue: Mutex<Vec<QueueEntry>>,
        dropped_entries: usize,
        prepared: AtomicBool,
        prepare_calls: AtomicUsize,
        play_fails: bool,
    }

    impl FakePlayer {
        fn new(dropped_entries: usize) -> Self {
            Self {
                queue: Mutex::new(Vec::new()),
                dropped_entries,
                prepared: AtomicBool::new(false),
                prepare_calls: AtomicUsize::new(0),
                play_fails: false,
            }
        }

        fn failing_play(mut self) -> Self {
            self.play_fails = true;
            self
        }

        fn prepared(self) -> Self {
            self.prepared.store(true, Ordering::SeqCst);
            self
        }
    }

    #[async_trait]
    impl PlayerControl for FakePlayer {
        fn replace_queue(&self, entries: Vec<QueueEntry>) {
            let kept = entries.len().saturating_sub(self.dropped_entries);
            *self.queue.lock() = entries.into_iter().take(kept).collect();
        }

        fn is_prepared(&self) -> bool {
            self.prepared.load(Ordering::SeqCst)
        }

        async fn prepare(&self) -> Result<()> {
            self.prepare_calls.fetch_add(1, Ordering::SeqCst);
            self.prepared.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn play(&self) -> Result<()> {
            if self.play_fails {
                return Err(anyhow!("playback engine refused to start"));
            }
            if !self.is_prepared() {
                return Err(anyhow!("play called on unprepared engine"));
            }
            Ok(())
        }

        fn stop(&self) {}

        fn queue_snapshot(&self) -> QueueSnapshot {
            let entries = self.queue.lock().clone();
            let current = entries.first().cloned();
            QueueSnapshot { entries, current }
        }
    }

    fn workflow(
        catalog: FakeCatalog,
        player: FakePlayer,
    ) -> (
        PlaybackReconciliationWorkflow,
        Arc<SessionStore>,
        Arc<FakePlayer>,
    ) {
        let store = SessionStore::new();
        let player = Arc::new(player);
        let workflow = PlaybackReconciliationWorkflow::new(
            Arc::new(catalog),
            Arc::clone(&player) as Arc<dyn PlayerControl>,
            Arc::clone(&store),
        );
        (workflow, store, player)
    }

    #[tokio::test]
    async fn test_full_queue_reports_correct_behavior() {
        let (workflow, store, player) =
            workflow(FakeCatalog { hydrated: None }, FakePlayer::new(0));

        let submission = workflow.play_album(&album_with_tracks(12)).await.unwrap();

        assert_eq!(submission, QueueSubmission { submitted: 12, observed: 12 });
        let state = store.snapshot();
        assert_eq!(
            state.status,
            "12 songs added; 12 songs actually in queue - correct behavior"
        );
        assert!(state.modal_error.is_none());
        assert_eq!(state.playing_album.as_ref().unwrap().id, "a1");
        assert_eq!(player.prepare_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_dropped_entries_report_mismatch_not_error() {
        let (workflow, store, _player) =
            workflow(FakeCatalog { hydrated: None }, FakePlayer::new(2));

        let submission = workflow.play_album(&album_with_tracks(12)).await.unwrap();

        assert_eq!(submission, QueueSubmission { submitted: 12, observed: 10 });
        let state = store.snapshot();
        assert_eq!(
            state.status,
            "12 songs added; 10 songs actually in queue - MISMATCH DETECTED"
        );
        // The mismatch is the finding, not a failure.
        assert!(state.modal_error.is_none());
        assert!(state.playing_album.is_some());
    }

    #[tokio::test]
    async fn test_unhydrated_album_is_fetched_first() {
        let (workflow, _store, _player) = workflow(
            FakeCatalog {
                hydrated: Some(album_with_tracks(5)),
            },
            FakePlayer::new(0),
        );

        let bare = Album {
            tracks: None,
            ..album_with_tracks(0)
        };
        let submission = workflow.play_album(&bare).await.unwrap();
        assert_eq!(submission.submitted, 5);
    }

    #[tokio::test]
    async fn test_empty_album_goes_to_modal_slot() {
        let (workflow, store, _player) =
            workflow(FakeCatalog { hydrated: None }, FakePlayer::new(0));
        store.set_albums(vec![album_with_tracks(3)]);

        let err = workflow.play_album(&album_with_tracks(0)).await.unwrap_err();
        assert!(matches!(err, AppError::EmptyAlbum));

        let state = store.snapshot();
        assert!(matches!(state.modal_error, Some(AppError::EmptyAlbum)));
        // Search results and the playing album survive the failure.
        assert_eq!(state.albums.len(), 1);
        assert!(state.playing_album.is_none());
    }

    #[tokio::test]
    async fn test_hydration_failure_is_wrapped_and_modal() {
        let (workflow, store, _player) =
            workflow(FakeCatalog { hydrated: None }, FakePlayer::new(0));

        let bare = Album {
            id: "missing".into(),
            title: "Ghost".into(),
            artist: "Nobody".into(),
            tracks: None,
        };
        let err = workflow.play_album(&bare).await.unwrap_err();
        assert!(matches!(err, AppError::Other(_)));
        assert!(matches!(store.snapshot().modal_error, Some(AppError::Other(_))));
    }

    #[tokio::test]
    async fn test_play_failure_is_modal() {
        let (workflow, store, _player) = workflow(
            FakeCatalog { hydrated: None },
            FakePlayer::new(0).failing_play(),
        );

        let err = workflow.play_album(&album_with_tracks(3)).await.unwrap_err();
        assert_eq!(err.to_string(), "playback engine refused to start");
        assert!(store.snapshot().modal_error.is_some());
    }

    #[tokio::test]
    async fn test_prepare_skipped_when_already_prepared() {
        let (workflow, _store, player) = workflow(
            FakeCatalog { hydrated: None },
            FakePlayer::new(0).prepared(),
        );

        workflow.play_album(&album_with_tracks(3)).await.unwrap();
        assert_eq!(player.prepare_calls.load(Ordering::SeqCst), 0);
    }
}
