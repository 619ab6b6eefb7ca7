//! Observable session state.
//!
//! The original app kept all of this as published fields on a process-wide
//! coordinator. Here it is an explicitly constructed store: a single locked
//! state value plus a listener list, decoupled from any rendering layer.
//! All mutation flows through store methods; listeners receive a fresh
//! snapshot after every change.

use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

use crate::errors::AppError;
use crate::models::{Album, AuthorizationState};

/// Status line shown before the first search.
pub const INITIAL_STATUS: &str = "Waiting for search input";

/// Snapshot of everything the presentation layer renders.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub authorization: AuthorizationState,
    /// Current search results. Cleared at the start of every search so a
    /// failed or empty search never shows stale albums.
    pub albums: Vec<Album>,
    pub status: String,
    /// Album most recently submitted for playback, kept for display
    /// regardless of whether the live queue actually matches it.
    pub playing_album: Option<Album>,
    pub activity_count: u32,
    pub reload_allowed: bool,
    /// Non-blocking error slot; replaced display content, suppressible.
    pub inline_error: Option<AppError>,
    /// Blocking error slot; cleared only by explicit acknowledgement.
    pub modal_error: Option<AppError>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            authorization: AuthorizationState::NotDetermined,
            albums: Vec::new(),
            status: INITIAL_STATUS.to_string(),
            playing_album: None,
            activity_count: 0,
            reload_allowed: false,
            inline_error: None,
            modal_error: None,
        }
    }
}

type Listener = Box<dyn Fn(&SessionState) + Send + Sync>;

/// Handle for removing a subscription.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(u64);

pub struct SessionStore {
    state: RwLock<SessionState>,
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_listener_id: AtomicU64,
    watch_tx: watch::Sender<SessionState>,
}

impl SessionStore {
    pub fn new() -> Arc<Self> {
        let (watch_tx, _) = watch::channel(SessionState::default());
        Arc::new(Self {
            state: RwLock::new(SessionState::default()),
            listeners: Mutex::new(Vec::new()),
            next_listener_id: AtomicU64::new(1),
            watch_tx,
        })
    }

    /// Current state by value.
    pub fn snapshot(&self) -> SessionState {
        self.state.read().clone()
    }

    /// Async-friendly subscription: a `watch` receiver that always holds
    /// the latest snapshot.
    pub fn watch(&self) -> watch::Receiver<SessionState> {
        self.watch_tx.subscribe()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&SessionState) + Send + Sync + 'static,
    ) -> SubscriptionId {
        let id = self.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().push((id, Box::new(listener)));
        SubscriptionId(id)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.listeners.lock().retain(|(lid, _)| *lid != id.0);
    }

    /// Apply a mutation and notify every listener with the new snapshot.
    fn update(&self, mutate: impl FnOnce(&mut SessionState)) {
        let snapshot = {
            let mut state = self.state.write();
            mutate(&mut state);
            state.clone()
        };
        // Listeners run outside the state lock so they may read the store.
        for (_, listener) in self.listeners.lock().iter() {
            listener(&snapshot);
        }
        self.watch_tx.send_replace(snapshot);
    }

    // Authorization. The access gate is the only writer.

    pub fn authorization(&self) -> AuthorizationState {
        self.state.read().authorization
    }

    pub(crate) fn set_authorization(&self, status: AuthorizationState) {
        self.update(|s| s.authorization = status);
    }

    // Search results and status line.

    pub fn set_albums(&self, albums: Vec<Album>) {
        self.update(|s| s.albums = albums);
    }

    pub fn clear_albums(&self) {
        self.update(|s| s.albums.clear());
    }

    pub fn set_status(&self, status: impl Into<String>) {
        self.update(|s| s.status = status.into());
    }

    pub fn set_playing_album(&self, album: Album) {
        self.update(|s| s.playing_album = Some(album));
    }

    // Error slots.

    pub fn set_inline_error(&self, error: AppError) {
        self.update(|s| s.inline_error = Some(error));
    }

    pub fn clear_inline_error(&self) {
        self.update(|s| s.inline_error = None);
    }

    pub fn set_modal_error(&self, error: AppError) {
        log::warn!("[SessionStore] Modal error: {}", error);
        self.update(|s| s.modal_error = Some(error));
    }

    /// The single acknowledgement action of the blocking dialog.
    pub fn acknowledge_modal_error(&self) {
        self.update(|s| s.modal_error = None);
    }

    // Activity counter. One guard per in-flight async operation; the guard
    // decrements exactly once when dropped, on every exit path.

    pub fn begin_activity(self: &Arc<Self>) -> ActivityGuard {
        self.update(|s| {
            s.activity_count += 1;
            s.reload_allowed = false;
        });
        ActivityGuard {
            store: Arc::clone(self),
        }
    }

    fn end_activity(&self) {
        self.update(|s| {
            s.activity_count = s.activity_count.saturating_sub(1);
            s.reload_allowed = s.activity_count == 0;
        });
    }

    /// Force the counter back to zero and re-enable reload. Called at
    /// teardown so an operation that never completes cannot leave the
    /// reload affordance stuck disabled.
    pub fn reset_activity(&self) {
        self.update(|s| {
            s.activity_count = 0;
            s.reload_allowed = true;
        });
    }
}

/// Decrements the activity counter when dropped.
pub struct ActivityGuard {
    store: Arc<SessionStore>,
}

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.store.end_activity();
    }
}
