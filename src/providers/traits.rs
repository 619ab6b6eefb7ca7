use crate::models::{Album, AuthorizationState, QueueEntry, QueueSnapshot, SearchQuery};
use anyhow::Result;
use async_trait::async_trait;

/// External authorization prompt for the streaming service.
///
/// `request_authorization` may surface a user-facing system dialog; the
/// service is expected to show it at most once per session unless the user
/// resets permissions externally.
#[async_trait]
pub trait AuthorizationService: Send + Sync {
    async fn request_authorization(&self) -> AuthorizationState;
}

/// Catalog metadata source: album search plus track-list hydration.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Unique identifier (e.g., "apple-music", "tidal")
    fn id(&self) -> &str;

    /// User-friendly name
    fn name(&self) -> &str;

    /// Ranked album search. Zero results is a valid, successful response.
    async fn search_albums(&self, query: &SearchQuery) -> Result<Vec<Album>>;

    /// Fetch the album with its full track list populated.
    async fn album_tracks(&self, album_id: &str) -> Result<Album>;
}

/// Playback engine surface.
///
/// The engine requires a two-phase start: `play` fails while the engine is
/// unprepared, so callers must check `is_prepared` and call `prepare`
/// first. Note that `queue_snapshot` read immediately after `play` may
/// observe an interim queue if the engine populates it asynchronously —
/// that window is exactly what this crate measures.
#[async_trait]
pub trait PlayerControl: Send + Sync {
    /// Destructive replace of the live queue; previously queued content is
    /// discarded, not appended to.
    fn replace_queue(&self, entries: Vec<QueueEntry>);

    fn is_prepared(&self) -> bool;

    async fn prepare(&self) -> Result<()>;

    async fn play(&self) -> Result<()>;

    fn stop(&self);

    fn queue_snapshot(&self) -> QueueSnapshot;
}
