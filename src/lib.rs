//! trackcheck — reproduces a streaming-SDK queueing defect.
//!
//! When all tracks of an album are submitted to the playback queue, some
//! can silently fail to be enqueued. This crate is the UI-free core of a
//! demonstration app for that bug: search a catalog for albums, queue a
//! selected album, start playback, and reconcile the number of tracks
//! submitted against the number the live queue reports.
//!
//! External collaborators (authorization prompt, catalog, playback engine)
//! are consumed through the traits in [`providers`]; a presentation layer
//! renders the state published by the [`store::SessionStore`].

pub mod access;
pub mod config;
pub mod errors;
pub mod models;
pub mod playback;
pub mod providers;
pub mod search;
pub mod session;
pub mod store;

pub use access::AccessGate;
pub use config::SessionConfig;
pub use errors::AppError;
pub use models::{
    Album, AuthorizationState, QueueEntry, QueueSnapshot, QueueSubmission, SearchQuery, Track,
};
pub use playback::PlaybackReconciliationWorkflow;
pub use providers::{AuthorizationService, CatalogProvider, PlayerControl};
pub use search::CatalogSearchWorkflow;
pub use session::Session;
pub use store::{ActivityGuard, SessionState, SessionStore, SubscriptionId};
