use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Authorization state reported by the external streaming service.
///
/// Never persisted; every process starts at `NotDetermined` until the
/// service is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorizationState {
    #[default]
    NotDetermined,
    Authorized,
    Denied,
    Restricted,
    Unknown,
}

impl AuthorizationState {
    pub fn as_str(&self) -> &str {
        match self {
            AuthorizationState::NotDetermined => "not determined",
            AuthorizationState::Authorized => "authorized",
            AuthorizationState::Denied => "denied",
            AuthorizationState::Restricted => "restricted",
            AuthorizationState::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    /// Position on the album; some catalogs omit it.
    pub track_number: Option<u32>,
    /// Duration in seconds, when the catalog reports one.
    pub duration: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    pub id: String,
    pub title: String,
    pub artist: String,
    /// `None` until the track list has been hydrated from the catalog.
    pub tracks: Option<Vec<Track>>,
}

impl Album {
    pub fn is_hydrated(&self) -> bool {
        self.tracks.is_some()
    }

    /// Display label: "Artist — Title", or just the title when the catalog
    /// returned an empty artist field.
    pub fn label(&self) -> String {
        if self.artist.is_empty() {
            self.title.clone()
        } else {
            format!("{} — {}", self.artist, self.title)
        }
    }
}

/// Catalog search parameters. Only album results are requested; top-results
/// grouping is excluded so the response is a flat ranked list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub term: String,
    pub limit: usize,
    pub include_top_results: bool,
}

impl SearchQuery {
    pub const DEFAULT_LIMIT: usize = 20;

    pub fn albums(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            limit: Self::DEFAULT_LIMIT,
            include_top_results: false,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// One playable item submitted to the playback engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueEntry {
    pub track_id: String,
    pub title: String,
    pub track_number: Option<u32>,
    pub added_at: DateTime<Utc>,
}

impl From<&Track> for QueueEntry {
    fn from(track: &Track) -> Self {
        Self {
            track_id: track.id.clone(),
            title: track.title.clone(),
            track_number: track.track_number,
            added_at: Utc::now(),
        }
    }
}

/// Read-back of the engine's live queue.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueueSnapshot {
    pub entries: Vec<QueueEntry>,
    pub current: Option<QueueEntry>,
}

/// Outcome of one queue submission: how many tracks we sent versus how many
/// the live queue reports. The mismatch case is the defect this crate
/// exists to demonstrate, so it is reported as a status, never as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueSubmission {
    pub submitted: usize,
    pub observed: usize,
}

impl QueueSubmission {
    pub fn is_match(&self) -> bool {
        self.submitted == self.observed
    }

    pub fn report(&self) -> String {
        format!(
            "{} songs added; {} songs actually in queue - {}",
            self.submitted,
            self.observed,
            if self.is_match() {
                "correct behavior"
            } else {
                "MISMATCH DETECTED"
            }
        )
    }
}
