use thiserror::Error;

/// Failures raised by the directory-feed collaborator. Only `Session` is
/// fatal to a run; everything else degrades the affected query or entry.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("navigation session failed: {0}")]
    Session(String),

    #[error("search surface not found for query \"{query}\"")]
    SurfaceNotFound { query: String },

    #[error("entry \"{label}\" could not be activated: {reason}")]
    EntryUnavailable { label: String, reason: String },

    #[error("incremental load failed: {0}")]
    LoadFailed(String),
}

impl FeedError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, FeedError::Session(_))
    }
}

/// A website fetch that did not produce a usable page. Single attempt,
/// never retried here; the affected lead keeps score 10 and a note.
#[derive(Debug, Error)]
pub enum FetchFailure {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },
}
