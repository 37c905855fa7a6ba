use serde::{Deserialize, Serialize};

/// A track as reported by an analyser backend.
///
/// This is the unit passed between the analyser (which finds tracks) and the
/// audio source (which fetches audio for them).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Backend-specific track identifier.
    pub id: String,
    /// Track title.
    pub title: String,
    /// Primary artist name.
    pub artist: String,
    /// Track length in milliseconds, 0 when the backend does not report it.
    #[serde(default)]
    pub duration_ms: u64,
}
