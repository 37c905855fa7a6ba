//! Backend capability traits and the registry resolving configured names to
//! concrete implementations.
//!
//! Each capability (storage, audio source, analyser) has exactly one
//! implementation per process lifetime, chosen once at startup. Unknown or
//! unset names fall back to a documented default so downstream components
//! never see an unresolved capability. Adding a backend means adding an
//! implementation and one registry arm; no other component changes.

pub mod analyser;
pub mod audio;
pub mod storage;

pub use analyser::SpotifyAnalyser;
pub use audio::YoutubeAudioSource;
pub use storage::LocalStorage;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::error::AppResult;
use crate::types::TrackInfo;

/// The kind of data addressed in a storage backend. Each kind lives in its
/// own namespace, so analysis and audio for the same track never collide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Analysis,
    Audio,
}

impl DataKind {
    pub fn dir(self) -> &'static str {
        match self {
            DataKind::Analysis => "analysis",
            DataKind::Audio => "audio",
        }
    }
}

/// An addressable slot in a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DataLocation {
    pub kind: DataKind,
    pub name: String,
}

impl DataLocation {
    /// Location of the cached analysis document for a track.
    pub fn analysis(track_id: &str) -> Self {
        Self { kind: DataKind::Analysis, name: format!("{}.json", track_id) }
    }

    /// Location of the cached audio for a track in the given container format.
    pub fn audio(track_id: &str, format: &str) -> Self {
        Self { kind: DataKind::Audio, name: format!("{}.{}", track_id, format) }
    }
}

/// Capability contract for storage backends.
#[async_trait]
pub trait Storage: Send + Sync {
    /// The registry identifier of this implementation.
    fn name(&self) -> &'static str;

    /// Persists `data` at `location`, overwriting any previous content.
    async fn store(&self, location: &DataLocation, data: &[u8]) -> AppResult<()>;

    /// Returns the content at `location`, or `None` if nothing is stored there.
    async fn provide(&self, location: &DataLocation) -> AppResult<Option<Vec<u8>>>;

    /// Whether something is stored at `location`.
    async fn has(&self, location: &DataLocation) -> bool;
}

/// Capability contract for audio-source backends.
#[async_trait]
pub trait AudioSource: Send + Sync {
    /// The registry identifier of this implementation.
    fn name(&self) -> &'static str;

    /// Fetches (or serves from cache) the audio for a track.
    ///
    /// Returns `None` when the source cannot obtain audio for the track;
    /// infrastructure failures surface as errors.
    async fn provide(&self, track: &TrackInfo) -> AppResult<Option<Vec<u8>>>;
}

/// Capability contract for track analysers.
#[async_trait]
pub trait Analyser: Send + Sync {
    /// The registry identifier of this implementation.
    fn name(&self) -> &'static str;

    /// Searches for tracks matching a free-text query.
    async fn search(&self, query: &str) -> AppResult<Vec<TrackInfo>>;

    /// Resolves the metadata of a single track by id.
    async fn track(&self, track_id: &str) -> AppResult<TrackInfo>;

    /// Produces the full analysis document for a track.
    async fn analyse(&self, track_id: &str) -> AppResult<serde_json::Value>;
}

/// Resolves the configured storage backend. Unknown names fall back to
/// `local`, the documented default.
pub fn resolve_storage(cfg: &AppConfig) -> Arc<dyn Storage> {
    match cfg.storage.backend.to_ascii_lowercase().as_str() {
        "local" | "" => Arc::new(LocalStorage::new(&cfg.storage.root)),
        other => {
            tracing::warn!(backend = other, "unknown storage backend, falling back to \"local\"");
            Arc::new(LocalStorage::new(&cfg.storage.root))
        }
    }
}

/// Resolves the configured audio-source backend. Unknown names fall back to
/// `youtube`, the documented default.
pub fn resolve_audio_source(cfg: &AppConfig, storage: Arc<dyn Storage>) -> Arc<dyn AudioSource> {
    match cfg.audio.backend.to_ascii_lowercase().as_str() {
        "youtube" | "" => Arc::new(YoutubeAudioSource::new(&cfg.audio, storage)),
        other => {
            tracing::warn!(backend = other, "unknown audio backend, falling back to \"youtube\"");
            Arc::new(YoutubeAudioSource::new(&cfg.audio, storage))
        }
    }
}

/// Resolves the configured analyser backend. Unknown names fall back to
/// `spotify`, the documented default.
pub fn resolve_analyser(cfg: &AppConfig) -> Arc<dyn Analyser> {
    match cfg.analyser.backend.to_ascii_lowercase().as_str() {
        "spotify" | "" => Arc::new(SpotifyAnalyser::new(&cfg.analyser)),
        other => {
            tracing::warn!(backend = other, "unknown analyser backend, falling back to \"spotify\"");
            Arc::new(SpotifyAnalyser::new(&cfg.analyser))
        }
    }
}
