//! Shared test fixtures: stub backends substituted at the capability seams.

use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::backends::{Analyser, AudioSource, DataLocation, Storage};
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::state::AppState;
use crate::types::TrackInfo;

pub fn test_track(id: &str) -> TrackInfo {
    TrackInfo {
        id: id.to_string(),
        title: "Never Gonna Give You Up".to_string(),
        artist: "Rick Astley".to_string(),
        duration_ms: 213_000,
    }
}

/// In-memory storage backend.
#[derive(Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<DataLocation, Vec<u8>>>,
}

#[async_trait]
impl Storage for MemoryStorage {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn store(&self, location: &DataLocation, data: &[u8]) -> AppResult<()> {
        self.entries.write().await.insert(location.clone(), data.to_vec());
        Ok(())
    }

    async fn provide(&self, location: &DataLocation) -> AppResult<Option<Vec<u8>>> {
        Ok(self.entries.read().await.get(location).cloned())
    }

    async fn has(&self, location: &DataLocation) -> bool {
        self.entries.read().await.contains_key(location)
    }
}

/// Audio source returning fixed bytes and counting calls.
pub struct StaticAudioSource {
    pub bytes: Vec<u8>,
    pub calls: AtomicUsize,
}

impl StaticAudioSource {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes, calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl AudioSource for StaticAudioSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn provide(&self, _track: &TrackInfo) -> AppResult<Option<Vec<u8>>> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(Some(self.bytes.clone()))
    }
}

/// Analyser returning canned results and counting analyse calls.
#[derive(Default)]
pub struct CannedAnalyser {
    pub analyse_calls: AtomicUsize,
}

#[async_trait]
impl Analyser for CannedAnalyser {
    fn name(&self) -> &'static str {
        "canned"
    }

    async fn search(&self, _query: &str) -> AppResult<Vec<TrackInfo>> {
        Ok(vec![test_track("track-1")])
    }

    async fn track(&self, track_id: &str) -> AppResult<TrackInfo> {
        Ok(test_track(track_id))
    }

    async fn analyse(&self, track_id: &str) -> AppResult<serde_json::Value> {
        self.analyse_calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(serde_json::json!({
            "track": track_id,
            "sections": [],
            "beats": [],
        }))
    }
}

/// An `AppState` over stub backends and the given configuration.
pub fn test_state(config: AppConfig) -> AppState {
    AppState::new(
        config,
        Arc::new(MemoryStorage::default()),
        Arc::new(StaticAudioSource::new(b"stub-audio".to_vec())),
        Arc::new(CannedAnalyser::default()),
    )
}
