use std::sync::Arc;

use crate::backends::{Analyser, AudioSource, Storage};
use crate::config::AppConfig;
use crate::counters::RequestCounters;

/// The shared application state.
///
/// This struct holds everything request handlers need: the configuration,
/// the request counters and the three resolved backend singletons. It is
/// cloneable for use with Axum's request extraction system; clones share
/// the underlying `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// The application configuration.
    ///
    /// Loaded once at process start and never mutated afterwards.
    pub config: Arc<AppConfig>,
    /// The request counters.
    ///
    /// Incremented by the counting middleware on every request; the hourly
    /// window is reset by a scheduled task.
    pub counters: RequestCounters,
    /// The storage backend resolved from configuration.
    pub storage: Arc<dyn Storage>,
    /// The audio-source backend resolved from configuration.
    pub audio: Arc<dyn AudioSource>,
    /// The analyser backend resolved from configuration.
    pub analyser: Arc<dyn Analyser>,
}

impl AppState {
    /// Creates a new `AppState` from the loaded configuration and the
    /// backends resolved by the registry.
    ///
    /// Each backend is a process-wide singleton for its capability; the
    /// choice is immutable for the process's lifetime.
    pub fn new(
        config: AppConfig,
        storage: Arc<dyn Storage>,
        audio: Arc<dyn AudioSource>,
        analyser: Arc<dyn Analyser>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            counters: RequestCounters::new(),
            storage,
            audio,
            analyser,
        }
    }
}
