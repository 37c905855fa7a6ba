use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Request counters shared across all request-handling tasks.
///
/// Owned by [`crate::state::AppState`] and handed to the counting middleware
/// and the hourly reset task; there is no ambient global state.
#[derive(Clone)]
pub struct RequestCounters {
    total: Arc<AtomicU64>,
    hourly: Arc<AtomicU64>,
    start_time: Instant,
}

impl RequestCounters {
    pub fn new() -> Self {
        Self {
            total: Arc::new(AtomicU64::new(0)),
            hourly: Arc::new(AtomicU64::new(0)),
            start_time: Instant::now(),
        }
    }

    /// Records one inbound request on both the lifetime and the hourly window.
    pub fn record(&self) {
        self.total.fetch_add(1, Ordering::Relaxed);
        self.hourly.fetch_add(1, Ordering::Relaxed);
    }

    /// Resets the hourly window. Called by the scheduler, never by handlers.
    /// A request racing the reset lands in either window, never in both.
    pub fn reset_hourly(&self) {
        self.hourly.store(0, Ordering::Relaxed);
    }

    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }

    pub fn hourly(&self) -> u64 {
        self.hourly.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> CountersSnapshot {
        CountersSnapshot {
            total_requests: self.total(),
            hourly_requests: self.hourly(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
        }
    }
}

impl Default for RequestCounters {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Serialize)]
pub struct CountersSnapshot {
    pub total_requests: u64,
    pub hourly_requests: u64,
    pub uptime_seconds: u64,
}
