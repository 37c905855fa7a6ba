use std::sync::Arc;

use async_trait::async_trait;
use tokio::process::Command;

use super::{AudioSource, DataLocation, Storage};
use crate::config::AudioConfig;
use crate::error::{AppError, AppResult};
use crate::types::TrackInfo;

/// Audio source backed by an external downloader (yt-dlp or compatible).
///
/// Fetched audio is written through to the storage backend, so every track
/// is downloaded at most once per process fleet sharing the same storage.
pub struct YoutubeAudioSource {
    command: String,
    format: String,
    storage: Arc<dyn Storage>,
}

impl YoutubeAudioSource {
    pub fn new(cfg: &AudioConfig, storage: Arc<dyn Storage>) -> Self {
        Self {
            command: cfg.command.clone(),
            format: cfg.cache_format.clone(),
            storage,
        }
    }

    async fn download(&self, track: &TrackInfo) -> AppResult<Vec<u8>> {
        let target = std::env::temp_dir()
            .join(format!("dauerschleife-{}.{}", uuid::Uuid::new_v4(), self.format));
        let query = format!("ytsearch1:{} {}", track.artist, track.title);

        let output = Command::new(&self.command)
            .arg("--quiet")
            .arg("--extract-audio")
            .arg("--audio-format")
            .arg(&self.format)
            .arg("--output")
            .arg(&target)
            .arg(&query)
            .output()
            .await
            .map_err(|e| {
                AppError::Upstream(format!("audio downloader '{}' failed to start: {}", self.command, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Upstream(format!(
                "audio downloader exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let bytes = tokio::fs::read(&target).await.map_err(|e| {
            AppError::Upstream(format!("audio downloader produced no output file: {}", e))
        })?;
        let _ = tokio::fs::remove_file(&target).await;
        Ok(bytes)
    }
}

#[async_trait]
impl AudioSource for YoutubeAudioSource {
    fn name(&self) -> &'static str {
        "youtube"
    }

    async fn provide(&self, track: &TrackInfo) -> AppResult<Option<Vec<u8>>> {
        let location = DataLocation::audio(&track.id, &self.format);

        if let Some(cached) = self.storage.provide(&location).await? {
            tracing::debug!(track = %track.id, "audio cache hit");
            return Ok(Some(cached));
        }

        tracing::info!(track = %track.id, artist = %track.artist, title = %track.title, "fetching audio");
        let bytes = self.download(track).await?;

        // Cache failures are logged, not fatal: the caller still gets the audio.
        if let Err(e) = self.storage.store(&location, &bytes).await {
            tracing::warn!(track = %track.id, error = %e, "failed to cache fetched audio");
        }

        Ok(Some(bytes))
    }
}
