use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::Analyser;
use crate::config::AnalyserConfig;
use crate::error::{AppError, AppResult};
use crate::types::TrackInfo;

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const API_BASE: &str = "https://api.spotify.com/v1";

/// How many results a search asks for.
const SEARCH_LIMIT: &str = "10";

/// Track analyser backed by the Spotify Web API (client-credentials flow).
pub struct SpotifyAnalyser {
    client: reqwest::Client,
    client_id: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

#[derive(Deserialize)]
struct SearchResponse {
    tracks: SearchTracks,
}

#[derive(Deserialize)]
struct SearchTracks {
    items: Vec<SpotifyTrack>,
}

#[derive(Deserialize)]
struct SpotifyTrack {
    id: String,
    name: String,
    #[serde(default)]
    duration_ms: u64,
    #[serde(default)]
    artists: Vec<SpotifyArtist>,
}

#[derive(Deserialize)]
struct SpotifyArtist {
    name: String,
}

impl From<SpotifyTrack> for TrackInfo {
    fn from(track: SpotifyTrack) -> Self {
        TrackInfo {
            id: track.id,
            title: track.name,
            artist: track.artists.into_iter().map(|a| a.name).next().unwrap_or_default(),
            duration_ms: track.duration_ms,
        }
    }
}

impl SpotifyAnalyser {
    pub fn new(cfg: &AnalyserConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            client_id: cfg.client_id.clone(),
            client_secret: cfg.client_secret.clone(),
            token: Mutex::new(None),
        }
    }

    /// Returns a valid access token, requesting a fresh one when the cached
    /// token is absent or about to expire.
    async fn token(&self) -> AppResult<String> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > Instant::now() {
                return Ok(cached.value.clone());
            }
        }

        if self.client_id.is_empty() || self.client_secret.is_empty() {
            return Err(AppError::Upstream(
                "analyser credentials are not configured (analyser.client_id / analyser.client_secret)"
                    .to_string(),
            ));
        }

        let resp: TokenResponse = self
            .client
            .post(TOKEN_URL)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        // Renew slightly early so in-flight requests never carry a stale token.
        let expires_at = Instant::now() + Duration::from_secs(resp.expires_in.saturating_sub(30));
        *guard = Some(CachedToken { value: resp.access_token.clone(), expires_at });
        tracing::debug!("refreshed analyser access token");
        Ok(resp.access_token)
    }
}

#[async_trait]
impl Analyser for SpotifyAnalyser {
    fn name(&self) -> &'static str {
        "spotify"
    }

    async fn search(&self, query: &str) -> AppResult<Vec<TrackInfo>> {
        let token = self.token().await?;
        let resp: SearchResponse = self
            .client
            .get(format!("{}/search", API_BASE))
            .bearer_auth(token)
            .query(&[("q", query), ("type", "track"), ("limit", SEARCH_LIMIT)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.tracks.items.into_iter().map(TrackInfo::from).collect())
    }

    async fn track(&self, track_id: &str) -> AppResult<TrackInfo> {
        let token = self.token().await?;
        let track: SpotifyTrack = self
            .client
            .get(format!("{}/tracks/{}", API_BASE, track_id))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(track.into())
    }

    async fn analyse(&self, track_id: &str) -> AppResult<serde_json::Value> {
        let token = self.token().await?;
        let analysis = self
            .client
            .get(format!("{}/audio-analysis/{}", API_BASE, track_id))
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(analysis)
    }
}
