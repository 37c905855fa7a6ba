use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use super::ApiModule;
use crate::error::{validation, AppResult, OptionExt};
use crate::state::AppState;

/// Audio retrieval for analysed tracks, mounted at `/api/audio`.
pub struct AudioApi;

impl ApiModule for AudioApi {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn mount_path(&self) -> &'static str {
        "/audio"
    }

    fn register(&self, router: Router<AppState>) -> Router<AppState> {
        router.route("/jukebox/{id}", get(jukebox))
    }
}

async fn jukebox(State(state): State<AppState>, Path(id): Path<String>) -> AppResult<Response> {
    validation::validate_track_id(&id)?;

    let track = state.analyser.track(&id).await?;
    let bytes = state
        .audio
        .provide(&track)
        .await?
        .ok_or_not_found("audio for track")?;

    let content_type = audio_mime(&state.config.audio.cache_format);
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}

fn audio_mime(format: &str) -> &'static str {
    match format {
        "m4a" | "mp4" => "audio/mp4",
        "mp3" => "audio/mpeg",
        "ogg" | "opus" => "audio/ogg",
        "webm" => "audio/webm",
        _ => "application/octet-stream",
    }
}
