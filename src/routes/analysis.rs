use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use super::ApiModule;
use crate::backends::DataLocation;
use crate::error::{validation, AppResult};
use crate::state::AppState;
use crate::types::TrackInfo;

/// Track search and analysis documents, mounted at `/api/analysis`.
pub struct AnalysisApi;

impl ApiModule for AnalysisApi {
    fn name(&self) -> &'static str {
        "analysis"
    }

    fn mount_path(&self) -> &'static str {
        "/analysis"
    }

    fn register(&self, router: Router<AppState>) -> Router<AppState> {
        router
            .route("/search", get(search))
            .route("/analyse/{id}", get(analyse))
    }
}

#[derive(Deserialize)]
struct SearchParams {
    query: String,
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<TrackInfo>>> {
    validation::validate_query(&params.query)?;
    let tracks = state.analyser.search(params.query.trim()).await?;
    Ok(Json(tracks))
}

// Cache-through: stored analyses are served without touching the analyser.
async fn analyse(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    validation::validate_track_id(&id)?;

    let location = DataLocation::analysis(&id);
    if let Some(cached) = state.storage.provide(&location).await? {
        let analysis: serde_json::Value = serde_json::from_slice(&cached)?;
        return Ok(Json(analysis));
    }

    let analysis = state.analyser.analyse(&id).await?;

    let bytes = serde_json::to_vec(&analysis)?;
    if let Err(e) = state.storage.store(&location, &bytes).await {
        tracing::warn!(track = %id, error = %e, "failed to cache analysis");
    }

    Ok(Json(analysis))
}
