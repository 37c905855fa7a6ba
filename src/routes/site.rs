use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use super::ApiModule;
use crate::counters::CountersSnapshot;
use crate::state::AppState;

/// Health, request statistics and version info, mounted at `/api/site`.
pub struct SiteApi;

impl ApiModule for SiteApi {
    fn name(&self) -> &'static str {
        "site"
    }

    fn mount_path(&self) -> &'static str {
        "/site"
    }

    fn register(&self, router: Router<AppState>) -> Router<AppState> {
        router
            .route("/healthz", get(healthz))
            .route("/stats", get(stats))
            .route("/version", get(version))
    }
}

// Health check endpoint - lightweight, no backend access
async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Request-counter snapshot: lifetime total, current hourly window, uptime
async fn stats(State(state): State<AppState>) -> Json<CountersSnapshot> {
    Json(state.counters.snapshot())
}

// Version/Build info endpoint (JSON)
async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
