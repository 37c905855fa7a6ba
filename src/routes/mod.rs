//! API modules and router composition.
//!
//! Each sub-module is an independently addressable API module mounted under
//! `/api`; the composer filters the declared set against the configuration
//! and wires the static fallback and global middleware around it:
//!
//! - `analysis`: track search and analysis documents
//! - `audio`: audio retrieval for analysed tracks
//! - `site`: health, request statistics and version info

pub mod analysis;
pub mod audio;
pub mod site;

use std::path::Path;

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::Router;
use tower_http::{
    compression::CompressionLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::middleware;
use crate::state::AppState;

/// Capability every API module satisfies: a name (used for config-based
/// disabling), a mount path under `/api`, and route registration on an
/// isolated sub-router. The composer never inspects module internals.
pub trait ApiModule: Send + Sync {
    fn name(&self) -> &'static str;
    fn mount_path(&self) -> &'static str;
    fn register(&self, router: Router<AppState>) -> Router<AppState>;
}

/// The fixed set of API modules in mount order.
///
/// Declaration order is the mount order; later registrations shadow earlier
/// routes at the same path, so tests can rely on this exact sequence.
pub fn modules() -> Vec<Box<dyn ApiModule>> {
    vec![
        Box::new(analysis::AnalysisApi),
        Box::new(audio::AudioApi),
        Box::new(site::SiteApi),
    ]
}

/// The declared modules minus those disabled by configuration, order
/// preserved. Matching is case-insensitive so config drift in casing cannot
/// silently re-enable a module.
pub fn active_modules(disabled: &[String]) -> Vec<Box<dyn ApiModule>> {
    modules()
        .into_iter()
        .filter(|module| !disabled.iter().any(|name| name.eq_ignore_ascii_case(module.name())))
        .collect()
}

/// Builds the full route tree: `/api/<mount>` sub-trees for each active
/// module, the static web player as fallback, and the global layers
/// (request counting, body limit, compression, tracing).
pub fn compose(state: AppState) -> Router {
    let mut api = Router::new();
    for module in active_modules(&state.config.api.disabled) {
        let sub = module.register(Router::new());
        api = api.nest(module.mount_path(), sub);
    }

    let web_root = Path::new(&state.config.web.root);
    let static_service = ServeDir::new(web_root)
        .append_index_html_on_directories(true)
        .not_found_service(ServeFile::new(web_root.join("index.html")));

    let counters = state.counters.clone();

    Router::new()
        .nest("/api", api)
        .fallback_service(static_service)
        .with_state(state)
        // Globales Body-Limit (2 MB) – dieser Dienst nimmt keine großen Uploads an
        .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        // Outermost, so every request is counted before anything else runs
        .layer(from_fn_with_state(counters, middleware::count_requests))
}
