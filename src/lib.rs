//! # Dauerschleife Backend Library
//!
//! This is the core library for Dauerschleife, a small media-metadata web
//! service: it looks up track analyses, fetches and caches audio for them,
//! and serves the web player as static content.
//!
//! ## Architecture
//!
//! The application is built using:
//! - **Axum**: Modern web framework for HTTP server and routing
//! - **Tokio**: Async runtime for concurrent operations
//! - **Reqwest**: HTTP client for the analyser backend
//! - **Serde**: Serialization/deserialization for JSON APIs
//!
//! ## Core Components
//!
//! - [`config`]: Application configuration management
//! - [`backends`]: Capability traits (storage, audio source, analyser) and
//!   the registry resolving configured backend names to implementations
//! - [`counters`]: Process-wide request counters with an hourly window
//! - [`error`]: Centralized error handling and HTTP error responses
//! - [`middleware`]: HTTP middleware for request counting
//! - [`routes`]: API modules and router composition
//! - [`state`]: Shared application state
//! - [`types`]: Data transfer objects and shared type definitions
//!
//! ## Features
//!
//! - Pluggable storage, audio-source and analyser backends selected by name
//! - Config-filtered API modules mounted under `/api`
//! - Request counting across all routes with a scheduled hourly reset
//! - Static web player served as the fallback for non-API requests
//! - Fire-and-forget startup self-check against the analyser and audio source

pub mod backends;
pub mod config;
pub mod counters;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
