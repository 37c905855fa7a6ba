//! Middleware components for HTTP request processing.
//!
//! The only cross-cutting concern this service applies itself is request
//! counting; tracing and compression come from `tower-http` layers wired in
//! the router composer.

pub mod request_count;

pub use request_count::count_requests;
