//! Integration and unit tests for the Dauerschleife application.
//!
//! This module organizes all test modules for the application.
//!
//! ## Test Modules
//!
//! - **config_tests**: Configuration loading and validation tests
//! - **registry_tests**: Backend registry resolution tests
//! - **counter_tests**: Request counter and reset tests
//! - **router_tests**: Module filtering and route composition tests
//! - **api_tests**: API endpoint tests against the composed router
//!
//! ## Running Tests
//!
//! Tests can be run using:
//! ```bash
//! cargo test
//! ```
//!
//! Individual test modules can be run with:
//! ```bash
//! cargo test router_tests
//! cargo test api_tests
//! # etc.
//! ```

pub mod support;

pub mod config_tests;
pub mod router_tests;
