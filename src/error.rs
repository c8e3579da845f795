// src/error.rs
// =============================================================================
// This file defines the error taxonomy for the whole pipeline.
//
// There are only a handful of ways a prerender run can die, and every one
// of them is fatal: we never retry, we never continue past a failure.
// A crawl that fails on route 8 of 20 leaves routes 1-7 on disk but is
// still reported as a total failure.
//
// The variants:
// - Bind: the static host could not start (port in use, missing index.html)
// - Navigation: the browser could not produce markup for a route
// - FileSystem: a snapshot could not be written
// - Setup: a backing service failed outside of a specific route
//   (browser launch, shutdown, background task panics)
// - RouteLimit: the crawl safety bound was exceeded
//
// Rust concepts:
// - thiserror: Derives Display and std::error::Error from attributes
// - Clone: Our readiness futures are shared, so a startup error must be
//   cloneable to reach every waiter. That's why variants hold Strings
//   instead of source error types.
// =============================================================================

use std::path::Path;

use thiserror::Error;

// Everything in the pipeline returns Result<_, SnapError>
#[derive(Debug, Clone, Error)]
pub enum SnapError {
    /// The static host could not start serving the app
    #[error("could not start static host: {0}")]
    Bind(String),

    /// The browser could not render this route
    #[error("could not render route '/{route}': {message}")]
    Navigation { route: String, message: String },

    /// A snapshot directory or file could not be written
    #[error("filesystem error at {path}: {message}")]
    FileSystem { path: String, message: String },

    /// A backing service failed to start or stop cleanly
    #[error("service error: {0}")]
    Setup(String),

    /// The crawl kept discovering routes past the safety bound
    #[error("crawl exceeded the safety limit of {0} routes (raise --max-routes if the app really has more pages)")]
    RouteLimit(usize),
}

impl SnapError {
    // Helper for wrapping navigation failures with the route they hit
    pub fn navigation(route: &str, err: impl std::fmt::Display) -> Self {
        SnapError::Navigation {
            route: route.to_string(),
            message: err.to_string(),
        }
    }

    // Helper for wrapping std::io errors with the path they hit
    pub fn filesystem(path: &Path, err: impl std::fmt::Display) -> Self {
        SnapError::FileSystem {
            path: path.display().to_string(),
            message: err.to_string(),
        }
    }
}
