// src/host/mod.rs
// =============================================================================
// This module hosts the built app over HTTP while the browser renders it.
//
// The serving rules are exactly what a single-page app needs:
// - paths that look like files ("/main.js", "/styles/site.css") are
//   served from the dist directory on disk
// - every other path ("/", "/about", "/blog/post-1") gets index.html,
//   so the client-side router can take over
// =============================================================================

mod service;

pub use service::HostService;
