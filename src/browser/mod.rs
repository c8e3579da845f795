// src/browser/mod.rs
// =============================================================================
// This module drives headless Chromium to render routes.
//
// The rest of the crate only sees the RenderPort trait ("fetch this route,
// give me the markup"); this module is the production implementation,
// speaking the Chrome DevTools Protocol through chromiumoxide.
// =============================================================================

mod service;

pub use service::BrowserService;
