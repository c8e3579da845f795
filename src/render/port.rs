// src/render/port.rs
// =============================================================================
// The rendering port: the one capability the crawl loop consumes.
//
// Contract:
// - input is a route relative to the site root ("" is the root itself)
// - output is the fully rendered document: serialized doctype followed
//   by the root element's outer HTML, as one string
// - a route that cannot be rendered is a fatal Navigation error; the
//   caller does not retry
//
// In production the port is BrowserService (headless Chromium pointed at
// the local static host). In tests it's a scripted stub.
// =============================================================================

use async_trait::async_trait;

use crate::error::SnapError;

#[async_trait]
pub trait RenderPort: Send + Sync {
    /// Navigates to `{host}/{route}` and returns the rendered markup
    async fn fetch(&self, route: &str) -> Result<String, SnapError>;
}
