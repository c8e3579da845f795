// src/render/mod.rs
// =============================================================================
// This module contains the crawl-and-render loop, the heart of the tool.
//
// Submodules:
// - port: the RenderPort trait - "fetch a route, return its markup"
// - renderer: breadth-first crawl over discovered routes, plus the
//   targeted mode that renders an explicit route list
//
// The renderer never talks to Chromium or axum directly; it only sees
// the port, which is also what makes the crawl loop testable without a
// browser.
// =============================================================================

mod port;
mod renderer;

pub use port::RenderPort;
pub use renderer::Renderer;
