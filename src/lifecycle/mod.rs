// src/lifecycle/mod.rs
// =============================================================================
// This module owns service lifecycle: startup ordering and teardown.
//
// Submodules:
// - service: the Service trait (await-ready + close) and shared
//   readiness futures
// - coordinator: the Lifecycle coordinator that walks registered
//   services for the readiness barrier and for shutdown
//
// The crawl loop itself never starts or stops anything - it only reads
// through the rendering port. Everything process-shaped lives here.
// =============================================================================

mod coordinator;
mod service;

pub use coordinator::Lifecycle;
pub use service::{spawn_ready, Ready, Service};
