// src/lifecycle/coordinator.rs
// =============================================================================
// The lifecycle coordinator: one place that knows the startup ordering and
// the teardown ordering of the backing services.
//
// Two registration lists, mirroring the two phases:
// - pre_ready: services the readiness barrier waits on before the crawl
//   may start. Only the host is registered here - the app must be served
//   before the first page fetch. The browser is *not* gated: it finishes
//   launching concurrently and is awaited lazily on first use inside the
//   rendering port.
// - on_close: services to stop at shutdown, stopped in registration order
//   (browser first, then host). Each close is awaited before the next one
//   starts, and the process doesn't exit until both are done - a headless
//   Chromium that outlives the CLI is a resource leak.
//
// A service whose startup failed is skipped at teardown (there is nothing
// to stop); a close failure is reported and the walk continues, so every
// healthy service still gets stopped.
// =============================================================================

use std::sync::Arc;

use crate::error::SnapError;
use crate::logger::Logger;

use super::Service;

pub struct Lifecycle {
    pre_ready: Vec<Arc<dyn Service>>,
    on_close: Vec<Arc<dyn Service>>,
    logger: Logger,
}

impl Lifecycle {
    pub fn new(
        pre_ready: Vec<Arc<dyn Service>>,
        on_close: Vec<Arc<dyn Service>>,
        logger: Logger,
    ) -> Self {
        Lifecycle {
            pre_ready,
            on_close,
            logger,
        }
    }

    /// The readiness barrier: resolves once every pre-ready service has
    /// finished initializing. A startup failure aborts the whole run
    /// before any route is fetched.
    pub async fn ready(&self) -> Result<(), SnapError> {
        for service in &self.pre_ready {
            service.ready().await?;
        }
        Ok(())
    }

    /// Tears every registered service down, in registration order.
    ///
    /// Each service's readiness is awaited first: if close() is called
    /// while a service is still initializing we wait for the handle to
    /// exist, then stop it - never more than once, since service closes
    /// are idempotent.
    pub async fn close(&self) {
        for service in &self.on_close {
            if service.ready().await.is_err() {
                // Startup failed: there is nothing to stop
                continue;
            }

            if let Err(err) = service.close().await {
                self.logger
                    .warn(&format!("failed to stop {}: {}", service.name(), err));
            }
        }
    }
}
