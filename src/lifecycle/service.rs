// src/lifecycle/service.rs
// =============================================================================
// The capability pair every backing service exposes: "await my readiness"
// and "close me". The host (a listening server) and the browser (an
// external Chromium process) are wildly different resources, but the
// lifecycle coordinator only ever talks to them through this one trait.
//
// Readiness is modeled as a *shared* future: the service kicks off its
// startup on a background task the moment it is constructed, and anyone
// who cares (the readiness barrier, the first fetch, teardown) awaits the
// same result. That is how the host can finish binding while Chromium is
// still launching.
//
// Rust concepts:
// - async-trait: async fns in traits that can be used as trait objects
// - futures::future::Shared: a future that can be awaited many times,
//   handing a clone of its output to each waiter
// - tokio::spawn: runs the startup concurrently with everything else
// =============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::future::Future;

use crate::error::SnapError;

/// A shared readiness future: resolves to the initialized resource,
/// or to the startup error (cloned to every waiter)
pub type Ready<T> = Shared<BoxFuture<'static, Result<Arc<T>, SnapError>>>;

/// Kicks off a service's startup on a background task and wraps the
/// result in a Ready handle that can be awaited any number of times
pub fn spawn_ready<T, F>(startup: F) -> Ready<T>
where
    T: Send + Sync + 'static,
    F: Future<Output = Result<T, SnapError>> + Send + 'static,
{
    let task = tokio::spawn(startup);

    async move {
        match task.await {
            Ok(Ok(resource)) => Ok(Arc::new(resource)),
            Ok(Err(err)) => Err(err),
            // The startup task itself died (panic or runtime shutdown)
            Err(err) => Err(SnapError::Setup(format!("startup task failed: {}", err))),
        }
    }
    .boxed()
    .shared()
}

/// The closed interface the lifecycle coordinator manages services through
#[async_trait]
pub trait Service: Send + Sync {
    /// Human-readable name for log and warning lines
    fn name(&self) -> &'static str;

    /// Resolves once the service has finished initializing,
    /// or with the error that killed its startup
    async fn ready(&self) -> Result<(), SnapError>;

    /// Stops the service and waits for it to actually stop.
    /// Must be idempotent: a second call is a no-op.
    async fn close(&self) -> Result<(), SnapError>;
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does Shared give us that a plain future doesn't?
//    - A future can normally be awaited once; awaiting moves it
//    - Shared wraps it so many places can await the *same* startup:
//      the barrier, the first fetch and teardown all see one result
//
// 2. Why tokio::spawn inside spawn_ready?
//    - Without it, startup would only make progress while someone awaits
//      the future (futures in Rust are lazy!)
//    - Spawning makes the host bind and the browser launch immediately,
//      in parallel, while the rest of the program keeps going
//
// 3. Why does the error type have to be Clone?
//    - Shared hands a clone of the output to every waiter
//    - If the host fails to bind, both the barrier and teardown receive
//      that same bind error
// -----------------------------------------------------------------------------
