// src/context.rs
// =============================================================================
// The composition root: the one place the whole object graph is wired.
//
// Construction is explicit - every component receives its dependencies
// as arguments, there is no registry or global state. Building the
// context also *starts* both backing services (their startup runs on
// background tasks); the readiness barrier is a separate, later step so
// the host and the browser can come up in parallel.
//
// Wiring, mirroring the two lifecycle phases:
// - pre-ready: the host only. The app must be served before the first
//   fetch; the browser is awaited lazily inside the rendering port.
// - on-close: browser first, then host, each awaited in turn.
// =============================================================================

use std::sync::Arc;

use crate::browser::BrowserService;
use crate::error::SnapError;
use crate::host::HostService;
use crate::lifecycle::Lifecycle;
use crate::logger::Logger;
use crate::options::Options;
use crate::render::Renderer;

pub struct AppContext {
    pub renderer: Renderer,
    lifecycle: Lifecycle,
}

/// Builds and starts the application context for one prerender run
pub fn context(options: Options) -> AppContext {
    let logger = Logger::new(options.verbose);

    let host = Arc::new(HostService::new(&options, logger));
    let browser = Arc::new(BrowserService::new(&options, logger));

    let lifecycle = Lifecycle::new(
        vec![host.clone()],
        vec![browser.clone(), host],
        logger,
    );

    let renderer = Renderer::new(options, browser, logger);

    AppContext {
        renderer,
        lifecycle,
    }
}

impl AppContext {
    /// Resolves once the backing services the crawl depends on are up
    pub async fn ready(&self) -> Result<(), SnapError> {
        self.lifecycle.ready().await
    }

    /// Stops the backing services and waits for them to be gone
    pub async fn close(&self) {
        self.lifecycle.close().await;
    }

    /// The whole run: barrier, crawl, teardown.
    ///
    /// A readiness failure (bad port, missing dist) skips the crawl
    /// entirely - not a single route is fetched, not a single file is
    /// written. Teardown runs either way: a headless Chromium left
    /// behind would outlive the CLI.
    pub async fn prerender(&self) -> Result<usize, SnapError> {
        let outcome = match self.ready().await {
            Ok(()) => self.renderer.run(None).await,
            Err(err) => Err(err),
        };

        self.close().await;

        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::lifecycle::Service;
    use crate::render::RenderPort;

    // A port that just counts how often the crawl asks for a page
    struct CountingPort {
        fetches: AtomicUsize,
    }

    impl CountingPort {
        fn new() -> Arc<Self> {
            Arc::new(CountingPort {
                fetches: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl RenderPort for CountingPort {
        async fn fetch(&self, _route: &str) -> Result<String, SnapError> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok("<html><body>no links</body></html>".to_string())
        }
    }

    // A service whose startup outcome is scripted and whose stops are counted
    struct ScriptedService {
        fail_startup: bool,
        closes: AtomicUsize,
    }

    impl ScriptedService {
        fn new(fail_startup: bool) -> Arc<Self> {
            Arc::new(ScriptedService {
                fail_startup,
                closes: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl Service for ScriptedService {
        fn name(&self) -> &'static str {
            "scripted-service"
        }

        async fn ready(&self) -> Result<(), SnapError> {
            if self.fail_startup {
                Err(SnapError::Bind("scripted bind failure".to_string()))
            } else {
                Ok(())
            }
        }

        async fn close(&self) -> Result<(), SnapError> {
            self.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    // Wires an AppContext exactly the way context() does, but over
    // scripted services and a counting port
    fn scripted_context(
        dir: &std::path::Path,
        host: Arc<ScriptedService>,
        browser: Arc<ScriptedService>,
        port: Arc<CountingPort>,
    ) -> AppContext {
        let logger = Logger::new(false);
        let lifecycle = Lifecycle::new(
            vec![host.clone()],
            vec![browser, host],
            logger,
        );
        let renderer = Renderer::new(Options::for_test(dir), port, logger);

        AppContext {
            renderer,
            lifecycle,
        }
    }

    #[tokio::test]
    async fn test_failed_barrier_skips_the_crawl_entirely() {
        let dir = tempfile::tempdir().unwrap();
        let host = ScriptedService::new(true);
        let browser = ScriptedService::new(false);
        let port = CountingPort::new();

        let ctx = scripted_context(dir.path(), host.clone(), browser.clone(), port.clone());
        let err = ctx.prerender().await.unwrap_err();

        // The bind failure surfaces as-is...
        assert!(matches!(err, SnapError::Bind(_)));
        // ...before any route was fetched and before any file was written
        assert_eq!(port.fetches.load(Ordering::SeqCst), 0);
        assert!(!tokio::fs::try_exists(dir.path().join("dist")).await.unwrap());
        // Teardown still ran: the healthy browser was stopped, the host
        // that never came up was skipped
        assert_eq!(browser.closes.load(Ordering::SeqCst), 1);
        assert_eq!(host.closes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_prerender_crawls_and_tears_down() {
        let dir = tempfile::tempdir().unwrap();
        let host = ScriptedService::new(false);
        let browser = ScriptedService::new(false);
        let port = CountingPort::new();

        let ctx = scripted_context(dir.path(), host.clone(), browser.clone(), port.clone());
        let rendered = ctx.prerender().await.unwrap();

        // A link-less root renders exactly once and lands on disk
        assert_eq!(rendered, 1);
        assert_eq!(port.fetches.load(Ordering::SeqCst), 1);
        assert!(
            tokio::fs::try_exists(dir.path().join("dist/index.html"))
                .await
                .unwrap()
        );
        // Both services were stopped exactly once
        assert_eq!(browser.closes.load(Ordering::SeqCst), 1);
        assert_eq!(host.closes.load(Ordering::SeqCst), 1);
    }
}
