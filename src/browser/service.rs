// src/browser/service.rs
// =============================================================================
// This file implements the rendering port with headless Chromium.
//
// Lifecycle:
// - Chromium is launched on a background task the moment the service is
//   constructed. Nothing gates the crawl on it: the launch result is only
//   awaited lazily, on the first fetch (the host may come up in parallel).
// - A single tab is created on first use and reused for every route.
// - close() shuts the browser down over the protocol and waits for the
//   event loop task to drain, so no Chromium process outlives the CLI.
//
// The snapshot itself is one JS expression evaluated in the page:
// doctype + outerHTML, exactly the string a browser would serialize.
// outerHTML alone drops the doctype, which breaks standards-mode
// rendering of the written files - hence the XMLSerializer half.
//
// Rust concepts:
// - OnceCell: lazy, awaitable one-time initialization (the shared tab)
// - The handler returned by Browser::launch is a Stream of protocol
//   events that must be polled for the connection to make progress;
//   we drain it on a dedicated task
// =============================================================================

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::Page;
use futures::StreamExt;
use tokio::sync::{Mutex, OnceCell};
use tokio::task::JoinHandle;

use crate::error::SnapError;
use crate::lifecycle::{spawn_ready, Ready, Service};
use crate::logger::Logger;
use crate::options::Options;
use crate::render::RenderPort;

// The expression evaluated in the rendered page to produce the snapshot.
// outerHTML drops the doctype, so we serialize and prepend it ourselves.
const SNAPSHOT_EXPRESSION: &str =
    "new XMLSerializer().serializeToString(document.doctype) + document.documentElement.outerHTML";

/// Renders routes with a headless Chromium instance
pub struct BrowserService {
    ready: Ready<BrowserHandle>,
    page: OnceCell<Page>,
    options: Options,
    logger: Logger,
}

// The launched browser plus the task draining its event stream
struct BrowserHandle {
    browser: Mutex<Browser>,
    event_task: Mutex<Option<JoinHandle<()>>>,
}

impl BrowserService {
    /// Constructing the service immediately starts the Chromium launch
    /// in the background; fetch() awaits it on first use
    pub fn new(options: &Options, logger: Logger) -> Self {
        BrowserService {
            ready: spawn_ready(launch_browser(logger)),
            page: OnceCell::new(),
            options: options.clone(),
            logger,
        }
    }

    // The shared tab, created on first use and reused for every route
    async fn page(&self) -> Result<&Page, SnapError> {
        let handle = self.ready.clone().await?;

        self.page
            .get_or_try_init(|| async {
                let browser = handle.browser.lock().await;
                let page = browser
                    .new_page("about:blank")
                    .await
                    .map_err(|e| SnapError::Setup(format!("could not open a page: {}", e)))?;

                self.logger.setup("Browser page ready to render.");
                Ok(page)
            })
            .await
    }
}

#[async_trait]
impl RenderPort for BrowserService {
    async fn fetch(&self, route: &str) -> Result<String, SnapError> {
        let page = self.page().await?;
        let url = self.options.route_url(route);

        // Navigate and wait for the app to finish loading
        page.goto(url.as_str())
            .await
            .map_err(|e| SnapError::navigation(route, e))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| SnapError::navigation(route, e))?;

        // Serialize the rendered document
        let document: String = page
            .evaluate(SNAPSHOT_EXPRESSION)
            .await
            .map_err(|e| SnapError::navigation(route, e))?
            .into_value()
            .map_err(|e| SnapError::navigation(route, e))?;

        Ok(document)
    }
}

#[async_trait]
impl Service for BrowserService {
    fn name(&self) -> &'static str {
        "headless browser"
    }

    async fn ready(&self) -> Result<(), SnapError> {
        self.ready.clone().await.map(|_| ())
    }

    async fn close(&self) -> Result<(), SnapError> {
        let handle = self.ready.clone().await?;

        // Taking the event task first makes a second close() a no-op
        let event_task = take_event_task(&handle.event_task).await;
        if event_task.is_none() {
            return Ok(());
        }

        handle
            .browser
            .lock()
            .await
            .close()
            .await
            .map_err(|e| SnapError::Setup(format!("could not close the browser: {}", e)))?;

        // The event stream ends once the browser connection is gone
        if let Some(task) = event_task {
            task.await
                .map_err(|e| SnapError::Setup(format!("browser event task failed: {}", e)))?;
        }

        Ok(())
    }
}

// Hands out the event-drain task at most once. The first close() gets
// Some and actually stops the browser; any later close() gets None and
// returns without touching the already-closed connection.
async fn take_event_task(slot: &Mutex<Option<JoinHandle<()>>>) -> Option<JoinHandle<()>> {
    slot.lock().await.take()
}

// Launches headless Chromium and starts draining its event stream
async fn launch_browser(logger: Logger) -> Result<BrowserHandle, SnapError> {
    let config = BrowserConfig::builder()
        .build()
        .map_err(SnapError::Setup)?;

    let (browser, mut events) = Browser::launch(config)
        .await
        .map_err(|e| SnapError::Setup(format!("could not launch headless Chromium: {}", e)))?;

    // The connection only makes progress while this stream is polled
    let event_task = tokio::spawn(async move {
        while let Some(event) = events.next().await {
            if event.is_err() {
                break;
            }
        }
    });

    logger.setup("Started headless Chromium!");

    Ok(BrowserHandle {
        browser: Mutex::new(browser),
        event_task: Mutex::new(Some(event_task)),
    })
}
