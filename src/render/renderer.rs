// src/render/renderer.rs
// =============================================================================
// This file implements the crawl: breadth-first over discovered routes.
//
// How it works:
// 1. Start with the root route ("") in the frontier
// 2. Pop the first route, render it through the port, write the snapshot
// 3. Extract candidate routes from the rendered markup
// 4. Push candidates we've neither visited nor already queued
// 5. Repeat until the frontier is empty
//
// Routes are rendered strictly one at a time - there is no overlap
// between one route's write and the next route's fetch, so the visited
// set and the frontier need no locking at all.
//
// Every failure is fatal: no retries, no partial-success mode. A crawl
// that dies on route 8 of 20 leaves routes 1-7 on disk but reports a
// total failure.
//
// Rust concepts:
// - VecDeque: double-ended queue; push_back/pop_front gives us FIFO,
//   which is what makes the traversal breadth-first
// - HashSet: O(1) membership checks for the visited set
// =============================================================================

use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

use crate::error::SnapError;
use crate::logger::Logger;
use crate::options::Options;
use crate::scrape::parse_for_routes;
use crate::snapshot;

use super::RenderPort;

/// Crawls the hosted app and writes one HTML snapshot per route
pub struct Renderer {
    options: Options,
    port: Arc<dyn RenderPort>,
    logger: Logger,
}

impl Renderer {
    pub fn new(options: Options, port: Arc<dyn RenderPort>, logger: Logger) -> Self {
        Renderer {
            options,
            port,
            logger,
        }
    }

    /// Renders the site and returns how many routes were written.
    ///
    /// With `limit_to_routes` we render exactly those routes, in order,
    /// with no discovery and no dedup (the caller owns the list - asking
    /// for a route twice renders it twice). Without it we crawl the whole
    /// site starting from the root.
    pub async fn run(&self, limit_to_routes: Option<Vec<String>>) -> Result<usize, SnapError> {
        match limit_to_routes {
            Some(routes) => {
                for route in &routes {
                    self.fetch_and_render(route).await?;
                }
                Ok(routes.len())
            }
            None => self.crawl().await,
        }
    }

    // The full breadth-first crawl
    async fn crawl(&self) -> Result<usize, SnapError> {
        // We'll start on the root...
        let mut frontier: VecDeque<String> = VecDeque::from([String::new()]);
        // ...and keep track of where we've already been
        let mut visited: HashSet<String> = HashSet::new();

        while let Some(route) = frontier.pop_front() {
            // Safety bound: a page whose links change between renders can
            // keep the frontier alive forever; don't let it
            if visited.len() >= self.options.max_routes {
                return Err(SnapError::RouteLimit(self.options.max_routes));
            }

            let document = self.fetch_and_render(&route).await?;

            // Remember that we've been here. A visited route is never
            // queued again for the rest of the run.
            visited.insert(route);

            // Queue the routes this page links to that we haven't seen:
            // neither already rendered nor already waiting in line
            for candidate in parse_for_routes(&document) {
                if !visited.contains(&candidate) && !frontier.contains(&candidate) {
                    frontier.push_back(candidate);
                }
            }
        }

        Ok(visited.len())
    }

    // Renders one route and writes its snapshot; returns the markup so
    // the crawl can scrape it for further routes
    async fn fetch_and_render(&self, route: &str) -> Result<String, SnapError> {
        let document = self.port.fetch(route).await?;

        let path = snapshot::route_file_path(&self.options.app_root(), route);
        snapshot::write_and_mkdir(&path, &document).await?;

        self.logger.run(&format!("Rendered & wrote {}", path.display()));

        Ok(document)
    }
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Breadth-first vs depth-first:
//    - Breadth-first: render everything one link away from the root,
//      then everything two links away, and so on
//    - pop_front + push_back on a VecDeque is all it takes; swapping
//      pop_front for pop_back would make this depth-first
//
// 2. Why check the frontier with contains() when HashSet is faster?
//    - The frontier also carries *order*, which a set would throw away
//    - Frontiers are small (pending routes, not all routes), so the
//      linear scan is not worth optimizing away
//
// 3. Why does fetch_and_render return the markup?
//    - The crawl needs it for link extraction, and rendering it twice
//      would double the browser work (and might not even be identical)
//    - The string is dropped as soon as extraction is done - snapshots
//      live on disk, not in memory
//
// 4. Why Arc<dyn RenderPort> instead of the browser service directly?
//    - The crawl logic doesn't care where markup comes from
//    - Tests swap in a scripted port, so the whole traversal is
//      exercised without launching Chromium
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;

    // A scripted port: serves canned markup per route and records every
    // fetch call in order
    struct StubPort {
        pages: HashMap<String, String>,
        calls: Mutex<Vec<String>>,
        fail_on: Option<String>,
    }

    impl StubPort {
        fn new(pages: &[(&str, &str)]) -> Arc<Self> {
            Arc::new(StubPort {
                pages: pages
                    .iter()
                    .map(|(route, html)| (route.to_string(), html.to_string()))
                    .collect(),
                calls: Mutex::new(Vec::new()),
                fail_on: None,
            })
        }

        fn failing_on(pages: &[(&str, &str)], route: &str) -> Arc<Self> {
            let mut stub = StubPort::new(pages);
            Arc::get_mut(&mut stub).unwrap().fail_on = Some(route.to_string());
            stub
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RenderPort for StubPort {
        async fn fetch(&self, route: &str) -> Result<String, SnapError> {
            self.calls.lock().unwrap().push(route.to_string());

            if self.fail_on.as_deref() == Some(route) {
                return Err(SnapError::navigation(route, "scripted failure"));
            }

            match self.pages.get(route) {
                Some(html) => Ok(html.clone()),
                None => Ok("<html><body>no links</body></html>".to_string()),
            }
        }
    }

    fn renderer_in(dir: &std::path::Path, port: Arc<StubPort>) -> Renderer {
        Renderer::new(Options::for_test(dir), port, Logger::new(false))
    }

    async fn snapshot_exists(dir: &std::path::Path, name: &str) -> bool {
        tokio::fs::try_exists(dir.join("dist").join(name)).await.unwrap()
    }

    #[tokio::test]
    async fn test_root_discovers_and_renders_linked_route() {
        let dir = tempfile::tempdir().unwrap();
        let port = StubPort::new(&[("", r#"<a href="/about">About</a>"#)]);

        let rendered = renderer_in(dir.path(), port.clone()).run(None).await.unwrap();

        assert_eq!(rendered, 2);
        assert_eq!(port.calls(), vec!["", "about"]);
        assert!(snapshot_exists(dir.path(), "index.html").await);
        assert!(snapshot_exists(dir.path(), "about.html").await);
    }

    #[tokio::test]
    async fn test_crawl_never_fetches_a_route_twice() {
        // Every page links back to the root and to each other
        let dir = tempfile::tempdir().unwrap();
        let port = StubPort::new(&[
            ("", r#"<a href="/a">A</a> <a href="/b">B</a>"#),
            ("a", r#"<a href="/">Home</a> <a href="/b">B</a>"#),
            ("b", r#"<a href="/">Home</a> <a href="/a">A</a>"#),
        ]);

        renderer_in(dir.path(), port.clone()).run(None).await.unwrap();

        let calls = port.calls();
        assert_eq!(calls, vec!["", "a", "b"]);

        // Dedup invariant spelled out: no route fetched more than once
        let unique: HashSet<_> = calls.iter().collect();
        assert_eq!(unique.len(), calls.len());
    }

    #[tokio::test]
    async fn test_routes_are_visited_in_discovery_order() {
        let dir = tempfile::tempdir().unwrap();
        let port = StubPort::new(&[
            ("", r#"<a href="/b">B</a> <a href="/a">A</a>"#),
            // b is rendered first and discovers c; c queues behind a
            ("b", r#"<a href="/c">C</a>"#),
        ]);

        renderer_in(dir.path(), port.clone()).run(None).await.unwrap();

        assert_eq!(port.calls(), vec!["", "b", "a", "c"]);
    }

    #[tokio::test]
    async fn test_linkless_root_renders_only_itself() {
        // The extractor's fallback re-proposes the root, which is already
        // visited by then - the crawl must terminate after one render
        let dir = tempfile::tempdir().unwrap();
        let port = StubPort::new(&[("", "<html><body>nothing</body></html>")]);

        let rendered = renderer_in(dir.path(), port.clone()).run(None).await.unwrap();

        assert_eq!(rendered, 1);
        assert_eq!(port.calls(), vec![""]);
    }

    #[tokio::test]
    async fn test_targeted_mode_renders_duplicates_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let port = StubPort::new(&[]);

        let routes = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        let rendered = renderer_in(dir.path(), port.clone())
            .run(Some(routes))
            .await
            .unwrap();

        assert_eq!(rendered, 3);
        assert_eq!(port.calls(), vec!["a", "b", "a"]);
        assert!(snapshot_exists(dir.path(), "a.html").await);
        assert!(snapshot_exists(dir.path(), "b.html").await);
    }

    #[tokio::test]
    async fn test_navigation_failure_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let port = StubPort::failing_on(&[("", r#"<a href="/bad">Bad</a>"#)], "bad");

        let err = renderer_in(dir.path(), port.clone()).run(None).await.unwrap_err();

        assert!(matches!(err, SnapError::Navigation { .. }));
        // Fail-fast, not transactional: the root snapshot survives
        assert!(snapshot_exists(dir.path(), "index.html").await);
        assert!(!snapshot_exists(dir.path(), "bad.html").await);
    }

    #[tokio::test]
    async fn test_route_limit_stops_a_runaway_crawl() {
        let dir = tempfile::tempdir().unwrap();
        // Each page links to the next: 0 -> 1 -> 2 -> ...
        let pages: Vec<(String, String)> = (0..10)
            .map(|i| {
                let route = if i == 0 { String::new() } else { format!("p{}", i) };
                (route, format!(r#"<a href="/p{}">next</a>"#, i + 1))
            })
            .collect();
        let borrowed: Vec<(&str, &str)> = pages
            .iter()
            .map(|(r, h)| (r.as_str(), h.as_str()))
            .collect();

        let port = StubPort::new(&borrowed);
        let mut options = Options::for_test(dir.path());
        options.max_routes = 3;

        let err = Renderer::new(options, port.clone(), Logger::new(false))
            .run(None)
            .await
            .unwrap_err();

        assert!(matches!(err, SnapError::RouteLimit(3)));
        assert_eq!(port.calls().len(), 3);
    }

    #[tokio::test]
    async fn test_nested_routes_write_nested_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let port = StubPort::new(&[("", r#"<a href="/blog/post-1">Post</a>"#)]);

        renderer_in(dir.path(), port).run(None).await.unwrap();

        assert!(snapshot_exists(dir.path(), "blog/post-1.html").await);
    }
}
