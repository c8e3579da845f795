// src/host/service.rs
// =============================================================================
// This file implements the static host service with axum.
//
// Startup (spawned the moment the service is constructed):
// 1. Read {working_dir}/{dist}/index.html into memory - if it's missing
//    there is no app to serve, and the run aborts with a bind error
// 2. Bind 127.0.0.1:{port} - a busy port also aborts before any crawling
// 3. Serve: dotted paths from disk, everything else from the in-memory
//    index (SPA fallback)
//
// Shutdown is graceful and awaited: close() triggers the shutdown signal
// and then waits for the serve task to finish, so the listener is really
// gone when the lifecycle coordinator moves on.
//
// Rust concepts:
// - axum extractors: State and Uri are pulled out of the request by type
// - oneshot channels: a single-use signal, perfect for "please shut down"
// =============================================================================

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};
use tokio::task::JoinHandle;

use crate::error::SnapError;
use crate::lifecycle::{spawn_ready, Ready, Service};
use crate::logger::Logger;
use crate::options::Options;

/// Serves the built app while the browser renders it
pub struct HostService {
    ready: Ready<HostHandle>,
}

// The initialized resource behind the readiness future: the bound
// address plus what close() needs to tear the server down
#[derive(Debug)]
struct HostHandle {
    addr: SocketAddr,
    shutdown: Mutex<Option<oneshot::Sender<()>>>,
    serve_task: Mutex<Option<JoinHandle<()>>>,
}

// Shared with every request handler invocation
struct HostState {
    app_root: PathBuf,
    index: String,
}

impl HostService {
    /// Constructing the service immediately kicks off startup on a
    /// background task; await readiness through the lifecycle coordinator
    pub fn new(options: &Options, logger: Logger) -> Self {
        HostService {
            ready: spawn_ready(start_host(options.clone(), logger)),
        }
    }

    /// The address actually bound (useful when the port was 0 in tests)
    #[cfg(test)]
    pub async fn local_addr(&self) -> Result<SocketAddr, SnapError> {
        Ok(self.ready.clone().await?.addr)
    }
}

#[async_trait]
impl Service for HostService {
    fn name(&self) -> &'static str {
        "static host"
    }

    async fn ready(&self) -> Result<(), SnapError> {
        self.ready.clone().await.map(|_| ())
    }

    async fn close(&self) -> Result<(), SnapError> {
        let handle = self.ready.clone().await?;

        // Taking the sender makes a second close() a no-op
        if let Some(shutdown) = handle.shutdown.lock().await.take() {
            let _ = shutdown.send(());
        }

        let serve_task = handle.serve_task.lock().await.take();
        if let Some(task) = serve_task {
            task.await
                .map_err(|e| SnapError::Setup(format!("static host task failed: {}", e)))?;
        }

        Ok(())
    }
}

// Reads the index page, binds the listener, and spawns the server
async fn start_host(options: Options, logger: Logger) -> Result<HostHandle, SnapError> {
    let index_file = options.index_file();
    let index = tokio::fs::read_to_string(&index_file).await.map_err(|e| {
        SnapError::Bind(format!("could not read {}: {}", index_file.display(), e))
    })?;

    let state = Arc::new(HostState {
        app_root: options.app_root(),
        index,
    });
    let router = Router::new().fallback(serve_app).with_state(state);

    let listener = TcpListener::bind(("127.0.0.1", options.port))
        .await
        .map_err(|e| SnapError::Bind(format!("could not bind port {}: {}", options.port, e)))?;
    let addr = listener
        .local_addr()
        .map_err(|e| SnapError::Bind(e.to_string()))?;

    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let serve_task = tokio::spawn(async move {
        let server = axum::serve(listener, router).with_graceful_shutdown(async {
            // Shutting down because the sender was dropped is fine too
            let _ = shutdown_rx.await;
        });

        if let Err(err) = server.await {
            eprintln!("⚠️  Warning: static host stopped with an error: {}", err);
        }
    });

    logger.setup(&format!("Static host now serving app at {}!", options.host));

    Ok(HostHandle {
        addr,
        shutdown: Mutex::new(Some(shutdown_tx)),
        serve_task: Mutex::new(Some(serve_task)),
    })
}

// The single request handler: static file or SPA fallback
async fn serve_app(State(state): State<Arc<HostState>>, uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    if wants_static_file(path) {
        return serve_static_file(&state, path).await;
    }

    // Route-like path: hand out the app shell and let the client-side
    // router figure the rest out
    Html(state.index.clone()).into_response()
}

// Mirror of the classic `*.*` rule: the request is for a file on disk
// when its last path segment has an extension. Paths trying to climb out
// of the dist directory are never files we serve.
fn wants_static_file(path: &str) -> bool {
    if path.split('/').any(|segment| segment == "..") {
        return false;
    }

    path.rsplit('/').next().is_some_and(|last| last.contains('.'))
}

async fn serve_static_file(state: &HostState, path: &str) -> Response {
    let file = state.app_root.join(path);

    match tokio::fs::read(&file).await {
        Ok(bytes) => {
            let mime = mime_guess::from_path(&file).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.to_string())], bytes).into_response()
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}
