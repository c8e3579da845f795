// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Build the application context (which starts the static host and the
//    headless browser in the background)
// 3. Wait at the readiness barrier, run the crawl, then tear the
//    services down - whether or not the crawl succeeded
// 4. Exit with proper code (0 = success, 1 = any failure)
//
// Rust concepts:
// - async/await: The host, the browser and the crawl all share one
//   cooperative runtime
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod browser;   // src/browser/ - headless Chromium rendering port
mod cli;       // src/cli.rs - command-line parsing
mod context;   // src/context.rs - composition root
mod error;     // src/error.rs - the SnapError taxonomy
mod host;      // src/host/ - static file host with SPA fallback
mod lifecycle; // src/lifecycle/ - readiness barrier + teardown
mod logger;    // src/logger.rs - verbose-gated console output
mod options;   // src/options.rs - resolved run options
mod render;    // src/render/ - the crawl-and-render loop
mod scrape;    // src/scrape.rs - route extraction from rendered HTML
mod snapshot;  // src/snapshot.rs - snapshot path mapping + writing

use anyhow::{Context, Result};
use clap::Parser;

use cli::{Cli, Commands};
use logger::Logger;
use options::Options;

// The #[tokio::main] attribute transforms our async main into a real main
// function: it creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

// Returns:
//   Ok(0) = prerender complete
//   Ok(1) = prerender failed (already reported)
//   Err   = unexpected error outside the pipeline (e.g. no cwd)
async fn run() -> Result<i32> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            workingdir,
            dist,
            port,
            verbose,
            max_routes,
        } => {
            let working_dir = match workingdir {
                Some(dir) => dir,
                None => std::env::current_dir().context("could not resolve the current directory")?,
            };

            let options = Options::new(port, working_dir, dist, verbose, max_routes);
            handle_render(options).await
        }
    }
}

// Handles the 'render' subcommand: the full crawl over the hosted app
async fn handle_render(options: Options) -> Result<i32> {
    let logger = Logger::new(options.verbose);

    // Build the context; this already starts the host and the browser
    let ctx = context::context(options);

    // Barrier, crawl, teardown. A readiness failure (bad port, missing
    // dist) means not a single route is fetched; teardown runs either way
    match ctx.prerender().await {
        Ok(rendered) => {
            logger.complete(&format!(
                "Static prerendering complete! Rendered {} route(s).",
                rendered
            ));
            Ok(0)
        }
        Err(err) => {
            logger.error(&format!("Prerender failed: {}", err));
            Ok(1)
        }
    }
}
