// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// clap is a popular Rust library for parsing command-line arguments.
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// There is exactly one subcommand: `render` (alias `r`), which hosts the
// built app, crawls it with a headless browser, and writes one static
// HTML file per discovered route.
// =============================================================================

use std::path::PathBuf;

use clap::{Parser, Subcommand};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
// The #[command(...)] attributes configure how the CLI behaves
#[derive(Parser, Debug)]
#[command(
    name = "static-snap",
    version = "0.1.0",
    about = "Prerender a client-rendered web app into static HTML snapshots",
    long_about = "static-snap hosts your built app locally, renders every reachable route in \
                  headless Chromium, and writes the rendered markup back into the dist \
                  directory - one .html file per route, ready for any static file server."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Statically prerender the application
    ///
    /// Example: static-snap render -w ./my-app -d dist -p 4321
    #[command(alias = "r")]
    Render {
        /// Working directory for the project (default: current directory)
        #[arg(short = 'w', long)]
        workingdir: Option<PathBuf>,

        /// Distribution subdirectory holding the built app
        #[arg(short = 'd', long, default_value = "dist")]
        dist: String,

        /// Port to serve the app on while rendering
        #[arg(short = 'p', long, default_value_t = 4321)]
        port: u16,

        /// Show service startup chatter
        #[arg(long)]
        verbose: bool,

        /// Abort a crawl that renders more routes than this
        ///
        /// A page whose links differ between renders can keep a crawl
        /// alive forever; this bound turns that into a clean error
        #[arg(long, default_value_t = 1000)]
        max_routes: usize,
    },
}
