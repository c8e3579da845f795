// src/options.rs
// =============================================================================
// Resolved options for a prerender run.
//
// The CLI hands us raw, optional arguments; this struct holds the fully
// resolved values every component reads from:
// - where the built app lives on disk ({working_dir}/{dist_sub_dir})
// - where it is served while rendering (http://localhost:{port})
// - how chatty to be, and how many routes we'll crawl before giving up
//
// Rust concepts:
// - PathBuf vs &Path: PathBuf owns its data, like String vs &str
// - Methods on structs: impl blocks attach behavior to data
// =============================================================================

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Options {
    /// Port the static host listens on
    pub port: u16,
    /// Base URL the browser navigates to (derived from the port)
    pub host: String,
    /// Project working directory (defaults to the process cwd)
    pub working_dir: PathBuf,
    /// Subdirectory of working_dir holding the built app
    pub dist_sub_dir: String,
    /// Show service startup chatter
    pub verbose: bool,
    /// Safety bound: abort a crawl that renders more routes than this
    pub max_routes: usize,
}

impl Options {
    pub fn new(
        port: u16,
        working_dir: PathBuf,
        dist_sub_dir: String,
        verbose: bool,
        max_routes: usize,
    ) -> Self {
        Options {
            port,
            host: format!("http://localhost:{}", port),
            working_dir,
            dist_sub_dir,
            verbose,
            max_routes,
        }
    }

    /// Directory the built app lives in and snapshots are written to
    pub fn app_root(&self) -> PathBuf {
        self.working_dir.join(&self.dist_sub_dir)
    }

    /// URL the browser should visit for a route
    /// (the empty route maps to the host root)
    pub fn route_url(&self, route: &str) -> String {
        format!("{}/{}", self.host, route)
    }

    /// Path to the SPA fallback page the host serves from memory
    pub fn index_file(&self) -> PathBuf {
        self.app_root().join("index.html")
    }
}

impl Options {
    // A compact constructor for tests: everything rooted in `dir`,
    // port 0 so the OS picks a free one
    #[cfg(test)]
    pub fn for_test(dir: &std::path::Path) -> Self {
        Options::new(0, dir.to_path_buf(), "dist".to_string(), false, 1000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_root_joins_working_dir_and_dist() {
        let options = Options::new(4321, PathBuf::from("/tmp/site"), "dist".into(), false, 1000);
        assert_eq!(options.app_root(), PathBuf::from("/tmp/site/dist"));
    }

    #[test]
    fn test_route_url_for_root_and_nested_routes() {
        let options = Options::new(4321, PathBuf::from("."), "dist".into(), false, 1000);
        assert_eq!(options.route_url(""), "http://localhost:4321/");
        assert_eq!(options.route_url("blog/post-1"), "http://localhost:4321/blog/post-1");
    }
}
