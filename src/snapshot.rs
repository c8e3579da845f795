// src/snapshot.rs
// =============================================================================
// This module persists rendered markup to disk.
//
// The mapping from route to file is fixed:
// - ""            -> {app_root}/index.html
// - "about"       -> {app_root}/about.html
// - "blog/post-1" -> {app_root}/blog/post-1.html   (directories created)
//
// Writes overwrite unconditionally - re-running a prerender replaces the
// previous snapshots. There is no atomic-write guarantee: a crash mid-write
// leaves a truncated file, which the next run repairs.
//
// Rust concepts:
// - tokio::fs: async filesystem calls that don't block the runtime
// - Path::parent(): walking up a path without string slicing
// =============================================================================

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::SnapError;

// Computes the snapshot file path for a route
//
// The empty route is the site root and maps to "index", every other
// route keeps its path segments as directory segments
pub fn route_file_path(app_root: &Path, route: &str) -> PathBuf {
    let name = if route.is_empty() { "index" } else { route };
    app_root.join(format!("{}.html", name))
}

// Writes rendered markup to a file, creating missing parent directories
//
// The existence check mirrors the "create only when missing" shape of the
// rest of the pipeline; create_dir_all is used so nested routes like
// "blog/2024/post" get their whole directory chain in one go
pub async fn write_and_mkdir(path: &Path, content: &str) -> Result<(), SnapError> {
    if let Some(dir) = path.parent() {
        let dir_exists = fs::try_exists(dir)
            .await
            .map_err(|e| SnapError::filesystem(dir, e))?;

        if !dir_exists {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| SnapError::filesystem(dir, e))?;
        }
    }

    fs::write(path, content)
        .await
        .map_err(|e| SnapError::filesystem(path, e))
}
