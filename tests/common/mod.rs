//! Shared utilities for integration testing.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// Create a routes directory holding the given files, each with its own
/// relative path as content.
pub fn routes_dir(files: &[&str]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for file in files {
        write_route(dir.path(), file);
    }
    dir
}

/// Add one route file under `root`.
pub fn write_route(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, relative).unwrap();
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
