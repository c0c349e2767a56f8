use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// List the immediate children of `dir` without descending.
///
/// Order is whatever the filesystem yields; it is stable within one call
/// but callers must not rely on it across platforms.
pub fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(false) {
        let entry =
            entry.with_context(|| format!("Failed to list directory {}", dir.display()))?;
        paths.push(entry.into_path());
    }
    Ok(paths)
}
