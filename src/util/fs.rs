//! Filesystem utilities.

use std::path::{Path, PathBuf};

/// Make a path absolute without resolving symlinks.
/// Returns the path as-is if the current directory cannot be read.
pub fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

/// The directory a path stands for: itself if it is a directory, otherwise its parent.
///
/// Returns `None` when neither is an existing directory.
pub fn containing_directory(path: &Path) -> Option<PathBuf> {
    let path = absolute_path(path);
    if path.is_dir() {
        return Some(path);
    }
    path.parent()
        .filter(|parent| parent.is_dir())
        .map(Path::to_path_buf)
}
