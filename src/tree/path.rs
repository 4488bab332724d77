//! Path canonicalization and entry naming utilities

use crate::error::StorageError;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};

/// Canonicalize a path, resolving symlinks, `.` and `..`
///
/// Used as the identity of a directory when checking for symlink cycles.
pub fn canonicalize_path(path: &Path) -> Result<PathBuf, StorageError> {
    // Use dunce for cross-platform canonicalization
    dunce::canonicalize(path).map_err(|e| StorageError::io_at(path, "canonicalize", e))
}

/// Name the root node of a tree read from `path`
///
/// Takes the last normal component of the lexically normalized path (`foo/bar/` → `bar`).
/// Paths ending in `.` or `..` are canonicalized first so they still get a real name.
pub fn root_name(path: &Path) -> Result<String, StorageError> {
    let last = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .last();

    match last {
        Some(Component::Normal(name)) => entry_name(name, path),
        Some(Component::ParentDir) | None => {
            let canonical = canonicalize_path(path)?;
            match canonical.file_name() {
                Some(name) => entry_name(name, &canonical),
                None => Err(StorageError::InvalidPath(format!(
                    "{:?} has no name to use as the tree root",
                    path
                ))),
            }
        }
        Some(_) => Err(StorageError::InvalidPath(format!(
            "{:?} has no name to use as the tree root",
            path
        ))),
    }
}

/// Convert a directory entry name to UTF-8, rejecting names that would not survive the trip
pub fn entry_name(name: &OsStr, path: &Path) -> Result<String, StorageError> {
    name.to_str().map(str::to_string).ok_or_else(|| {
        StorageError::InvalidPath(format!("{:?} is not valid UTF-8", path))
    })
}
