//! Directory enumeration: lists the direct entries of one directory

use crate::error::StorageError;
use crate::tree::path;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Filesystem entry types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A regular file (or a symlink resolving to one)
    File { name: String, path: PathBuf },
    /// A directory (or a symlink resolving to one)
    Directory { name: String, path: PathBuf },
}

impl Entry {
    pub fn name(&self) -> &str {
        match self {
            Entry::File { name, .. } | Entry::Directory { name, .. } => name,
        }
    }
}

/// Traversal settings shared by the walker and the tree reader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalkerConfig {
    /// Follow symbolic links (cycles are detected by the reader)
    #[serde(default = "default_true")]
    pub follow_symlinks: bool,
    /// Entry names to skip (exact match)
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
    /// Maximum directory depth below the root
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Sort entries by file name instead of keeping enumeration order
    #[serde(default)]
    pub sort_entries: bool,
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> usize {
    256
}

impl Default for WalkerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: default_true(),
            ignore_patterns: Vec::new(),
            max_depth: default_max_depth(),
            sort_entries: false,
        }
    }
}

/// Single-level directory walker
pub struct Walker<'a> {
    config: &'a WalkerConfig,
}

impl<'a> Walker<'a> {
    pub fn new(config: &'a WalkerConfig) -> Self {
        Self { config }
    }

    /// List files and subdirectories directly inside `dir`
    ///
    /// Other entry kinds (sockets, devices, FIFOs, broken or unfollowed links) are skipped.
    pub fn list(&self, dir: &Path) -> Result<Vec<Entry>, StorageError> {
        let mut walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.config.follow_symlinks);
        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let mut entries = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    if let Some(link) = e.path().filter(|_| e.loop_ancestor().is_some()) {
                        return Err(StorageError::SymlinkCycle(link.to_path_buf()));
                    }
                    if let Some(broken) = e.path().filter(|p| is_symlink(p)) {
                        warn!(path = %broken.display(), "Skipping broken symbolic link");
                        continue;
                    }
                    return Err(StorageError::IoError(std::io::Error::new(
                        std::io::ErrorKind::Other,
                        format!("Failed to read directory {:?}: {}", dir, e),
                    )));
                }
            };

            let name = path::entry_name(entry.file_name(), entry.path())?;
            if self.should_ignore(&name) {
                debug!(name = %name, "Ignoring entry");
                continue;
            }

            let file_type = entry.file_type();
            let path = entry.into_path();
            if file_type.is_file() {
                entries.push(Entry::File { name, path });
            } else if file_type.is_dir() {
                entries.push(Entry::Directory { name, path });
            } else {
                debug!(path = %path.display(), "Skipping non-regular entry");
            }
        }

        Ok(entries)
    }

    fn should_ignore(&self, name: &str) -> bool {
        self.config.ignore_patterns.iter().any(|p| p == name)
    }
}

fn is_symlink(path: &Path) -> bool {
    std::fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false)
}
