//! Tree reader: builds a [`Node`] tree from a file or directory on disk

use crate::error::StorageError;
use crate::tree::node::{DirectoryNode, FileNode, Node};
use crate::tree::path;
use crate::tree::walker::{Entry, Walker, WalkerConfig};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace};

/// Reads a filesystem subtree into memory
pub struct TreeReader {
    config: WalkerConfig,
}

impl Default for TreeReader {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeReader {
    /// Create a reader with the default traversal settings
    pub fn new() -> Self {
        Self {
            config: WalkerConfig::default(),
        }
    }

    /// Create a reader with custom traversal settings
    pub fn with_config(config: WalkerConfig) -> Self {
        Self { config }
    }

    /// Read `path` into a tree rooted at its base name
    ///
    /// A plain file yields a single `File` node; a directory yields a `Directory` whose
    /// children follow the enumeration order of the filesystem.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read(&self, path: &Path) -> Result<Node, StorageError> {
        let start = Instant::now();
        info!("Starting tree read");

        let metadata = std::fs::metadata(path).map_err(|e| {
            error!("Cannot stat input path: {}", e);
            StorageError::io_at(path, "read", e)
        })?;
        let name = path::root_name(path)?;

        let node = if metadata.is_dir() {
            let mut ancestors = Vec::new();
            Node::Directory(self.read_directory(path, name, 0, &mut ancestors)?)
        } else if metadata.is_file() {
            Node::File(read_file(path, name)?)
        } else {
            return Err(StorageError::InvalidPath(format!(
                "{:?} is neither a regular file nor a directory",
                path
            )));
        };

        let (files, directories) = node.counts();
        info!(
            files,
            directories,
            duration_ms = start.elapsed().as_millis(),
            "Tree read completed"
        );
        Ok(node)
    }

    /// Read one directory level and recurse into subdirectories
    ///
    /// `ancestors` holds the canonical paths of every directory on the way down; meeting one
    /// again means a symlink loops back up the tree.
    fn read_directory(
        &self,
        dir_path: &Path,
        name: String,
        depth: usize,
        ancestors: &mut Vec<PathBuf>,
    ) -> Result<DirectoryNode, StorageError> {
        if depth > self.config.max_depth {
            return Err(StorageError::DepthExceeded {
                path: dir_path.to_path_buf(),
                max_depth: self.config.max_depth,
            });
        }

        let canonical = path::canonicalize_path(dir_path)?;
        if ancestors.contains(&canonical) {
            error!(path = %dir_path.display(), "Symbolic link cycle");
            return Err(StorageError::SymlinkCycle(dir_path.to_path_buf()));
        }
        ancestors.push(canonical);

        let entries = Walker::new(&self.config).list(dir_path)?;
        debug!(path = %dir_path.display(), entry_count = entries.len(), "Listed directory");

        let mut dir = DirectoryNode::new(name);
        for entry in entries {
            let child = match entry {
                Entry::File { name, path } => Node::File(read_file(&path, name)?),
                Entry::Directory { name, path } => {
                    Node::Directory(self.read_directory(&path, name, depth + 1, ancestors)?)
                }
            };
            dir.insert(child).map_err(|dup| {
                StorageError::InvalidPath(format!(
                    "duplicate entry {:?} in {:?}",
                    dup.name(),
                    dir_path
                ))
            })?;
        }

        ancestors.pop();
        Ok(dir)
    }
}

/// Read a file as UTF-8 text, falling back to base64 of the raw bytes
#[instrument(skip_all, fields(path = %file_path.display()))]
fn read_file(file_path: &Path, name: String) -> Result<FileNode, StorageError> {
    let bytes = std::fs::read(file_path).map_err(|e| {
        error!("Failed to read file: {}", e);
        StorageError::io_at(file_path, "read file", e)
    })?;

    match String::from_utf8(bytes) {
        Ok(text) => {
            trace!(len = text.len(), "Read text file");
            Ok(FileNode::text(name, text))
        }
        Err(e) => {
            let bytes = e.into_bytes();
            trace!(len = bytes.len(), "Read binary file");
            Ok(FileNode::binary(name, &bytes))
        }
    }
}
