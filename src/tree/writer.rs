//! Tree writer: materializes a [`Node`] tree under a base directory
//!
//! Writing is not transactional. A failure partway through leaves whatever was already
//! created on disk.

use crate::error::StorageError;
use crate::tree::node::{is_valid_name, DirectoryNode, FileNode, Node};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, error, info, instrument, trace};

/// Counts of what a write produced
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WriteSummary {
    pub files: usize,
    pub directories: usize,
    pub bytes: u64,
}

/// Writes trees to disk
#[derive(Debug, Default)]
pub struct TreeWriter;

impl TreeWriter {
    pub fn new() -> Self {
        Self
    }

    /// Recreate `node` beneath `base_path`, so the root ends up at `base_path/<root name>`
    ///
    /// `base_path` must already be a directory.
    #[instrument(skip_all, fields(base = %base_path.display(), root = %node.name()))]
    pub fn write(&self, node: &Node, base_path: &Path) -> Result<WriteSummary, StorageError> {
        let start = Instant::now();
        info!("Starting tree write");

        if !base_path.is_dir() {
            error!("Destination is not an existing directory");
            return Err(StorageError::io_at(
                base_path,
                "write into",
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "destination directory does not exist",
                ),
            ));
        }

        let mut summary = WriteSummary::default();
        if let Err(e) = write_node(node, base_path, &mut summary) {
            error!(
                files = summary.files,
                directories = summary.directories,
                "Tree write failed partway: {}",
                e
            );
            return Err(e);
        }

        info!(
            files = summary.files,
            directories = summary.directories,
            bytes = summary.bytes,
            duration_ms = start.elapsed().as_millis(),
            "Tree write completed"
        );
        Ok(summary)
    }
}

fn write_node(node: &Node, parent: &Path, summary: &mut WriteSummary) -> Result<(), StorageError> {
    let path = child_path(parent, node.name())?;
    match node {
        Node::Directory(dir) => write_directory(dir, &path, summary),
        Node::File(file) => write_file(file, &path, summary),
    }
}

fn write_directory(
    dir: &DirectoryNode,
    path: &Path,
    summary: &mut WriteSummary,
) -> Result<(), StorageError> {
    std::fs::create_dir_all(path).map_err(|e| StorageError::io_at(path, "create directory", e))?;
    debug!(path = %path.display(), children = dir.children().len(), "Created directory");
    summary.directories += 1;

    for child in dir.children() {
        write_node(child, path, summary)?;
    }
    Ok(())
}

fn write_file(file: &FileNode, path: &Path, summary: &mut WriteSummary) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| StorageError::io_at(parent, "create directory", e))?;
    }

    let bytes = file.to_bytes()?;
    std::fs::write(path, &bytes).map_err(|e| StorageError::io_at(path, "write file", e))?;
    trace!(path = %path.display(), len = bytes.len(), binary = file.is_binary(), "Wrote file");

    summary.files += 1;
    summary.bytes += bytes.len() as u64;
    Ok(())
}

/// Join a validated entry name onto `parent`
fn child_path(parent: &Path, name: &str) -> Result<PathBuf, StorageError> {
    if !is_valid_name(name) {
        return Err(StorageError::InvalidPath(format!(
            "refusing to write entry named {:?}",
            name
        )));
    }
    Ok(parent.join(name))
}
