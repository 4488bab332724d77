//! Pack/Unpack APIs
//!
//! Composes the tree and codec stages into the two directions of the tool:
//! filesystem → tree → literal → padded text → grid → image, and the reverse.

use crate::codec::image_store;
use crate::codec::literal::{self, LiteralParser, ParserConfig};
use crate::codec::padding;
use crate::codec::raster::{self, Grid};
use crate::error::ApiError;
use crate::tree::{Node, TreeReader, TreeWriter, WalkerConfig, WriteSummary};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument};

/// A tree encoded as a grid, not yet stored anywhere
#[derive(Debug)]
pub struct Packed {
    pub root: Node,
    /// Length of the literal before padding, in chars
    pub literal_len: usize,
    pub grid: Grid,
}

/// What `pack_to_image` produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackSummary {
    pub root: String,
    pub files: usize,
    pub directories: usize,
    pub literal_len: usize,
    pub padding: usize,
    pub side: usize,
}

impl From<&Packed> for PackSummary {
    fn from(packed: &Packed) -> Self {
        let (files, directories) = packed.root.counts();
        let side = packed.grid.side();
        Self {
            root: packed.root.name().to_string(),
            files,
            directories,
            literal_len: packed.literal_len,
            padding: side * side - packed.literal_len,
            side,
        }
    }
}

/// Read `path` and encode it as a grid
///
/// Every stage runs in memory; nothing is written.
#[instrument(skip_all, fields(path = %path.display()))]
pub fn pack(path: &Path, config: &WalkerConfig) -> Result<Packed, ApiError> {
    let root = TreeReader::with_config(config.clone()).read(path)?;
    let literal = literal::serialize(&root);
    let literal_len = literal.chars().count();
    debug!(literal_len, "Serialized tree");

    let grid = raster::encode(&padding::pad(&literal))?;
    debug!(side = grid.side(), "Encoded grid");
    Ok(Packed {
        root,
        literal_len,
        grid,
    })
}

/// Pack `path` into a PNG at `image`
///
/// The image is only written once encoding has fully succeeded.
pub fn pack_to_image(
    path: &Path,
    image: &Path,
    config: &WalkerConfig,
) -> Result<PackSummary, ApiError> {
    let start = Instant::now();
    let packed = pack(path, config)?;
    image_store::save(&packed.grid, image)?;

    let summary = PackSummary::from(&packed);
    info!(
        image = %image.display(),
        side = summary.side,
        files = summary.files,
        directories = summary.directories,
        duration_ms = start.elapsed().as_millis(),
        "Pack completed"
    );
    Ok(summary)
}

/// Decode a grid back into a tree
#[instrument(skip_all, fields(side = grid.side()))]
pub fn unpack(grid: &Grid, config: &ParserConfig) -> Result<Node, ApiError> {
    let literal = padding::unpad(&raster::decode(grid));
    debug!(literal_len = literal.chars().count(), "Decoded literal");
    Ok(LiteralParser::new(config).parse(&literal)?)
}

/// Decode the PNG at `image` without touching the filesystem otherwise
#[instrument(skip_all, fields(image = %image.display()))]
pub fn inspect_image(image: &Path, config: &ParserConfig) -> Result<Node, ApiError> {
    let grid = image_store::load(image)?;
    unpack(&grid, config)
}

/// Decode the PNG at `image` and recreate its tree under `dest`
pub fn unpack_image(
    image: &Path,
    dest: &Path,
    config: &ParserConfig,
) -> Result<WriteSummary, ApiError> {
    let start = Instant::now();
    let root = inspect_image(image, config)?;
    let summary = TreeWriter::new().write(&root, dest)?;
    info!(
        image = %image.display(),
        dest = %dest.display(),
        files = summary.files,
        directories = summary.directories,
        duration_ms = start.elapsed().as_millis(),
        "Unpack completed"
    );
    Ok(summary)
}
