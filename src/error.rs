//! Error types for the treepix filesystem/image codec.

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem-related errors raised while reading or writing a tree
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Symbolic link cycle detected at {0:?}")]
    SymlinkCycle(PathBuf),

    #[error("Maximum directory depth {max_depth} exceeded at {path:?}")]
    DepthExceeded { path: PathBuf, max_depth: usize },

    #[error("File {name:?} is marked binary but its content is not valid base64: {source}")]
    InvalidBinaryContent {
        name: String,
        #[source]
        source: base64::DecodeError,
    },

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl StorageError {
    /// Wrap an I/O failure with the path it happened on.
    pub(crate) fn io_at(path: &std::path::Path, action: &str, err: std::io::Error) -> Self {
        StorageError::IoError(std::io::Error::new(
            err.kind(),
            format!("Failed to {} {:?}: {}", action, path, err),
        ))
    }
}

/// Errors raised while mapping text to a pixel grid and back
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("Text length {len} is not a perfect square")]
    NotPerfectSquare { len: usize },

    #[error("Raster is not square: {width}x{height}")]
    NotSquare { width: u32, height: u32 },

    #[error("Raster buffer holds {actual} pixels, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("Code point U+{code_point:04X} at index {index} does not fit in one byte")]
    OutOfRange { index: usize, code_point: u32 },

    #[error("Unsupported image colour type {0} (expected 8-bit grayscale)")]
    UnsupportedColor(String),

    #[error("Cannot store an empty raster")]
    Empty,

    #[error("Image container error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Image I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// What went wrong while parsing a tree literal
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEnd,

    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),

    #[error("unexpected token {0:?}")]
    UnexpectedToken(String),

    #[error("invalid escape sequence {0}")]
    InvalidEscape(String),

    #[error("unterminated string literal")]
    UnterminatedString,

    #[error("trailing input after literal")]
    TrailingInput,

    #[error("nesting deeper than {0} levels")]
    NestingTooDeep(usize),

    #[error("duplicate key {0:?}")]
    DuplicateKey(String),

    #[error("invalid entry name {0:?}")]
    InvalidName(String),

    #[error("binary content of {0:?} is not valid base64")]
    InvalidBase64(String),

    #[error("{0}")]
    Schema(String),
}

/// Literal text did not match the tree grammar
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at char {position}: {kind}")]
pub struct ParseError {
    /// Character offset into the literal where the problem was found
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }
}

/// Top-level errors surfaced by the pack/unpack API and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Raster error: {0}")]
    RasterError(#[from] RasterError),

    #[error("{0}")]
    ParseError(#[from] ParseError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Output rendering error: {0}")]
    OutputError(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
