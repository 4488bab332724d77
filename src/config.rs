//! Configuration System
//!
//! Layered configuration for the reader, parser, image output and logging.
//! Defaults, then the global file, then `./treepix.toml`, then `TREEPIX__*`
//! environment variables.

use crate::codec::ParserConfig;
use crate::logging::LoggingConfig;
use crate::tree::WalkerConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;
pub use sources::project_file::PROJECT_CONFIG_FILE;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TreepixConfig {
    /// Directory traversal settings
    #[serde(default)]
    pub reader: WalkerConfig,

    /// Literal parser limits
    #[serde(default)]
    pub parser: ParserConfig,

    /// Image output settings
    #[serde(default)]
    pub image: ImageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Image output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConfig {
    /// Image written by `pack` when no output is given
    #[serde(default = "default_output")]
    pub default_output: PathBuf,
}

fn default_output() -> PathBuf {
    PathBuf::from("image.png")
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            default_output: default_output(),
        }
    }
}

/// Literal nesting beyond the reader depth: the top-level map, the root map, and the file
/// records inside the deepest directory
pub const LITERAL_NESTING_OVERHEAD: usize = 3;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Reader(String),
    Parser(String),
    Image(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Reader(msg) => write!(f, "Reader: {}", msg),
            ValidationError::Parser(msg) => write!(f, "Parser: {}", msg),
            ValidationError::Image(msg) => write!(f, "Image: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl TreepixConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.reader.max_depth == 0 {
            errors.push(ValidationError::Reader(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.parser.max_nesting == 0 {
            errors.push(ValidationError::Parser(
                "max_nesting must be at least 1".to_string(),
            ));
        }
        if self.reader.max_depth > 0
            && self.parser.max_nesting > 0
            && self.reader.max_depth.saturating_add(LITERAL_NESTING_OVERHEAD)
                > self.parser.max_nesting
        {
            errors.push(ValidationError::Parser(format!(
                "max_nesting {} cannot parse trees packed with max_depth {} (needs at least {})",
                self.parser.max_nesting,
                self.reader.max_depth,
                self.reader.max_depth.saturating_add(LITERAL_NESTING_OVERHEAD)
            )));
        }
        if self.image.default_output.as_os_str().is_empty() {
            errors.push(ValidationError::Image(
                "default_output cannot be empty".to_string(),
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
