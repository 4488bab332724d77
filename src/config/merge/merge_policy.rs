//! Merge rules: defaults, override order, conflict handling.

use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with merge policy defaults applied.
///
/// Only keys that later layers commonly override are seeded here; everything
/// else falls back to the serde defaults of each section.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("reader.follow_symlinks", true)?
        .set_default("reader.max_depth", 256_i64)?
        .set_default("reader.sort_entries", false)?
        .set_default("parser.max_nesting", 512_i64)?
        .set_default("image.default_output", "image.png")
}
