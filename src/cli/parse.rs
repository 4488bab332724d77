//! CLI parse: clap types for treepix. No behavior; definitions only.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// treepix - store a directory tree inside a grayscale PNG
#[derive(Parser)]
#[command(name = "treepix")]
#[command(about = "Pack a directory tree into a square grayscale PNG and unpack it again")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (replaces the global and project config files)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Pack a file or directory into a PNG
    Pack {
        /// File or directory to pack
        path: PathBuf,
        /// Image to write (default from config: image.png)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Summary format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Recreate the tree stored in a PNG beneath a destination directory
    Unpack {
        /// Image produced by `pack`
        image: PathBuf,
        /// Existing directory to unpack into
        dest: PathBuf,
        /// Summary format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List the tree stored in a PNG without writing anything
    Inspect {
        /// Image produced by `pack`
        image: PathBuf,
        /// Listing format
        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,
    },
}

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
