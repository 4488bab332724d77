//! CLI route: single route table and run context. Dispatches to the pipeline API and presentation.

use crate::api;
use crate::cli::help::command_name;
use crate::cli::parse::{Commands, OutputFormat};
use crate::cli::presentation::{
    format_pack_summary, format_tree_json, format_tree_text, format_write_summary,
};
use crate::config::{ConfigLoader, TreepixConfig};
use crate::error::ApiError;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{error, info};

/// Runtime context for CLI execution: the merged configuration.
pub struct RunContext {
    config: TreepixConfig,
}

impl RunContext {
    /// Load configuration for `project_root`, or from `config_path` alone when given.
    pub fn new(project_root: &Path, config_path: Option<&Path>) -> Result<Self, ApiError> {
        let config = match config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(project_root)?,
        };
        Self::with_config(config)
    }

    /// Create a run context from an already built configuration.
    pub fn with_config(config: TreepixConfig) -> Result<Self, ApiError> {
        config.validate().map_err(|errors| {
            let error_msgs: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            ApiError::ConfigError(format!(
                "Configuration validation failed: {}",
                error_msgs.join("; ")
            ))
        })?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &TreepixConfig {
        &self.config
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let started = Instant::now();
        let result = self.execute_inner(command);
        let duration_ms = started.elapsed().as_millis();
        match &result {
            Ok(_) => info!(command = command_name(command), duration_ms, "Command finished"),
            Err(e) => error!(command = command_name(command), duration_ms, error = %e, "Command failed"),
        }
        result
    }

    fn execute_inner(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Pack {
                path,
                output,
                format,
            } => {
                let image = self.output_path(output.as_ref());
                let summary = api::pack_to_image(path, &image, &self.config.reader)?;
                format_pack_summary(&summary, &image, *format == OutputFormat::Json)
            }
            Commands::Unpack {
                image,
                dest,
                format,
            } => {
                let summary = api::unpack_image(image, dest, &self.config.parser)?;
                format_write_summary(&summary, dest, *format == OutputFormat::Json)
            }
            Commands::Inspect { image, format } => {
                let root = api::inspect_image(image, &self.config.parser)?;
                match format {
                    OutputFormat::Text => format_tree_text(&root),
                    OutputFormat::Json => format_tree_json(&root),
                }
            }
        }
    }

    fn output_path(&self, output: Option<&PathBuf>) -> PathBuf {
        output
            .cloned()
            .unwrap_or_else(|| self.config.image.default_output.clone())
    }
}
