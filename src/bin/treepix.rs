//! treepix CLI Binary
//!
//! Command-line interface for packing directory trees into PNG images.

use clap::Parser;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};
use treepix::cli::{Cli, RunContext};
use treepix::config::ConfigLoader;
use treepix::logging::{init_logging, LoggingConfig};

fn main() {
    let cli = Cli::parse();
    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    // Build logging config from CLI args, env vars, and config file
    let logging_config = build_logging_config(&cli, &project_root);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("treepix starting");

    let context = match RunContext::new(&project_root, cli.config.as_deref()) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", treepix::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", treepix::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args, environment, and config file
fn build_logging_config(cli: &Cli, project_root: &Path) -> LoggingConfig {
    // If --verbose is not set, disable logging
    if !cli.verbose {
        return LoggingConfig {
            level: "off".to_string(),
            ..LoggingConfig::default()
        };
    }

    // Config errors surface later through RunContext
    let mut config = match cli.config {
        Some(ref config_path) => ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
        None => ConfigLoader::load(project_root)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default(),
    };

    // Override with CLI arguments (highest priority)
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }

    config
}
