//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::Commands;

/// Command name string used in log events (e.g. "pack", "inspect").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Pack { .. } => "pack",
        Commands::Unpack { .. } => "unpack",
        Commands::Inspect { .. } => "inspect",
    }
}
