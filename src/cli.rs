//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to the pack/unpack API.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, OutputFormat};
pub use presentation::{
    format_pack_summary, format_tree_json, format_tree_text, format_write_summary,
};
pub use route::RunContext;
