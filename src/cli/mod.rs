pub mod commands;
pub mod context;
pub mod output;
pub mod render;
mod shell;

pub use context::{CliError, CliMode, CommandError};
pub use shell::{run_cli, SCRIPT_ENV};
