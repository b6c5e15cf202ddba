//! CLI module for vidhub
//!
//! Provides the command-line interface:
//! - serve: load configuration and run the API server

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{run, serve};
pub use errors::{CliError, CliResult};
