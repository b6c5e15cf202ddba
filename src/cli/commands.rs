//! CLI command dispatch

use std::path::Path;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use crate::config::AppConfig;
use crate::http::HttpServer;

/// Parse arguments and dispatch to the chosen command
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();

    match cli.command {
        Command::Serve { config, port } => serve(&config, port),
    }
}

/// Load configuration and run the server until shutdown
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config =
        AppConfig::load_or_default(config_path).map_err(|e| CliError::Config(e.to_string()))?;

    if let Some(port) = port {
        config.http.port = port;
    }

    let runtime = tokio::runtime::Runtime::new().map_err(|e| CliError::Server(e.to_string()))?;

    runtime.block_on(async {
        HttpServer::new(config)
            .start()
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    })
}
