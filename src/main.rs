mod cli;
mod config;
mod db;
mod error;
mod models;

use clap::Parser;
use cli::{App, Cli};
use colored::*;
use error::Result;
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();

    // Initialize logging; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Command execution failed: {:?}", e);
            eprintln!("{} {}", "Error:".red(), e.to_string().red());
            ExitCode::FAILURE
        },
    }
}

/// Resolves the command before touching the config file or the database.
async fn run(cli: Cli) -> Result<()> {
    let command = cli.into_command()?;
    debug!("Parsed command {:?}", command);

    let mut app = App::new()?;
    app.run(command).await
}
