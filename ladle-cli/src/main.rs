//! Ladle CLI - Command-line interface
//!
//! Provides command-line access to the Ladle recipe server.

mod commands;

use clap::Parser;
use ladle_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "ladle")]
#[command(about = "An in-memory recipe API server")]
struct Cli {
    /// Console log verbosity
    #[arg(long, global = true, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.as_tracing_level(), None)?;
    commands::handle_command(cli.command).await?;

    Ok(())
}
