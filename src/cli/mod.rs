//! yarnlink CLI - link and inspect compiled dialogue units

pub mod commands;

use clap::Parser;
use commands::Commands;

#[derive(Parser)]
#[command(name = "yarnlink")]
#[command(about = "yarnlink: link compiled dialogue units and line tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Run the yarnlink CLI
pub fn run_cli() -> anyhow::Result<()> {
    // Setup logging
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    cli.command.execute()?;

    Ok(())
}
