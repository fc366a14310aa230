//! Lectern CLI - Command-line entry point
//!
//! Runs the entitlement-gated course media server.

mod commands;

use clap::Parser;

#[derive(Parser)]
#[command(name = "lectern")]
#[command(about = "Course media delivery server")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    commands::handle_command(cli.command).await
}
