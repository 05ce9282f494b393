//! lmc CLI - legacy manifest converter
//!
//! Entry point for the `lmc` command-line interface. Command
//! implementations live in [`commands`], one module per subcommand.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    utils::logging::initialize_logging(&cli)?;

    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Convert(args) => {
            commands::convert(args, cli.config.as_deref(), cli.quiet).await?;
        },
        Commands::Group { monikers, format } => {
            commands::show_group(&monikers, format)?;
        },
        Commands::MetadataJobs { file, format } => {
            commands::list_metadata_jobs(&file, format)?;
        },
    }
    Ok(())
}
