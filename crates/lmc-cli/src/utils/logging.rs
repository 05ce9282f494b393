//! Logging initialization and configuration.
//!
//! Sets up the tracing subscriber and color control from CLI flags and
//! environment variables.

use anyhow::Result;
use colored::control as color_control;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::{Cli, Commands};

/// Initialize the logging subsystem based on CLI flags.
///
/// Logs go to stderr. Info logs are suppressed when a command prints
/// machine-readable output to stdout, unless `--verbose` was given.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let machine_output = match &cli.command {
        Commands::Group { format, .. } | Commands::MetadataJobs { format, .. } => {
            format.is_machine()
        },
        Commands::Convert(args) => args.dry_run,
    };

    let level = log_level(cli.verbose, cli.quiet, machine_output);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    // Color control: disable when requested, NO_COLOR is set, or when emitting machine output
    let env_no_color = std::env::var("NO_COLOR").ok().is_some();
    if cli.no_color || env_no_color || machine_output {
        color_control::set_override(false);
    }
    Ok(())
}

const fn log_level(verbose: bool, quiet: bool, machine_output: bool) -> Level {
    if verbose {
        Level::DEBUG
    } else if quiet || machine_output {
        Level::ERROR
    } else {
        Level::WARN
    }
}
