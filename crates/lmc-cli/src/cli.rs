//! # CLI Structure and Argument Parsing
//!
//! `lmc` follows a command-subcommand pattern built on `clap` derive macros.
//!
//! ```bash
//! # Convert a publish snapshot into .manifest.json
//! lmc convert --snapshot publish.json --config docset.toml --output _site
//!
//! # Inspect the group id a moniker list hashes to
//! lmc group netcore-3.1 netcore-5.0 --format json
//!
//! # List declared metadata jobs
//! lmc metadata-jobs metadata.json
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::output::OutputFormat;

/// Main CLI structure for the `lmc` command
#[derive(Parser, Clone, Debug)]
#[command(name = "lmc")]
#[command(version)]
#[command(about = "lmc - convert published docsets into legacy build manifests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging output
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to the docset configuration (TOML). Also via `LMC_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "LMC_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands for the `lmc` CLI
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Convert a publish snapshot into a legacy manifest
    Convert(ConvertArgs),

    /// Print the group id for an ordered moniker list
    Group {
        /// Monikers, in publication order
        #[arg(value_name = "MONIKER")]
        monikers: Vec<String>,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// List the entries of a metadata job configuration
    MetadataJobs {
        /// Metadata job configuration (JSON)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Arguments for `lmc convert`
#[derive(Args, Clone, Debug)]
#[allow(clippy::struct_excessive_bools)]
pub struct ConvertArgs {
    /// Publish snapshot (JSON) listing every published document
    #[arg(short = 's', long, value_name = "FILE")]
    pub snapshot: PathBuf,

    /// Output root; the manifest lands at `<output>/<site_base_path>/.manifest.json`
    #[arg(short = 'o', long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,

    /// Maximum documents converted at once. Also via `LMC_CONCURRENCY`.
    #[arg(short = 'j', long, env = "LMC_CONCURRENCY")]
    pub concurrency: Option<usize>,

    /// Sort manifest records by source path
    #[arg(long)]
    pub sort: bool,

    /// Force resources to be copied into the output tree
    #[arg(long, conflicts_with = "link_resources")]
    pub copy_resources: bool,

    /// Link resources back to their source files instead of copying them
    #[arg(long)]
    pub link_resources: bool,

    /// Print the manifest to stdout instead of writing it
    #[arg(long)]
    pub dry_run: bool,
}

impl ConvertArgs {
    /// Copy policy override from the command line, if any.
    pub const fn copy_resources_override(&self) -> Option<bool> {
        if self.copy_resources {
            Some(true)
        } else if self.link_resources {
            Some(false)
        } else {
            None
        }
    }
}
