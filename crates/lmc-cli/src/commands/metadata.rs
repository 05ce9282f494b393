//! Metadata jobs command implementation

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use lmc_core::MetadataJobConfig;

use crate::output::OutputFormat;

/// Execute the metadata-jobs command
pub fn execute(file: &Path, format: OutputFormat) -> Result<()> {
    let config = MetadataJobConfig::load(file)
        .with_context(|| format!("Failed to load metadata config {}", file.display()))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        },
        OutputFormat::Text => print_text(&config),
    }
    Ok(())
}

fn print_text(config: &MetadataJobConfig) {
    if config.metadata.is_empty() {
        println!("No metadata jobs declared");
        return;
    }

    println!("Base directory: {}", config.base_directory.display());
    for (item, dest) in config.metadata.iter().zip(config.resolved_destinations()) {
        let mut flags = Vec::new();
        if item.force {
            flags.push("force");
        }
        if item.raw {
            flags.push("raw");
        }
        let flags = if flags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", flags.join(", "))
        };
        println!(
            "  {} -> {}{}",
            item.src.join(", "),
            dest.display().to_string().bold(),
            flags.dimmed()
        );
    }
}
