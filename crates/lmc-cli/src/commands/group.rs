//! Group command implementation

use anyhow::Result;
use lmc_core::resolve_group;
use serde::Serialize;

use crate::output::OutputFormat;

#[derive(Debug, Serialize)]
struct GroupReport<'a> {
    group: Option<String>,
    monikers: &'a [String],
}

/// Execute the group command
pub fn execute(monikers: &[String], format: OutputFormat) -> Result<()> {
    let report = GroupReport {
        group: resolve_group(monikers),
        monikers,
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        },
        OutputFormat::Text => match &report.group {
            Some(group) => println!("{group}"),
            None => println!("(no group: moniker list is empty)"),
        },
    }
    Ok(())
}
