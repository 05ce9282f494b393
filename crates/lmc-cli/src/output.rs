//! Output format selection.

use clap::ValueEnum;

/// Output format options supported by the CLI
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// Whether this format is meant for machines.
    pub const fn is_machine(self) -> bool {
        matches!(self, Self::Json)
    }
}
