//! Error types for lmc-core operations.
//!
//! Conversion is all-or-nothing: a failure while processing any single
//! document aborts the run, so every error here is terminal for the call that
//! produced it. Nothing in this crate retries.
//!
//! ## Error Categories
//!
//! - **Conversion**: a single document could not be turned into a manifest record
//! - **I/O**: reading snapshots and configs, writing the manifest
//! - **Config**: malformed or unreadable configuration files
//! - **Serialization**: JSON/TOML encoding and decoding
//! - **Storage**: committing the manifest to its destination
//!
//! ```rust
//! use lmc_core::Error;
//!
//! let err = Error::Conversion {
//!     file: "docs/broken.md".to_string(),
//!     reason: "legacy output path is empty".to_string(),
//! };
//! assert_eq!(err.category(), "conversion");
//! assert!(err.to_string().contains("docs/broken.md"));
//! ```

use thiserror::Error;

/// The main error type for lmc-core operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A document could not be converted into a manifest record.
    ///
    /// Carries the source-relative path of the offending document so the
    /// caller can report which input broke the run.
    #[error("Failed to convert '{file}': {reason}")]
    Conversion {
        /// Source-relative path of the document.
        file: String,
        /// What went wrong.
        reason: String,
    },

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or inaccessible.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The manifest could not be committed to its destination.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl Error {
    /// Build a conversion error for the given document.
    pub fn conversion(file: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Conversion {
            file: file.into(),
            reason: reason.into(),
        }
    }

    /// Source path of the document that triggered the failure, if known.
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        match self {
            Self::Conversion { file, .. } => Some(file),
            _ => None,
        }
    }

    /// Get the error category as a string identifier for logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Conversion { .. } => "conversion",
            Self::Io(_) => "io",
            Self::Config(_) => "config",
            Self::Serialization(_) => "serialization",
            Self::Storage(_) => "storage",
        }
    }
}

/// Convenience type alias for Results with our Error type.
pub type Result<T> = std::result::Result<T, Error>;
