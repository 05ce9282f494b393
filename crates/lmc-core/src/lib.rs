//! # lmc-core
//!
//! Core functionality for lmc - the legacy manifest converter.
//!
//! Given a docset whose documents have already been built and published, this
//! crate produces the single manifest that legacy downstream tooling reads to
//! locate and interpret every output.
//!
//! ## Architecture
//!
//! - **Types**: Published document facts and their version monikers
//! - **Classification**: Legacy type labels and per-document output slots
//! - **Groups**: Deterministic moniker-group identifiers with deduplication
//! - **Conversion**: Concurrent fan-out over all documents and envelope assembly
//! - **Sink**: JSON persistence of the assembled manifest
//! - **Configuration**: Docset settings and metadata job declarations
//!
//! ## Quick Start
//!
//! ```rust
//! use lmc_core::{ContentType, DocsetConfig, DocumentFacts, ManifestConverter, PublishedDocument};
//!
//! # async fn run() -> lmc_core::Result<()> {
//! let documents = vec![PublishedDocument::new(
//!     DocumentFacts {
//!         file_path: "docs/index.md".to_string(),
//!         content_type: ContentType::Page,
//!         is_schema_data: false,
//!         legacy_output_path: "index.json".to_string(),
//!         legacy_site_url: "index".to_string(),
//!         legacy_file_path: "docs/index.md".to_string(),
//!     },
//!     vec!["netcore-3.1".to_string()],
//! )];
//!
//! let converter = ManifestConverter::new(DocsetConfig::default());
//! let manifest = converter.convert(&documents).await?;
//!
//! assert_eq!(manifest.files.len(), 1);
//! assert!(manifest.groups.is_some());
//! # Ok(())
//! # }
//! ```

/// Legacy type labels and output slot classification
pub mod classify;
/// Docset and metadata job configuration
pub mod config;
/// Concurrent manifest conversion
pub mod convert;
/// Error types and result aliases
pub mod error;
/// Moniker group resolution
pub mod group;
/// Manifest envelope and record types
pub mod manifest;
/// Manifest persistence
pub mod sink;
/// Published document input types
pub mod types;

pub use classify::{OutputDescriptor, OutputFile, classify_outputs, type_labels};
pub use config::{DocsetConfig, MetadataJobConfig, MetadataJobItem};
pub use convert::{ConvertOptions, ManifestConverter, ProgressCallback};
pub use error::{Error, Result};
pub use group::{GroupTable, resolve_group};
pub use manifest::{
    DefaultVersionInfo, LegacyManifest, MANIFEST_FILE_NAME, ManifestGroup, ManifestRecord,
    ManifestStats, VersionInfo,
};
pub use sink::{JsonFileSink, JsonSink, MemorySink, write_manifest};
pub use types::{ContentType, DocumentFacts, PublishSnapshot, PublishedDocument, VersionSet};
