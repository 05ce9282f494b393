//! Published document facts consumed by the converter.
//!
//! These types describe documents that have already been built: their output
//! locations are computed upstream and are only read here.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Ordered list of version monikers attached to a document.
///
/// Order is significant: it feeds the group hash, so it must be preserved
/// from the snapshot through to the manifest.
pub type VersionSet = Vec<String>;

/// Content classification of a published document.
///
/// Tags that are not recognized deserialize to [`ContentType::Unknown`],
/// which the classifiers map to empty labels and no outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    /// Conceptual page content.
    Page,
    /// A redirect to another document.
    Redirection,
    /// Static resource (image, archive, ...).
    Resource,
    /// Table of contents.
    TableOfContents,
    /// Anything else.
    #[serde(other)]
    Unknown,
}

impl ContentType {
    /// Whether this type renders as a page (pages and redirections).
    #[must_use]
    pub const fn is_page_like(self) -> bool {
        matches!(self, Self::Page | Self::Redirection)
    }
}

/// Facts about a single published document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentFacts {
    /// Path of the source file, relative to the docset root.
    pub file_path: String,
    /// Content classification.
    pub content_type: ContentType,
    /// Whether the document is schema-backed data rather than free-form content.
    #[serde(default)]
    pub is_schema_data: bool,
    /// Output path relative to the site base path.
    pub legacy_output_path: String,
    /// Site URL relative to the site base path.
    pub legacy_site_url: String,
    /// Source path relative to the source base path.
    pub legacy_file_path: String,
}

/// A document together with the monikers it was published under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedDocument {
    /// Document facts.
    #[serde(flatten)]
    pub facts: DocumentFacts,
    /// Version monikers in publication order.
    #[serde(default)]
    pub monikers: VersionSet,
}

impl PublishedDocument {
    /// Pair document facts with their monikers.
    #[must_use]
    pub const fn new(facts: DocumentFacts, monikers: VersionSet) -> Self {
        Self { facts, monikers }
    }
}

/// Snapshot of every published document in a docset.
///
/// This is the serialized form of the document enumeration handed over by
/// the build.
///
/// ```json
/// {
///   "documents": [
///     {
///       "file_path": "docs/index.md",
///       "content_type": "Page",
///       "legacy_output_path": "index.json",
///       "legacy_site_url": "index",
///       "legacy_file_path": "docs/index.md",
///       "monikers": ["v1", "v2"]
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishSnapshot {
    /// Every published document.
    #[serde(default)]
    pub documents: Vec<PublishedDocument>,
}

impl PublishSnapshot {
    /// Load a snapshot from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read publish snapshot {}: {e}",
                path.display()
            ))
        })?;
        Self::from_json(&content)
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }
}
