//! Legacy type labels and output slot classification.
//!
//! Both functions are pure: the same document facts and docset settings
//! always produce the same labels and the same output slots.
//!
//! ## Output slots
//!
//! | content type        | schema | Metadata | Resource | Toc | Page |
//! |---------------------|--------|----------|----------|-----|------|
//! | Page / Redirection  | no     | yes      |          |     | yes  |
//! | Page / Redirection  | yes    |          |          | yes |      |
//! | Resource            | no     | yes      | yes      |     |      |
//! | Resource            | yes    |          | yes      |     |      |
//! | `TableOfContents`   | no     | yes      |          | yes |      |
//! | `TableOfContents`   | yes    |          |          | yes |      |
//! | anything else       | any    |          |          |     |      |

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::types::{ContentType, DocumentFacts};
use crate::{DocsetConfig, Error, Result};

/// Suffix of the per-document metadata output.
pub const METADATA_SUFFIX: &str = ".mta.json";

/// Suffix of the raw page output.
pub const RAW_PAGE_SUFFIX: &str = ".raw.page.json";

/// Map a content type to its legacy `(original_type, type)` labels.
///
/// Unrecognized types map to empty labels rather than failing.
///
/// ```rust
/// use lmc_core::{ContentType, type_labels};
///
/// assert_eq!(type_labels(ContentType::Page), ("Conceptual", "Content"));
/// assert_eq!(type_labels(ContentType::Unknown), ("", ""));
/// ```
#[must_use]
pub const fn type_labels(content_type: ContentType) -> (&'static str, &'static str) {
    match content_type {
        ContentType::Page | ContentType::Redirection => ("Conceptual", "Content"),
        ContentType::Resource => ("Resource", "Resource"),
        ContentType::TableOfContents => ("Toc", "Toc"),
        ContentType::Unknown => ("", ""),
    }
}

/// A single output file of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputFile {
    /// Always `false` for outputs produced by this converter.
    pub is_raw_page: bool,
    /// Output path relative to the site base path.
    pub relative_path: String,
    /// Absolute path of the source file, for resources that were not copied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_to_path: Option<String>,
}

impl OutputFile {
    fn new(relative_path: String) -> Self {
        Self {
            is_raw_page: false,
            relative_path,
            link_to_path: None,
        }
    }

    fn linked(relative_path: String, link_to_path: String) -> Self {
        Self {
            link_to_path: Some(link_to_path),
            ..Self::new(relative_path)
        }
    }
}

/// The named output slots of a document. Absent slots are omitted when serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    /// Metadata sidecar.
    #[serde(
        rename = "MetadataOutput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub metadata: Option<OutputFile>,
    /// Resource payload.
    #[serde(
        rename = "ResourceOutput",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub resource: Option<OutputFile>,
    /// Table of contents.
    #[serde(rename = "TocOutput", default, skip_serializing_if = "Option::is_none")]
    pub toc: Option<OutputFile>,
    /// Rendered page.
    #[serde(rename = "PageOutput", default, skip_serializing_if = "Option::is_none")]
    pub page: Option<OutputFile>,
}

impl OutputDescriptor {
    /// Whether no slot is populated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.metadata.is_none()
            && self.resource.is_none()
            && self.toc.is_none()
            && self.page.is_none()
    }
}

/// Compute the output slots of a document.
///
/// Fails when the legacy output path is empty or absolute, or when the source
/// file of a linked resource cannot be resolved to an absolute path.
///
/// ```rust
/// use lmc_core::{ContentType, DocsetConfig, DocumentFacts, classify_outputs};
///
/// let facts = DocumentFacts {
///     file_path: "a/b.md".to_string(),
///     content_type: ContentType::Page,
///     is_schema_data: false,
///     legacy_output_path: "a/b.json".to_string(),
///     legacy_site_url: "a/b".to_string(),
///     legacy_file_path: "a/b.md".to_string(),
/// };
///
/// let outputs = classify_outputs(&facts, &DocsetConfig::default())?;
/// assert_eq!(outputs.page.map(|p| p.relative_path), Some("a/b.raw.page.json".to_string()));
/// # Ok::<(), lmc_core::Error>(())
/// ```
pub fn classify_outputs(facts: &DocumentFacts, docset: &DocsetConfig) -> Result<OutputDescriptor> {
    let content_type = facts.content_type;
    if content_type == ContentType::Unknown {
        return Ok(OutputDescriptor::default());
    }

    let output_path = normalize_output_path(facts)?;
    let schema = facts.is_schema_data;
    let page_like = content_type.is_page_like();

    let metadata = (!schema).then(|| {
        let path = if content_type == ContentType::Resource {
            format!("{output_path}{METADATA_SUFFIX}")
        } else {
            change_extension(&output_path, METADATA_SUFFIX)
        };
        OutputFile::new(path)
    });

    let resource = if content_type == ContentType::Resource {
        Some(if docset.copy_resources {
            OutputFile::new(output_path.clone())
        } else {
            OutputFile::linked(output_path.clone(), source_link(facts, docset)?)
        })
    } else {
        None
    };

    let toc = (content_type == ContentType::TableOfContents || (page_like && schema))
        .then(|| OutputFile::new(output_path.clone()));

    let page = (page_like && !schema)
        .then(|| OutputFile::new(change_extension(&output_path, RAW_PAGE_SUFFIX)));

    Ok(OutputDescriptor {
        metadata,
        resource,
        toc,
        page,
    })
}

fn normalize_output_path(facts: &DocumentFacts) -> Result<String> {
    let path = facts.legacy_output_path.replace('\\', "/");
    if path.trim().is_empty() {
        return Err(Error::conversion(
            &facts.file_path,
            "legacy output path is empty",
        ));
    }
    if path.starts_with('/') || Path::new(&facts.legacy_output_path).is_absolute() {
        return Err(Error::conversion(
            &facts.file_path,
            format!("legacy output path '{path}' is not relative"),
        ));
    }
    Ok(path)
}

fn source_link(facts: &DocumentFacts, docset: &DocsetConfig) -> Result<String> {
    let joined = docset.docset_path.join(&facts.file_path);
    let absolute = std::path::absolute(&joined).map_err(|e| {
        Error::conversion(
            &facts.file_path,
            format!("cannot resolve source path {}: {e}", joined.display()),
        )
    })?;
    Ok(absolute.to_string_lossy().replace('\\', "/"))
}

/// Replace the extension of the last path segment with `suffix`.
///
/// The extension starts at the last `.` of the final segment; segments without
/// one get `suffix` appended.
fn change_extension(path: &str, suffix: &str) -> String {
    let segment_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[segment_start..].rfind('.') {
        Some(dot) => format!("{}{suffix}", &path[..segment_start + dot]),
        None => format!("{path}{suffix}"),
    }
}
