//! Manifest envelope and record types.
//!
//! Field names follow the legacy consumer's format exactly: the envelope uses
//! `snake_case` keys while per-file records use `PascalCase`.

use serde::{Deserialize, Serialize};

use crate::classify::OutputDescriptor;
use crate::types::VersionSet;

/// File name of the persisted manifest, beneath the site base path.
pub const MANIFEST_FILE_NAME: &str = ".manifest.json";

/// Cross-reference map name advertised by the default version block.
const DEFAULT_XREF_MAP: &str = "xrefmap.yml";

/// Manifest entry for a single published document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ManifestRecord {
    /// Site URL relative to the site base path.
    pub site_url_relative_to_site_base_path: String,
    /// Source file path relative to the docset root.
    pub file_path: String,
    /// Source file path relative to the source base path.
    pub file_path_relative_to_source_base_path: String,
    /// Legacy original-type label.
    pub original_type: String,
    /// Legacy type label.
    #[serde(rename = "Type")]
    pub type_label: String,
    /// Output slots.
    pub output: OutputDescriptor,
    /// Legacy consumers skip normalization for this entry.
    pub skip_normalization: bool,
    /// Legacy consumers skip schema checks for this entry.
    pub skip_schema_check: bool,
    /// Moniker group identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// A moniker group listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestGroup {
    /// Group identifier.
    pub group: String,
    /// Monikers in the order they were hashed.
    pub monikers: VersionSet,
}

/// Constant default version block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultVersionInfo {
    /// Version name (always empty).
    pub name: String,
    /// Version folder (always empty).
    pub version_folder: String,
    /// Cross-reference map file name.
    pub xref_map: String,
}

impl Default for DefaultVersionInfo {
    fn default() -> Self {
        Self {
            name: String::new(),
            version_folder: String::new(),
            xref_map: DEFAULT_XREF_MAP.to_string(),
        }
    }
}

/// Reserved version block; serialized as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {}

/// The assembled manifest envelope.
///
/// ```rust
/// use lmc_core::LegacyManifest;
///
/// let manifest = LegacyManifest::new(Vec::new(), Vec::new(), ".".to_string());
/// let json = serde_json::to_value(&manifest)?;
///
/// assert!(json.get("groups").is_none());
/// assert_eq!(json["is_already_processed"], true);
/// assert_eq!(json["default_version_info"]["xref_map"], "xrefmap.yml");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyManifest {
    /// Moniker groups; omitted when no document has monikers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<ManifestGroup>>,
    /// Constant default version block.
    pub default_version_info: DefaultVersionInfo,
    /// One record per published document.
    pub files: Vec<ManifestRecord>,
    /// Always `true`.
    pub is_already_processed: bool,
    /// Source base path from the docset configuration.
    pub source_base_path: String,
    /// Reserved.
    pub version_info: VersionInfo,
}

impl LegacyManifest {
    /// Assemble an envelope from records and discovered groups.
    ///
    /// An empty group list is dropped so the `groups` key is omitted.
    #[must_use]
    pub fn new(
        groups: Vec<ManifestGroup>,
        files: Vec<ManifestRecord>,
        source_base_path: String,
    ) -> Self {
        Self {
            groups: (!groups.is_empty()).then_some(groups),
            default_version_info: DefaultVersionInfo::default(),
            files,
            is_already_processed: true,
            source_base_path,
            version_info: VersionInfo::default(),
        }
    }

    /// Sort records by source file path.
    pub fn sort_files(&mut self) {
        self.files.sort_by(|a, b| a.file_path.cmp(&b.file_path));
    }

    /// Summary counts over the records.
    #[must_use]
    pub fn stats(&self) -> ManifestStats {
        let mut stats = ManifestStats {
            total_files: self.files.len(),
            groups: self.groups.as_ref().map_or(0, Vec::len),
            ..ManifestStats::default()
        };
        for record in &self.files {
            match record.type_label.as_str() {
                "Content" => stats.content += 1,
                "Resource" => stats.resources += 1,
                "Toc" => stats.tocs += 1,
                _ => stats.unclassified += 1,
            }
            if record.group.is_some() {
                stats.grouped_files += 1;
            }
        }
        stats
    }
}

/// Summary counts of a manifest, used for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestStats {
    /// Records in the manifest.
    pub total_files: usize,
    /// Pages and redirections.
    pub content: usize,
    /// Resources.
    pub resources: usize,
    /// Tables of contents.
    pub tocs: usize,
    /// Records with an unrecognized content type.
    pub unclassified: usize,
    /// Records carrying a group id.
    pub grouped_files: usize,
    /// Distinct groups.
    pub groups: usize,
}
