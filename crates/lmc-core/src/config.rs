//! Configuration for the conversion stage.
//!
//! Two independent surfaces live here:
//!
//! - [`DocsetConfig`]: the docset settings the converter consumes (resource
//!   copy policy, site and source base paths). Stored as TOML.
//! - [`MetadataJobConfig`]: declarative metadata job entries (`src`, `dest`,
//!   `force`, `raw`) plus a base directory. Stored as JSON. The converter never
//!   reads it; it is loaded and validated for the jobs that run elsewhere.
//!
//! ## Example docset configuration
//!
//! ```toml
//! docset_path = "/repo/docs"
//! site_base_path = "dotnet"
//! source_base_path = "docs"
//! copy_resources = false
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Docset settings consumed by the manifest converter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocsetConfig {
    /// Root directory of the docset sources.
    ///
    /// Source files are resolved against this directory when a resource is
    /// linked instead of copied.
    pub docset_path: PathBuf,

    /// Site base path the manifest is written under.
    pub site_base_path: String,

    /// Base path of the sources, echoed into the manifest envelope.
    pub source_base_path: String,

    /// Whether resources are copied into the output tree.
    ///
    /// When disabled, resource outputs carry a link back to the source file.
    pub copy_resources: bool,
}

impl Default for DocsetConfig {
    fn default() -> Self {
        Self {
            docset_path: PathBuf::from("."),
            site_base_path: String::new(),
            source_base_path: ".".to_string(),
            copy_resources: true,
        }
    }
}

impl DocsetConfig {
    /// Load docset configuration from a TOML file.
    ///
    /// Missing keys take their defaults. A relative `docset_path` is resolved
    /// against the directory holding the config file.
    ///
    /// ```rust,no_run
    /// use lmc_core::DocsetConfig;
    /// use std::path::Path;
    ///
    /// let config = DocsetConfig::load(Path::new("docset.toml"))?;
    /// println!("site base: {}", config.site_base_path);
    /// # Ok::<(), lmc_core::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read docset config: {e}")))?;
        let mut config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse docset config: {e}")))?;
        if let Some(base) = path.parent() {
            config.docset_path = rebase(base, &config.docset_path);
        }
        Ok(config)
    }

    /// Save docset configuration to a TOML file.
    ///
    /// The parent directory must already exist.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize docset config: {e}")))?;
        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write docset config: {e}")))?;
        Ok(())
    }

    /// Where the manifest lands beneath `output_root`.
    ///
    /// ```rust
    /// use lmc_core::DocsetConfig;
    /// use std::path::Path;
    ///
    /// let config = DocsetConfig {
    ///     site_base_path: "dotnet".to_string(),
    ///     ..DocsetConfig::default()
    /// };
    /// let path = config.manifest_path(Path::new("_site"));
    /// assert_eq!(path, Path::new("_site/dotnet/.manifest.json"));
    /// ```
    #[must_use]
    pub fn manifest_path(&self, output_root: &Path) -> PathBuf {
        output_root
            .join(&self.site_base_path)
            .join(crate::MANIFEST_FILE_NAME)
    }
}

fn rebase(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || base.as_os_str().is_empty() {
        return path.to_path_buf();
    }
    if path == Path::new(".") {
        return base.to_path_buf();
    }
    base.join(path)
}

/// One metadata job declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataJobItem {
    /// Source globs the job reads.
    #[serde(default)]
    pub src: Vec<String>,
    /// Destination folder, relative to the base directory.
    #[serde(default)]
    pub dest: String,
    /// Regenerate even when outputs are up to date.
    #[serde(default)]
    pub force: bool,
    /// Emit raw metadata without post-processing.
    #[serde(default)]
    pub raw: bool,
}

/// Ordered metadata job declarations plus the directory they resolve against.
///
/// ```json
/// {
///   "base_directory": "/repo",
///   "metadata": [
///     { "src": ["src/**/*.csproj"], "dest": "api", "force": false, "raw": false }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataJobConfig {
    /// Directory relative paths resolve against.
    #[serde(default)]
    pub base_directory: PathBuf,
    /// Job entries, in declaration order.
    #[serde(default)]
    pub metadata: Vec<MetadataJobItem>,
}

impl MetadataJobConfig {
    /// Load metadata job configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read metadata config: {e}")))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse metadata config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject entries that cannot run.
    ///
    /// Every job needs at least one source glob.
    pub fn validate(&self) -> Result<()> {
        for (index, item) in self.metadata.iter().enumerate() {
            if item.src.iter().all(|s| s.trim().is_empty()) {
                return Err(Error::Config(format!(
                    "metadata entry {index} has no source patterns"
                )));
            }
        }
        Ok(())
    }

    /// Destination directory of each job, resolved against the base directory.
    #[must_use]
    pub fn resolved_destinations(&self) -> Vec<PathBuf> {
        self.metadata
            .iter()
            .map(|item| self.base_directory.join(&item.dest))
            .collect()
    }
}
