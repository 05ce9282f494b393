//! Manifest persistence.
//!
//! The converter hands its envelope to a [`JsonSink`], which accepts any JSON
//! value and a destination path. [`JsonFileSink`] writes to disk through a
//! temp file and rename; [`MemorySink`] keeps writes in memory for tests and
//! dry runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use crate::manifest::LegacyManifest;
use crate::{DocsetConfig, Error, Result};

/// Destination for structured JSON output.
#[async_trait]
pub trait JsonSink: Send + Sync {
    /// Persist `value` at `path`.
    async fn write_json(&self, value: &Value, path: &Path) -> Result<()>;
}

/// Serialize `manifest` and write it to its fixed location beneath `output_root`.
///
/// Returns the path that was written.
pub async fn write_manifest<S: JsonSink + ?Sized>(
    sink: &S,
    manifest: &LegacyManifest,
    docset: &DocsetConfig,
    output_root: &Path,
) -> Result<PathBuf> {
    let path = docset.manifest_path(output_root);
    let value = serde_json::to_value(manifest)?;
    sink.write_json(&value, &path).await?;
    Ok(path)
}

/// Writes pretty-printed JSON files, creating parent directories as needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFileSink;

impl JsonFileSink {
    /// Create a file sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl JsonSink for JsonFileSink {
    async fn write_json(&self, value: &Value, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(|e| {
                Error::Storage(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }

        let json = serde_json::to_string_pretty(value)
            .map_err(|e| Error::Storage(format!("Failed to serialize JSON: {e}")))?;

        // Write to a temp file first so readers never see a partial manifest
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .await
            .map_err(|e| Error::Storage(format!("Failed to write {}: {e}", tmp_path.display())))?;

        if let Err(e) = commit(&tmp_path, path).await {
            if let Err(cleanup) = fs::remove_file(&tmp_path).await {
                warn!("Failed to remove {}: {cleanup}", tmp_path.display());
            }
            return Err(e);
        }

        debug!("Saved {}", path.display());
        Ok(())
    }
}

async fn commit(tmp_path: &Path, path: &Path) -> Result<()> {
    #[cfg(target_os = "windows")]
    if fs::try_exists(path).await.unwrap_or(false) {
        fs::remove_file(path).await.map_err(|e| {
            Error::Storage(format!("Failed to remove existing {}: {e}", path.display()))
        })?;
    }
    fs::rename(tmp_path, path)
        .await
        .map_err(|e| Error::Storage(format!("Failed to commit {}: {e}", path.display())))
}

/// Keeps written values in memory, keyed by path.
#[derive(Debug, Default)]
pub struct MemorySink {
    written: Mutex<BTreeMap<PathBuf, Value>>,
}

impl MemorySink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value last written to `path`.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<Value> {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned()
    }

    /// Every path written so far.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl JsonSink for MemorySink {
    async fn write_json(&self, value: &Value, path: &Path) -> Result<()> {
        self.written
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_path_buf(), value.clone());
        Ok(())
    }
}
