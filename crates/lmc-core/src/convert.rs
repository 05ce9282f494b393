//! Concurrent conversion of published documents into a legacy manifest.
//!
//! Every document is converted by an independent unit of work on a bounded
//! pool of blocking workers. Units share nothing while they run; only their
//! results meet afterwards: records flow back through the stream and group ids
//! are registered in a [`GroupTable`]. Waiting for all units is the only
//! synchronization point before the envelope is assembled.
//!
//! A failure in any unit aborts the whole conversion. Units still in flight
//! are dropped and no manifest is produced.

use std::num::NonZeroUsize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::stream::{self, StreamExt, TryStreamExt};
use tracing::{debug, info, warn};

use crate::classify::{classify_outputs, type_labels};
use crate::group::{GroupTable, resolve_group};
use crate::manifest::{LegacyManifest, ManifestRecord};
use crate::types::{ContentType, PublishedDocument, VersionSet};
use crate::{DocsetConfig, Error, Result};

/// Progress callback type for reporting conversion progress.
///
/// Called with (completed, total) after each document is converted.
pub type ProgressCallback = Arc<dyn Fn(usize, usize) + Send + Sync>;

/// Tuning knobs for a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Maximum number of documents converted at once (clamped to 1-64).
    pub concurrency: usize,
    /// Sort records by source path instead of keeping completion order.
    pub sort_files: bool,
}

impl ConvertOptions {
    /// Upper bound for the worker pool.
    pub const MAX_CONCURRENCY: usize = 64;

    /// Fallback when the available parallelism cannot be queried.
    const FALLBACK_CONCURRENCY: usize = 4;
}

impl Default for ConvertOptions {
    fn default() -> Self {
        let concurrency = std::thread::available_parallelism()
            .map_or(Self::FALLBACK_CONCURRENCY, NonZeroUsize::get);
        Self {
            concurrency,
            sort_files: false,
        }
    }
}

/// Converts published documents into a [`LegacyManifest`].
///
/// Holds no state between calls; every input is passed explicitly.
///
/// ## Example
///
/// ```rust
/// use lmc_core::{ConvertOptions, DocsetConfig, ManifestConverter};
///
/// # async fn example() -> lmc_core::Result<()> {
/// let converter = ManifestConverter::new(DocsetConfig::default())
///     .with_options(ConvertOptions { concurrency: 8, sort_files: true })
///     .with_progress(|completed, total| {
///         println!("Converted {completed}/{total}");
///     });
///
/// let manifest = converter.convert(&[]).await?;
/// assert!(manifest.files.is_empty());
/// # Ok(())
/// # }
/// ```
pub struct ManifestConverter {
    docset: Arc<DocsetConfig>,
    concurrency: usize,
    sort_files: bool,
    progress_callback: Option<ProgressCallback>,
}

/// Result of converting one document.
struct ConvertedDocument {
    record: ManifestRecord,
    group: Option<(String, VersionSet)>,
}

impl ManifestConverter {
    /// Create a converter with default options.
    #[must_use]
    pub fn new(docset: DocsetConfig) -> Self {
        Self {
            docset: Arc::new(docset),
            concurrency: 1,
            sort_files: false,
            progress_callback: None,
        }
        .with_options(ConvertOptions::default())
    }

    /// Apply conversion options.
    #[must_use]
    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.concurrency = options.concurrency.clamp(1, ConvertOptions::MAX_CONCURRENCY);
        self.sort_files = options.sort_files;
        self
    }

    /// Set progress callback.
    ///
    /// The callback receives `(completed, total)` after each document.
    #[must_use]
    pub fn with_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Arc::new(callback));
        self
    }

    /// Current worker limit.
    #[must_use]
    pub const fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Docset settings this converter applies.
    #[must_use]
    pub fn docset(&self) -> &DocsetConfig {
        &self.docset
    }

    /// Convert every document and assemble the manifest envelope.
    ///
    /// Produces exactly one record per document. Records come back in
    /// completion order unless sorting was requested. Groups are ordered by id.
    ///
    /// Must be awaited inside a tokio runtime: documents are converted on
    /// tokio's blocking pool. Both the current-thread and multi-thread
    /// flavors work.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Conversion`] naming the first document that failed.
    pub async fn convert(&self, documents: &[PublishedDocument]) -> Result<LegacyManifest> {
        let total = documents.len();
        info!(
            documents = total,
            concurrency = self.concurrency,
            "Converting legacy manifest"
        );

        let groups = Arc::new(GroupTable::new());
        let completed = Arc::new(AtomicUsize::new(0));

        let files: Vec<ManifestRecord> = stream::iter(documents.iter().cloned())
            .map(|document| {
                let docset = Arc::clone(&self.docset);
                let groups = Arc::clone(&groups);
                let completed = Arc::clone(&completed);
                let progress = self.progress_callback.clone();

                async move {
                    let file = document.facts.file_path.clone();
                    let converted =
                        tokio::task::spawn_blocking(move || convert_document(&document, &docset))
                            .await
                            .map_err(|e| Error::conversion(&file, format!("worker failed: {e}")))??;

                    if let Some((id, monikers)) = converted.group {
                        groups.register(id, monikers);
                    }

                    let done = completed.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some(cb) = progress {
                        cb(done, total);
                    }

                    Ok::<_, Error>(converted.record)
                }
            })
            .buffer_unordered(self.concurrency)
            .try_collect::<Vec<_>>()
            .await
            .inspect_err(|e| warn!(document = ?e.document(), "Conversion aborted: {e}"))?;

        let mut manifest = LegacyManifest::new(
            groups.to_groups(),
            files,
            self.docset.source_base_path.clone(),
        );
        if self.sort_files {
            manifest.sort_files();
        }

        let stats = manifest.stats();
        info!(
            files = stats.total_files,
            content = stats.content,
            resources = stats.resources,
            tocs = stats.tocs,
            unclassified = stats.unclassified,
            groups = stats.groups,
            "Legacy manifest assembled"
        );
        Ok(manifest)
    }
}

/// Convert a single document. Pure apart from logging.
fn convert_document(
    document: &PublishedDocument,
    docset: &DocsetConfig,
) -> Result<ConvertedDocument> {
    let facts = &document.facts;
    let (original_type, type_label) = type_labels(facts.content_type);
    if facts.content_type == ContentType::Unknown {
        warn!(file = %facts.file_path, "Unrecognized content type; emitting empty outputs");
    }

    let output = classify_outputs(facts, docset)?;
    let group = resolve_group(&document.monikers);
    let is_resource = facts.content_type == ContentType::Resource;

    debug!(file = %facts.file_path, group = ?group, "Converted document");

    let record = ManifestRecord {
        site_url_relative_to_site_base_path: facts.legacy_site_url.clone(),
        file_path: facts.file_path.clone(),
        file_path_relative_to_source_base_path: facts.legacy_file_path.clone(),
        original_type: original_type.to_string(),
        type_label: type_label.to_string(),
        output,
        skip_normalization: !is_resource,
        skip_schema_check: !is_resource,
        group: group.clone(),
    };

    Ok(ConvertedDocument {
        record,
        group: group.map(|id| (id, document.monikers.clone())),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentFacts;
    use std::sync::Mutex;

    fn page(path: &str, monikers: &[&str]) -> PublishedDocument {
        let stem = path.trim_end_matches(".md");
        PublishedDocument::new(
            DocumentFacts {
                file_path: path.to_string(),
                content_type: ContentType::Page,
                is_schema_data: false,
                legacy_output_path: format!("{stem}.json"),
                legacy_site_url: stem.to_string(),
                legacy_file_path: path.to_string(),
            },
            monikers.iter().map(|m| (*m).to_string()).collect(),
        )
    }

    fn converter() -> ManifestConverter {
        ManifestConverter::new(DocsetConfig::default())
    }

    #[test]
    fn test_concurrency_is_clamped() {
        let low = converter().with_options(ConvertOptions {
            concurrency: 0,
            sort_files: false,
        });
        assert_eq!(low.concurrency(), 1);

        let high = converter().with_options(ConvertOptions {
            concurrency: 1_000,
            sort_files: false,
        });
        assert_eq!(high.concurrency(), ConvertOptions::MAX_CONCURRENCY);
    }

    #[test]
    fn test_default_options() {
        let options = ConvertOptions::default();
        assert!(options.concurrency >= 1);
        assert!(!options.sort_files);
    }

    #[test]
    fn test_convert_document_record_fields() {
        let document = page("a/b.md", &["v1"]);
        let converted = convert_document(&document, &DocsetConfig::default()).expect("convert");

        let record = converted.record;
        assert_eq!(record.site_url_relative_to_site_base_path, "a/b");
        assert_eq!(record.file_path, "a/b.md");
        assert_eq!(record.file_path_relative_to_source_base_path, "a/b.md");
        assert_eq!(record.original_type, "Conceptual");
        assert_eq!(record.type_label, "Content");
        assert!(record.skip_normalization);
        assert!(record.skip_schema_check);
        assert_eq!(record.group, resolve_group(&["v1".to_string()]));

        let (id, monikers) = converted.group.expect("group");
        assert_eq!(Some(id), record.group);
        assert_eq!(monikers, vec!["v1".to_string()]);
    }

    #[test]
    fn test_resources_are_normalized_and_checked() {
        let mut document = page("img/a.png", &[]);
        document.facts.content_type = ContentType::Resource;
        document.facts.legacy_output_path = "img/a.png".to_string();

        let converted = convert_document(&document, &DocsetConfig::default()).expect("convert");

        assert!(!converted.record.skip_normalization);
        assert!(!converted.record.skip_schema_check);
        assert!(converted.group.is_none());
        assert!(converted.record.group.is_none());
    }

    #[test]
    fn test_unknown_type_gets_empty_record() {
        let mut document = page("data/x.yml", &["v1"]);
        document.facts.content_type = ContentType::Unknown;
        document.facts.legacy_output_path = String::new();

        let converted = convert_document(&document, &DocsetConfig::default()).expect("convert");

        assert_eq!(converted.record.original_type, "");
        assert_eq!(converted.record.type_label, "");
        assert!(converted.record.output.is_empty());
    }

    #[tokio::test(flavor = "current_thread")]
    async fn test_convert_on_current_thread_runtime() {
        let documents = vec![page("a.md", &["v1"]), page("b.md", &[])];

        let manifest = converter().convert(&documents).await.expect("convert");

        assert_eq!(manifest.files.len(), 2);
        assert_eq!(manifest.groups.as_ref().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn test_convert_empty() {
        let manifest = converter().convert(&[]).await.expect("convert");

        assert!(manifest.files.is_empty());
        assert!(manifest.groups.is_none());
        assert!(manifest.is_already_processed);
    }

    #[tokio::test]
    async fn test_convert_one_record_per_document() {
        let documents: Vec<_> = (0..50).map(|i| page(&format!("doc{i}.md"), &[])).collect();

        let manifest = converter().convert(&documents).await.expect("convert");

        assert_eq!(manifest.files.len(), documents.len());
        assert!(manifest.groups.is_none());
    }

    #[tokio::test]
    async fn test_shared_monikers_share_one_group() {
        let documents = vec![
            page("a.md", &["1.0", "2.0"]),
            page("b.md", &["1.0", "2.0"]),
            page("c.md", &["2.0", "1.0"]),
            page("d.md", &[]),
        ];

        let manifest = converter().convert(&documents).await.expect("convert");

        let groups = manifest.groups.as_ref().expect("groups");
        assert_eq!(groups.len(), 2);

        let group_of = |path: &str| {
            manifest
                .files
                .iter()
                .find(|f| f.file_path == path)
                .and_then(|f| f.group.clone())
        };
        assert!(group_of("a.md").is_some());
        assert_eq!(group_of("a.md"), group_of("b.md"));
        assert_ne!(group_of("a.md"), group_of("c.md"));
        assert!(group_of("d.md").is_none());
    }

    #[tokio::test]
    async fn test_sort_files_option() {
        let documents = vec![page("c.md", &[]), page("a.md", &[]), page("b.md", &[])];
        let converter = converter().with_options(ConvertOptions {
            concurrency: 3,
            sort_files: true,
        });

        let manifest = converter.convert(&documents).await.expect("convert");

        let order: Vec<_> = manifest.files.iter().map(|f| f.file_path.as_str()).collect();
        assert_eq!(order, vec!["a.md", "b.md", "c.md"]);
    }

    #[tokio::test]
    async fn test_source_base_path_is_echoed() {
        let docset = DocsetConfig {
            source_base_path: "docs".to_string(),
            ..DocsetConfig::default()
        };

        let manifest = ManifestConverter::new(docset)
            .convert(&[])
            .await
            .expect("convert");

        assert_eq!(manifest.source_base_path, "docs");
    }

    #[tokio::test]
    async fn test_failure_aborts_and_names_document() {
        let mut broken = page("broken.md", &["v1"]);
        broken.facts.legacy_output_path = String::new();
        let documents = vec![page("a.md", &["v1"]), broken, page("c.md", &[])];

        let result = converter().convert(&documents).await;

        let err = result.expect_err("conversion should fail");
        assert_eq!(err.document(), Some("broken.md"));
    }

    #[tokio::test]
    async fn test_progress_callback() {
        let progress = Arc::new(Mutex::new(Vec::new()));
        let progress_clone = Arc::clone(&progress);

        let converter = converter().with_progress(move |completed, total| {
            progress_clone
                .lock()
                .expect("lock")
                .push((completed, total));
        });

        let documents = vec![page("a.md", &[]), page("b.md", &[]), page("c.md", &[])];
        converter.convert(&documents).await.expect("convert");

        let calls = progress.lock().expect("lock");
        assert_eq!(calls.len(), 3);
        for (_, total) in calls.iter() {
            assert_eq!(*total, 3);
        }
        // Completed values should be 1, 2, 3 (in some order due to concurrency)
        let mut completed: Vec<_> = calls.iter().map(|(c, _)| *c).collect();
        drop(calls);
        completed.sort_unstable();
        assert_eq!(completed, vec![1, 2, 3]);
    }
}
