//! Convert command implementation

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use lmc_core::{
    ConvertOptions, DocsetConfig, JsonFileSink, ManifestConverter, PublishSnapshot, write_manifest,
};
use tracing::debug;

use crate::cli::ConvertArgs;

/// Execute the convert command
///
/// Loads the docset configuration and publish snapshot, converts every
/// document, then writes the manifest. Nothing is written if any document
/// fails to convert.
pub async fn execute(args: ConvertArgs, config_path: Option<&Path>, quiet: bool) -> Result<()> {
    let docset = load_docset(config_path, &args)?;

    let snapshot = PublishSnapshot::load(&args.snapshot)
        .with_context(|| format!("Failed to load snapshot {}", args.snapshot.display()))?;

    let mut options = ConvertOptions {
        sort_files: args.sort,
        ..ConvertOptions::default()
    };
    if let Some(concurrency) = args.concurrency {
        options.concurrency = concurrency;
    }

    let converter = ManifestConverter::new(docset.clone())
        .with_options(options)
        .with_progress(|completed, total| {
            debug!("Converted {completed}/{total} documents");
        });

    let manifest = converter
        .convert(&snapshot.documents)
        .await
        .context("Manifest conversion failed; no manifest was written")?;

    if args.dry_run {
        println!("{}", serde_json::to_string_pretty(&manifest)?);
        return Ok(());
    }

    let path = write_manifest(&JsonFileSink::new(), &manifest, &docset, &args.output)
        .await
        .context("Failed to write manifest")?;

    if !quiet {
        let stats = manifest.stats();
        println!(
            "{} Wrote {} ({} files, {} groups)",
            "✓".green(),
            path.display().to_string().bold(),
            stats.total_files,
            stats.groups
        );
    }
    Ok(())
}

fn load_docset(config_path: Option<&Path>, args: &ConvertArgs) -> Result<DocsetConfig> {
    let mut docset = match config_path {
        Some(path) => DocsetConfig::load(path)
            .with_context(|| format!("Failed to load docset config {}", path.display()))?,
        None => DocsetConfig::default(),
    };
    if let Some(copy_resources) = args.copy_resources_override() {
        docset.copy_resources = copy_resources;
    }
    Ok(docset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args() -> ConvertArgs {
        ConvertArgs {
            snapshot: PathBuf::from("publish.json"),
            output: PathBuf::from("."),
            concurrency: None,
            sort: false,
            copy_resources: false,
            link_resources: false,
            dry_run: false,
        }
    }

    #[test]
    fn test_load_docset_defaults_without_config() -> Result<()> {
        let docset = load_docset(None, &args())?;
        assert_eq!(docset, DocsetConfig::default());
        Ok(())
    }

    #[test]
    fn test_link_flag_overrides_config() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("docset.toml");
        std::fs::write(&path, "copy_resources = true\nsite_base_path = \"docs\"\n")?;

        let mut link = args();
        link.link_resources = true;
        let docset = load_docset(Some(&path), &link)?;

        assert!(!docset.copy_resources);
        assert_eq!(docset.site_base_path, "docs");
        Ok(())
    }

    #[test]
    fn test_missing_config_is_reported() {
        let result = load_docset(Some(Path::new("/no/such/docset.toml")), &args());
        let message = format!("{:#}", result.expect_err("missing config"));
        assert!(message.contains("/no/such/docset.toml"));
    }
}
