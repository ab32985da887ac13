//! Readers for the three input sources.
//!
//! - [`metadata`]: the script metadata file, one key/value pair per item
//! - [`json`]: per-category JSON lookup files keyed by drawable and texture ID
//! - [`xml`]: per-DLC shop XML files with outfits, components and props
//!
//! A missing source, or a metadata file that can't be parsed, stops the run.
//! A single malformed file inside the JSON or XML directory is logged and skipped.

pub mod files;
pub mod json;
pub mod metadata;
pub mod xml;

use camino::Utf8PathBuf;
use thiserror::Error;

use crate::metrics::RunMetrics;
use crate::models::{SourceData, SourcesConfig};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Source not found: {0}")]
    SourceUnavailable(Utf8PathBuf),

    #[error("Failed to read {path}: {source}")]
    Unreadable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed document {path}: {reason}")]
    ParseMalformed { path: Utf8PathBuf, reason: String },

    #[error("Missing <{element}> element in {path}")]
    MissingElement { path: Utf8PathBuf, element: String },
}

/// Read all three sources named by the configuration.
///
/// # Errors
/// `SourceUnavailable` when the metadata file or either directory is missing,
/// or any error from the metadata file itself
pub fn load_sources(
    config: &SourcesConfig,
    metrics: &RunMetrics,
) -> Result<SourceData, SourceError> {
    let metadata = metadata::load_metadata(&config.metadata_path(), metrics)?;
    let json_items = json::load_json_dir(&config.json_path(), &config.json_extension, metrics)?;
    let xml_nodes = xml::load_xml_dir(&config.xml_path(), &config.xml_extension, metrics)?;

    tracing::info!(
        "Loaded sources: {} metadata items, {} JSON records, {} XML nodes",
        metadata.len(),
        json_items.len(),
        xml_nodes.len()
    );

    Ok(SourceData {
        metadata,
        json_items,
        xml_nodes,
    })
}
