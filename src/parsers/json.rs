use camino::Utf8Path;
use serde_json::Value;

use super::SourceError;
use super::files::{collect_files_with_extension, read_document};
use crate::metrics::RunMetrics;
use crate::models::RawJsonItem;
use crate::reference::{UNKNOWN_COMPONENT, component_for_json_filename};

/// Load every JSON lookup file under `dir`.
///
/// A file that can't be read or parsed is logged and skipped.
///
/// # Errors
/// `SourceUnavailable` when the directory doesn't exist
pub fn load_json_dir(
    dir: &Utf8Path,
    extension: &str,
    metrics: &RunMetrics,
) -> Result<Vec<RawJsonItem>, SourceError> {
    let files = collect_files_with_extension(dir, &[extension])?;
    metrics.record_files_scanned(files.len());
    tracing::info!("Found {} JSON files in {}", files.len(), dir);

    let mut items = Vec::new();
    for path in &files {
        let parsed = read_document(path).and_then(|text| parse_json_document(&text, path));
        match parsed {
            Ok(records) => {
                tracing::debug!("Parsed {} records from {}", records.len(), path);
                metrics.record_file_parsed();
                metrics.record_json_records(records.len());
                items.extend(records);
            }
            Err(e) => {
                tracing::error!("Skipping JSON file: {}", e);
                metrics.record_file_skipped();
            }
        }
    }

    Ok(items)
}

/// Parse one JSON lookup document.
///
/// The outer object is keyed by drawable ID, each inner object by texture ID,
/// and each leaf holds `GXT` and `Localized` strings. Levels that aren't
/// objects are skipped.
pub fn parse_json_document(text: &str, path: &Utf8Path) -> Result<Vec<RawJsonItem>, SourceError> {
    let root: Value = serde_json::from_str(text).map_err(|e| SourceError::ParseMalformed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let Value::Object(drawables) = root else {
        return Err(SourceError::ParseMalformed {
            path: path.to_path_buf(),
            reason: "top level is not an object".to_string(),
        });
    };

    let filename = path.file_name().unwrap_or(path.as_str());
    let category = component_for_json_filename(filename)
        .map(|m| m.internal_type)
        .unwrap_or(UNKNOWN_COMPONENT);

    let mut items = Vec::new();
    for (drawable_id, textures) in &drawables {
        let Value::Object(textures) = textures else {
            tracing::debug!("Skipping non-object drawable {} in {}", drawable_id, path);
            continue;
        };

        for (texture_id, leaf) in textures {
            let Value::Object(fields) = leaf else {
                tracing::debug!(
                    "Skipping non-object texture {}/{} in {}",
                    drawable_id,
                    texture_id,
                    path
                );
                continue;
            };

            items.push(RawJsonItem {
                source_file: path.to_path_buf(),
                drawable_id: drawable_id.clone(),
                texture_id: texture_id.clone(),
                gxt_label: string_field(fields, "GXT"),
                localized_name: string_field(fields, "Localized"),
                category: category.to_string(),
            });
        }
    }

    Ok(items)
}

fn string_field(fields: &serde_json::Map<String, Value>, name: &str) -> String {
    fields
        .get(name)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}
