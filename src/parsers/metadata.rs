use camino::Utf8Path;
use roxmltree::Node;

use super::SourceError;
use super::files::{parse_xml, read_document};
use crate::metrics::RunMetrics;
use crate::models::{Gender, RawMetadataItem};
use crate::reference::{component_by_legacy_token, dlc_for_metadata_key};

const APPAREL_DATA: &str = "MPApparelData";

/// Load and parse the script metadata file.
///
/// # Errors
/// `SourceUnavailable` when the file doesn't exist; any parse error is
/// returned as-is and stops the run.
pub fn load_metadata(
    path: &Utf8Path,
    metrics: &RunMetrics,
) -> Result<Vec<RawMetadataItem>, SourceError> {
    if !path.is_file() {
        return Err(SourceError::SourceUnavailable(path.to_path_buf()));
    }

    let text = read_document(path)?;
    let items = parse_metadata(&text, path)?;

    metrics.record_file_parsed();
    metrics.record_metadata_items(items.len());
    tracing::info!("Loaded {} metadata items from {}", items.len(), path);

    Ok(items)
}

/// Parse a script metadata document.
///
/// Every element group under `MPApparelData` (male, female, or any other)
/// contributes its `Item` children. The first attribute of an item is its
/// key, the second its pairing value.
pub fn parse_metadata(text: &str, path: &Utf8Path) -> Result<Vec<RawMetadataItem>, SourceError> {
    let doc = parse_xml(text, path)?;
    let root = doc.root_element();

    let apparel = if root.has_tag_name(APPAREL_DATA) {
        root
    } else {
        root.children()
            .find(|n| n.has_tag_name(APPAREL_DATA))
            .ok_or_else(|| SourceError::MissingElement {
                path: path.to_path_buf(),
                element: APPAREL_DATA.to_string(),
            })?
    };

    let mut items = Vec::new();
    for group in apparel.children().filter(Node::is_element) {
        for node in group.children().filter(|n| n.has_tag_name("Item")) {
            if let Some(item) = metadata_item(node) {
                items.push(item);
            }
        }
    }

    Ok(items)
}

fn metadata_item(node: Node) -> Option<RawMetadataItem> {
    let mut attributes = node.attributes();
    let (Some(key), Some(value)) = (attributes.next(), attributes.next()) else {
        tracing::warn!(
            "Skipping metadata Item with fewer than two attributes at byte {}",
            node.range().start
        );
        return None;
    };

    let key = key.value().to_string();
    let Some(gender) = Gender::from_key(&key) else {
        tracing::debug!("Skipping metadata key without gender marker: {}", key);
        return None;
    };

    let component = component_by_legacy_token(&key);
    let dlc_name = match dlc_for_metadata_key(&key) {
        Some(dlc) => dlc.display_name.to_string(),
        None => {
            tracing::debug!("No DLC found for metadata key: {}", key);
            String::new()
        }
    };

    Some(RawMetadataItem {
        value: value.value().to_string(),
        key,
        gender,
        component,
        dlc_name,
    })
}
