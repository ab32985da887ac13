use indexmap::IndexMap;

use crate::metrics::RunMetrics;
use crate::models::{ComponentDetails, RawXmlItem, RawXmlNode, UNSET_ID};
use crate::reference::{resolve_component_type, resolve_dlc_from_hash};

/// Cross-reference maps built from the XML shop files
///
/// Bridges the hash-keyed script metadata and the label-keyed JSON lookups:
///
/// - `text_labels`: uniqueNameHash -> textLabel (only non-empty labels)
/// - `component_details`: uniqueNameHash -> category, indices and DLC
///
/// Duplicate hashes overwrite earlier entries.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver {
    text_labels: IndexMap<String, String>,
    component_details: IndexMap<String, ComponentDetails>,
}

impl IdentityResolver {
    /// Build both maps from every item of every node, male and female alike
    pub fn build(nodes: &[RawXmlNode], metrics: &RunMetrics) -> Self {
        let mut resolver = Self::default();

        for node in nodes {
            for item in &node.items {
                let hash = &item.unique_name_hash;
                if hash.is_empty() {
                    continue;
                }

                if !item.text_label.is_empty() {
                    resolver
                        .text_labels
                        .insert(hash.clone(), item.text_label.clone());
                }

                let details = details_from_xml_item(item, &node.dlc_name, metrics);
                resolver.component_details.insert(hash.clone(), details);
            }
        }

        tracing::info!(
            "Identity resolver built: {} text labels, {} component details",
            resolver.text_labels.len(),
            resolver.component_details.len()
        );

        resolver
    }

    pub fn text_label(&self, hash: &str) -> Option<&str> {
        self.text_labels.get(hash).map(String::as_str)
    }

    pub fn component_details(&self, hash: &str) -> Option<&ComponentDetails> {
        self.component_details.get(hash)
    }

    pub fn label_count(&self) -> usize {
        self.text_labels.len()
    }

    pub fn details_count(&self) -> usize {
        self.component_details.len()
    }
}

/// Build ComponentDetails for one XML item.
///
/// # Arguments
/// * `item` - The XML component or prop
/// * `node_dlc` - The dlcName declared by the file the item came from
/// * `metrics` - Receives integer parse failures
pub fn details_from_xml_item(
    item: &RawXmlItem,
    node_dlc: &str,
    metrics: &RunMetrics,
) -> ComponentDetails {
    let hash = &item.unique_name_hash;

    ComponentDetails {
        component_type: resolve_component_type(&item.type_code, hash).to_string(),
        drawable_id: parse_index(&item.drawable_index, "drawable index", hash, metrics),
        texture_id: parse_index(&item.texture_index, "texture index", hash, metrics),
        dlc_name: resolve_dlc_from_hash(hash, node_dlc),
        variants: Vec::new(),
    }
}

/// Parse an index field, degrading to -1.
///
/// Empty input is simply unset; anything else that isn't an integer is logged.
pub fn parse_index(raw: &str, field: &str, hash: &str, metrics: &RunMetrics) -> i32 {
    let raw = raw.trim();
    if raw.is_empty() {
        return UNSET_ID;
    }

    match raw.parse::<i32>() {
        Ok(value) => value,
        Err(e) => {
            tracing::error!("Invalid {} '{}' for {}: {}", field, raw, hash, e);
            metrics.record_int_parse_failure();
            UNSET_ID
        }
    }
}
