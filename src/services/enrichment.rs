use indexmap::IndexMap;

use super::resolver::{IdentityResolver, details_from_xml_item};
use crate::metrics::RunMetrics;
use crate::models::{
    ClothingCollection, ClothingItem, ComponentDetails, Gender, GenderCollections, Outfit,
    OutfitComponent, OutfitId, Placeholder, RawJsonItem, RawMetadataItem, RawXmlItem, RawXmlNode,
    RawXmlOutfit, SourceData, UNSET_ID,
};
use crate::reference::{
    UNKNOWN_COMPONENT, component_from_hash, resolve_component_type, resolve_dlc_from_hash,
    resolve_dlc_name,
};

/// JSON records indexed by GXT label, in file order
pub struct JsonLabelIndex<'a> {
    records: &'a [RawJsonItem],
    by_label: IndexMap<&'a str, Vec<usize>>,
}

impl<'a> JsonLabelIndex<'a> {
    pub fn new(records: &'a [RawJsonItem]) -> Self {
        let mut by_label: IndexMap<&'a str, Vec<usize>> = IndexMap::new();
        for (index, record) in records.iter().enumerate() {
            if !record.gxt_label.is_empty() {
                by_label.entry(record.gxt_label.as_str()).or_default().push(index);
            }
        }

        Self { records, by_label }
    }

    fn records_for(&self, label: &str) -> impl Iterator<Item = &'a RawJsonItem> {
        let records = self.records;
        self.by_label
            .get(label)
            .into_iter()
            .flatten()
            .map(move |&index| &records[index])
    }

    /// First record carrying the label
    pub fn first(&self, label: &str) -> Option<&'a RawJsonItem> {
        self.records_for(label).next()
    }

    /// First usable localized name for a label, skipping `NULL` / `NO_LABEL`
    pub fn localized_name(&self, label: &str) -> Option<&'a str> {
        self.records_for(label)
            .map(|record| record.localized_name.as_str())
            .find(|name| Placeholder::is_meaningful_label(name))
    }

    /// Let the first JSON record for `label` override the drawable and texture
    /// IDs and contribute a named variant.
    ///
    /// # Returns
    /// `true` when a record was found
    pub fn enrich(&self, details: &mut ComponentDetails, label: &str) -> bool {
        if !Placeholder::is_meaningful_label(label) {
            return false;
        }

        let Some(record) = self.first(label) else {
            return false;
        };

        if let Some(id) = quiet_id(&record.drawable_id) {
            details.drawable_id = id;
        }
        if let Some(id) = quiet_id(&record.texture_id) {
            details.texture_id = id;
        }
        if !details.has_known_type() && record.category != UNKNOWN_COMPONENT {
            details.component_type = record.category.clone();
        }
        if Placeholder::is_meaningful_label(&record.localized_name) {
            details.add_variant(details.texture_id, &record.localized_name);
        }

        true
    }

    pub fn len(&self) -> usize {
        self.by_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_label.is_empty()
    }
}

/// Non-negative JSON ID, ignoring anything that doesn't parse
fn quiet_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok().filter(|id| *id >= 0)
}

/// Non-negative JSON ID; parse failures are logged and counted
fn json_id(raw: &str, field: &str, label: &str, metrics: &RunMetrics) -> Option<i32> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match raw.parse::<i32>() {
        Ok(id) if id >= 0 => Some(id),
        Ok(_) => None,
        Err(e) => {
            tracing::error!("Failed to parse JSON {} '{}' for {}: {}", field, raw, label, e);
            metrics.record_int_parse_failure();
            None
        }
    }
}

/// Merges metadata, JSON and XML records into per-gender collections
///
/// The passes run in a fixed order because later passes override fields set
/// by earlier ones:
///
/// 1. [`seed_from_metadata`](Self::seed_from_metadata): one item per metadata
///    key, linked to its text label and XML details through the resolver
/// 2. [`enrich_from_json`](Self::enrich_from_json): JSON names and IDs
///    overwrite, unmatched records become standalone items
/// 3. [`reconcile_xml`](Self::reconcile_xml): outfits are built, XML-only
///    items added, and existing items only get their empty fields filled
///
/// followed by [`link_outfit_membership`](Self::link_outfit_membership).
pub struct EnrichmentEngine<'a> {
    sources: &'a SourceData,
    resolver: &'a IdentityResolver,
    metrics: &'a RunMetrics,
    json_index: JsonLabelIndex<'a>,
    component_cache: IndexMap<String, ComponentDetails>,
    collections: GenderCollections,
}

impl<'a> EnrichmentEngine<'a> {
    pub fn new(
        sources: &'a SourceData,
        resolver: &'a IdentityResolver,
        metrics: &'a RunMetrics,
    ) -> Self {
        Self {
            sources,
            resolver,
            metrics,
            json_index: JsonLabelIndex::new(&sources.json_items),
            component_cache: IndexMap::new(),
            collections: GenderCollections::default(),
        }
    }

    /// Run every pass in order and hand back the collections
    pub fn run(mut self) -> GenderCollections {
        tracing::info!("Starting enrichment");

        self.seed_from_metadata();
        self.enrich_from_json();
        self.reconcile_xml();
        self.link_outfit_membership();

        tracing::info!(
            "Enrichment complete: {} male items, {} female items, {} outfits",
            self.collections.male.total_items(),
            self.collections.female.total_items(),
            self.collections.total_outfits()
        );

        self.collections
    }

    pub fn collections(&self) -> &GenderCollections {
        &self.collections
    }

    /// Details cached by Pass 2 under a GXT label or localized name
    pub fn cached_details(&self, key: &str) -> Option<&ComponentDetails> {
        self.component_cache.get(key)
    }

    /// Pass 1: create one item per metadata entry
    pub fn seed_from_metadata(&mut self) {
        let sources = self.sources;

        for meta in &sources.metadata {
            let mut item = ClothingItem::new(meta.key.clone(), meta.gender);
            item.pairing_value = meta.value.clone();

            match self.resolver.text_label(&meta.key) {
                Some(label) => {
                    tracing::debug!("Linked metadata {} to textLabel {}", meta.key, label);
                    self.metrics.record_label_link();
                    item.text_label = label.to_string();
                }
                None => {
                    tracing::debug!("No textLabel found for metadata key: {}", meta.key);
                    self.metrics.record_lookup_miss();
                }
            }

            item.component_details = match self.resolver.component_details(&meta.key) {
                Some(details) => details.clone(),
                None => metadata_details(meta),
            };

            // Metadata DLC is authoritative
            if !meta.dlc_name.is_empty() {
                item.component_details.dlc_name = meta.dlc_name.clone();
            }
            item.dlc_name = item.component_details.dlc_name.clone();

            self.collections.collection_mut(meta.gender).items.push(item);
        }

        tracing::info!(
            "Metadata seeding complete: {} male, {} female items",
            self.collections.male.total_items(),
            self.collections.female.total_items()
        );
    }

    /// Pass 2: overlay JSON names and IDs, creating items for unmatched labels
    pub fn enrich_from_json(&mut self) {
        let sources = self.sources;

        for record in &sources.json_items {
            let gender = record.gender();
            let label = record.gxt_label.as_str();
            let collection = self.collections.collection_mut(gender);

            let details = if let Some(item) = collection.find_by_label_mut(label) {
                apply_json_record(item, record, self.metrics);
                self.metrics.record_json_enrichment();
                item.component_details.clone()
            } else if label.is_empty() {
                tracing::debug!(
                    "Skipping JSON record {}/{} without GXT label in {}",
                    record.drawable_id,
                    record.texture_id,
                    record.source_file
                );
                continue;
            } else {
                let item = json_only_item(record, gender, self.metrics);
                tracing::debug!("Created standalone {} item from JSON: {}", gender, label);
                let details = item.component_details.clone();
                collection.items.push(item);
                self.metrics.record_json_only_item();
                details
            };

            if !record.localized_name.is_empty() {
                self.component_cache
                    .insert(record.localized_name.clone(), details.clone());
            }
            self.component_cache.insert(label.to_string(), details);
        }

        tracing::info!(
            "JSON enrichment complete: {} male, {} female items",
            self.collections.male.total_items(),
            self.collections.female.total_items()
        );
    }

    /// Pass 3: build outfits and fold in XML items
    pub fn reconcile_xml(&mut self) {
        let sources = self.sources;

        for node in &sources.xml_nodes {
            for data in &node.outfits {
                let outfit = self.build_outfit(data, node);
                self.collections
                    .collection_mut(node.gender)
                    .add_outfit(outfit);
                self.metrics.record_outfit_built();
            }

            for item in &node.items {
                self.reconcile_item(item, node);
            }
        }
    }

    /// Point every item that an outfit uses at that outfit. The first outfit
    /// listing an item wins.
    pub fn link_outfit_membership(&mut self) {
        for gender in Gender::ALL {
            let ClothingCollection { items, outfits } = self.collections.collection_mut(gender);

            let mut owners: IndexMap<&str, OutfitId> = IndexMap::new();
            for (index, outfit) in outfits.iter().enumerate() {
                for component in &outfit.components {
                    owners
                        .entry(component.component_hash.as_str())
                        .or_insert(OutfitId(index));
                }
            }

            for item in items.iter_mut().filter(|item| item.parent_outfit.is_none()) {
                if let Some(id) = owners.get(item.unique_key.as_str()) {
                    item.parent_outfit = Some(*id);
                }
            }
        }
    }

    fn build_outfit(&self, data: &RawXmlOutfit, node: &RawXmlNode) -> Outfit {
        let mut outfit = Outfit {
            hash: data.unique_name_hash.clone(),
            localized_name: data
                .label_comment
                .clone()
                .unwrap_or_else(|| Placeholder::NotAvailable.as_str().to_string()),
            dlc_name: resolve_dlc_name(&node.dlc_name),
            text_label: String::new(),
            components: Vec::new(),
            is_complete: true,
        };

        let label = self
            .resolver
            .text_label(&data.unique_name_hash)
            .or_else(|| Some(data.text_label.as_str()).filter(|l| Placeholder::is_meaningful_label(l)));

        match label {
            Some(label) => {
                outfit.text_label = label.to_string();
                if let Some(name) = self.json_index.localized_name(label) {
                    outfit.localized_name = name.to_string();
                }
                tracing::debug!(
                    "Linked outfit {} with textLabel {} ({})",
                    outfit.hash,
                    outfit.text_label,
                    outfit.localized_name
                );
            }
            None => tracing::debug!("No textLabel found for outfit hash: {}", outfit.hash),
        }

        let components = data
            .components
            .iter()
            .map(|component| self.build_outfit_component(component, &outfit.dlc_name, true));
        let props = data
            .props
            .iter()
            .map(|prop| self.build_outfit_component(prop, &outfit.dlc_name, false));
        let built: Vec<OutfitComponent> = components.chain(props).collect();
        outfit.components = built;

        outfit
    }

    fn build_outfit_component(
        &self,
        reference: &RawXmlItem,
        outfit_dlc: &str,
        is_required: bool,
    ) -> OutfitComponent {
        let hash = reference.unique_name_hash.as_str();
        let raw_name = reference.label_comment.clone().unwrap_or_default();

        let mut component = OutfitComponent {
            component_hash: hash.to_string(),
            localized_name: raw_name.clone(),
            text_label: String::new(),
            details: ComponentDetails::default(),
            is_required,
            default_variant_index: None,
        };

        if let Some(label) = self.resolver.text_label(hash) {
            component.text_label = label.to_string();
            if let Some(name) = self.json_index.localized_name(label) {
                component.localized_name = name.to_string();
            }
        }

        let cached = self.component_cache.get(hash).or_else(|| {
            if component.text_label.is_empty() {
                None
            } else {
                self.component_cache.get(&component.text_label)
            }
        });

        match cached {
            Some(details) => {
                component.details = details.clone();
                if component.localized_name.is_empty() || component.localized_name == raw_name {
                    if let Some(variant) = component
                        .details
                        .variants
                        .iter()
                        .find(|v| !v.localized_name.is_empty())
                    {
                        component.localized_name = variant.localized_name.clone();
                    }
                }
            }
            None => {
                let mut details = match self.resolver.component_details(hash) {
                    Some(details) => details.clone(),
                    None => ComponentDetails {
                        component_type: resolve_component_type(&reference.type_code, hash)
                            .to_string(),
                        dlc_name: resolve_dlc_from_hash(hash, outfit_dlc),
                        ..ComponentDetails::default()
                    },
                };
                self.json_index.enrich(&mut details, &component.text_label);
                component.details = details;
            }
        }

        component.default_variant_index =
            component.details.variants.iter().position(|v| v.is_default);
        component
    }

    fn reconcile_item(&mut self, item: &RawXmlItem, node: &RawXmlNode) {
        let hash = &item.unique_name_hash;
        if hash.is_empty() {
            tracing::debug!("Skipping XML item without uniqueNameHash in {}", node.source_file);
            return;
        }

        let collection = self.collections.collection_mut(node.gender);

        // XML never overwrites a non-empty field
        if let Some(existing) = collection.find_by_key_mut(hash) {
            if existing.item_name.is_empty() {
                if let Some(name) = item
                    .label_comment
                    .as_deref()
                    .filter(|name| Placeholder::is_meaningful_label(name))
                {
                    existing.item_name = name.to_string();
                }
            }
            if existing.dlc_name.is_empty() {
                existing.dlc_name = resolve_dlc_from_hash(hash, &node.dlc_name);
                if existing.component_details.dlc_name.is_empty() {
                    existing.component_details.dlc_name = existing.dlc_name.clone();
                }
            }
            return;
        }

        let mut details = match self.resolver.component_details(hash) {
            Some(details) => details.clone(),
            None => details_from_xml_item(item, &node.dlc_name, self.metrics),
        };
        self.json_index.enrich(&mut details, &item.text_label);

        let mut new_item = ClothingItem::new(hash.clone(), node.gender);
        new_item.text_label = item.text_label.clone();
        new_item.item_name = item.label_comment.clone().unwrap_or_default();
        new_item.dlc_name = details.dlc_name.clone();
        new_item.component_details = details;

        tracing::debug!("Created {} item from XML: {}", node.gender, hash);
        collection.items.push(new_item);
        self.metrics.record_xml_only_item();
    }
}

/// Details for a metadata key the XML data doesn't know about
fn metadata_details(meta: &RawMetadataItem) -> ComponentDetails {
    let component_type = meta
        .component
        .filter(|m| m.internal_type != UNKNOWN_COMPONENT)
        .or_else(|| component_from_hash(&meta.key))
        .map(|m| m.internal_type)
        .unwrap_or(UNKNOWN_COMPONENT);

    ComponentDetails {
        component_type: component_type.to_string(),
        dlc_name: resolve_dlc_from_hash(&meta.key, ""),
        ..ComponentDetails::default()
    }
}

/// Overlay one JSON record onto a matched item. JSON names and IDs win.
fn apply_json_record(item: &mut ClothingItem, record: &RawJsonItem, metrics: &RunMetrics) {
    if !record.localized_name.is_empty() {
        item.item_name = record.localized_name.clone();
    }

    let details = &mut item.component_details;

    if let Some(id) = json_id(&record.drawable_id, "drawableId", &record.gxt_label, metrics) {
        if details.drawable_id != id {
            if details.drawable_id != UNSET_ID {
                tracing::info!(
                    "DrawableID mismatch for {}: XML={}, JSON={} - using JSON value",
                    item.unique_key,
                    details.drawable_id,
                    id
                );
            }
            details.drawable_id = id;
        }
    }

    if let Some(id) = json_id(&record.texture_id, "textureId", &record.gxt_label, metrics) {
        if details.texture_id != id {
            if details.texture_id != UNSET_ID {
                tracing::info!(
                    "TextureID mismatch for {}: XML={}, JSON={} - using JSON value",
                    item.unique_key,
                    details.texture_id,
                    id
                );
            }
            details.texture_id = id;
        }
    }

    if !details.has_known_type() && record.category != UNKNOWN_COMPONENT {
        details.component_type = record.category.clone();
    }

    if Placeholder::is_meaningful_label(&record.localized_name) {
        details.add_variant(details.texture_id, &record.localized_name);
    }
}

/// A JSON record with no matching item becomes its own item, keyed by its label
fn json_only_item(record: &RawJsonItem, gender: Gender, metrics: &RunMetrics) -> ClothingItem {
    let mut item = ClothingItem::new(record.gxt_label.clone(), gender);
    item.text_label = record.gxt_label.clone();
    item.item_name = record.localized_name.clone();

    let mut details = ComponentDetails {
        component_type: record.category.clone(),
        drawable_id: json_id(&record.drawable_id, "drawableId", &record.gxt_label, metrics)
            .unwrap_or(UNSET_ID),
        texture_id: json_id(&record.texture_id, "textureId", &record.gxt_label, metrics)
            .unwrap_or(UNSET_ID),
        ..ComponentDetails::default()
    };
    if Placeholder::is_meaningful_label(&record.localized_name) {
        details.add_variant(details.texture_id, &record.localized_name);
    }

    item.component_details = details;
    item
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::XmlItemKind;
    use crate::reference::find_component;
    use camino::Utf8PathBuf;
    use std::sync::atomic::Ordering;

    fn meta(key: &str, value: &str) -> RawMetadataItem {
        RawMetadataItem {
            key: key.to_string(),
            value: value.to_string(),
            gender: Gender::from_key(key).unwrap(),
            component: None,
            dlc_name: String::new(),
        }
    }

    fn json(file: &str, drawable: &str, texture: &str, gxt: &str, name: &str) -> RawJsonItem {
        RawJsonItem {
            source_file: Utf8PathBuf::from(file),
            drawable_id: drawable.to_string(),
            texture_id: texture.to_string(),
            gxt_label: gxt.to_string(),
            localized_name: name.to_string(),
            category: "SHOES".to_string(),
        }
    }

    fn xml_item(hash: &str, label: &str, drawable: &str, comment: Option<&str>) -> RawXmlItem {
        RawXmlItem {
            label_comment: comment.map(str::to_string),
            text_label: label.to_string(),
            unique_name_hash: hash.to_string(),
            drawable_index: drawable.to_string(),
            texture_index: "0".to_string(),
            type_code: "PV_COMP_FEET".to_string(),
            ..RawXmlItem::new(XmlItemKind::Component)
        }
    }

    fn xml_node(gender: Gender, items: Vec<RawXmlItem>, outfits: Vec<RawXmlOutfit>) -> RawXmlNode {
        RawXmlNode {
            source_file: Utf8PathBuf::from("xmlfiles/test.meta"),
            ped_name: match gender {
                Gender::Male => "mp_m_freemode_01".to_string(),
                Gender::Female => "mp_f_freemode_01".to_string(),
            },
            dlc_name: "mpgunrunning".to_string(),
            full_dlc_name: String::new(),
            gender,
            outfits,
            items,
        }
    }

    fn run(sources: &SourceData) -> (GenderCollections, RunMetrics) {
        let metrics = RunMetrics::new();
        let resolver = IdentityResolver::build(&sources.xml_nodes, &metrics);
        let collections = EnrichmentEngine::new(sources, &resolver, &metrics).run();
        (collections, metrics)
    }

    #[test]
    fn test_metadata_only_items() {
        let sources = SourceData {
            metadata: vec![
                meta("DLC_MP_GR_M_FEET_1_7", "V1"),
                meta("DLC_MP_GR_F_BERD_2_9", "V1"),
            ],
            ..Default::default()
        };

        let (collections, metrics) = run(&sources);

        assert_eq!(collections.male.items.len(), 1);
        assert_eq!(collections.female.items.len(), 1);

        let male = &collections.male.items[0];
        assert_eq!(male.pairing_value, "V1");
        assert_eq!(male.component_details.component_type, "SHOES");
        assert_eq!(male.component_details.drawable_id, UNSET_ID);
        assert_eq!(male.dlc_name, "Gunrunning");
        assert_eq!(metrics.lookup_misses.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_metadata_component_token_is_used() {
        let mut item = meta("CLO_X_M_SOMETHING", "V2");
        item.component = find_component("PHEAD");

        let sources = SourceData {
            metadata: vec![item],
            ..Default::default()
        };
        let (collections, _) = run(&sources);
        assert_eq!(collections.male.items[0].component_details.component_type, "HAT");
    }

    #[test]
    fn test_unknown_component_fallback() {
        let sources = SourceData {
            metadata: vec![meta("CLO_X_M_NOTHING", "V3")],
            ..Default::default()
        };
        let (collections, _) = run(&sources);
        assert_eq!(
            collections.male.items[0].component_details.component_type,
            UNKNOWN_COMPONENT
        );
    }

    #[test]
    fn test_metadata_dlc_overrides_xml_dlc() {
        let mut item = meta("DLC_MP_GR_M_FEET_1_7", "V1");
        item.dlc_name = "Tuner".to_string();

        let sources = SourceData {
            metadata: vec![item],
            xml_nodes: vec![xml_node(
                Gender::Male,
                vec![xml_item("DLC_MP_GR_M_FEET_1_7", "CLO_GRM_F_1_7", "5", None)],
                Vec::new(),
            )],
            ..Default::default()
        };

        let (collections, _) = run(&sources);
        let item = &collections.male.items[0];
        assert_eq!(item.dlc_name, "Tuner");
        assert_eq!(item.component_details.dlc_name, "Tuner");
        assert_eq!(item.text_label, "CLO_GRM_F_1_7");
    }

    #[test]
    fn test_json_ids_win_over_xml() {
        let sources = SourceData {
            metadata: vec![meta("DLC_MP_GR_M_FEET_1_7", "V1")],
            json_items: vec![json("male_shoes.json", "9", "3", "CLO_GRM_F_1_7", "Black Boots")],
            xml_nodes: vec![xml_node(
                Gender::Male,
                vec![xml_item("DLC_MP_GR_M_FEET_1_7", "CLO_GRM_F_1_7", "5", Some("Boots"))],
                Vec::new(),
            )],
        };

        let (collections, metrics) = run(&sources);

        assert_eq!(collections.male.items.len(), 1);
        let item = &collections.male.items[0];
        assert_eq!(item.component_details.drawable_id, 9);
        assert_eq!(item.component_details.texture_id, 3);
        assert_eq!(item.item_name, "Black Boots");
        assert_eq!(item.component_details.variants.len(), 1);
        assert!(item.component_details.variants[0].is_default);
        assert_eq!(metrics.json_enrichments.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.xml_only_items.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_json_gender_comes_from_filename() {
        let sources = SourceData {
            json_items: vec![
                json("female_shoes.json", "1", "0", "CLO_F_1", "Heels"),
                json("male_shoes.json", "1", "0", "CLO_M_1", "Loafers"),
            ],
            ..Default::default()
        };

        let (collections, metrics) = run(&sources);

        assert_eq!(collections.female.items[0].unique_key, "CLO_F_1");
        assert_eq!(collections.female.items[0].item_name, "Heels");
        assert_eq!(collections.male.items[0].unique_key, "CLO_M_1");
        assert_eq!(metrics.json_only_items.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_json_pass_caches_details_by_label_and_name() {
        let sources = SourceData {
            metadata: vec![meta("DLC_MP_GR_M_FEET_1_7", "V1")],
            json_items: vec![json("male_shoes.json", "9", "3", "CLO_GRM_F_1_7", "Black Boots")],
            ..Default::default()
        };
        let metrics = RunMetrics::new();
        let resolver = IdentityResolver::build(&sources.xml_nodes, &metrics);
        let mut engine = EnrichmentEngine::new(&sources, &resolver, &metrics);

        engine.seed_from_metadata();
        assert_eq!(engine.collections().male.total_items(), 1);
        assert!(engine.cached_details("CLO_GRM_F_1_7").is_none());

        engine.enrich_from_json();
        let by_label = engine.cached_details("CLO_GRM_F_1_7").map(|d| d.drawable_id);
        let by_name = engine.cached_details("Black Boots").map(|d| d.drawable_id);
        assert_eq!(by_label, Some(9));
        assert_eq!(by_name, Some(9));
        assert!(engine.cached_details("").is_none());
    }

    #[test]
    fn test_json_without_label_never_creates_item() {
        let sources = SourceData {
            json_items: vec![json("male_shoes.json", "1", "0", "", "Orphan")],
            ..Default::default()
        };

        let (collections, _) = run(&sources);
        assert_eq!(collections.total_items(), 0);
    }

    #[test]
    fn test_bad_json_id_keeps_existing_value() {
        let sources = SourceData {
            metadata: vec![meta("DLC_MP_GR_M_FEET_1_7", "V1")],
            json_items: vec![json("male_shoes.json", "x1", "-2", "CLO_GRM_F_1_7", "")],
            xml_nodes: vec![xml_node(
                Gender::Male,
                vec![xml_item("DLC_MP_GR_M_FEET_1_7", "CLO_GRM_F_1_7", "5", None)],
                Vec::new(),
            )],
        };

        let (collections, metrics) = run(&sources);
        let details = &collections.male.items[0].component_details;
        assert_eq!(details.drawable_id, 5);
        assert_eq!(details.texture_id, 0);
        assert!(details.variants.is_empty());
        assert_eq!(metrics.int_parse_failures.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_xml_fills_only_empty_fields() {
        let sources = SourceData {
            metadata: vec![
                meta("DLC_MP_GR_M_FEET_1_7", "V1"),
                meta("CLO_X_M_LOWR_1", "V2"),
            ],
            json_items: vec![json("male_shoes.json", "9", "0", "CLO_GRM_F_1_7", "Black Boots")],
            xml_nodes: vec![xml_node(
                Gender::Male,
                vec![
                    xml_item("DLC_MP_GR_M_FEET_1_7", "CLO_GRM_F_1_7", "5", Some("Old Name")),
                    xml_item("CLO_X_M_LOWR_1", "", "2", Some("Cargo Pants")),
                ],
                Vec::new(),
            )],
        };

        let (collections, _) = run(&sources);

        let boots = collections.male.find_by_key("DLC_MP_GR_M_FEET_1_7").unwrap();
        assert_eq!(boots.item_name, "Black Boots");

        let pants = collections.male.find_by_key("CLO_X_M_LOWR_1").unwrap();
        assert_eq!(pants.item_name, "Cargo Pants");
        assert_eq!(pants.dlc_name, "Gunrunning");
    }

    #[test]
    fn test_xml_only_item_created() {
        let sources = SourceData {
            json_items: vec![json("female_shoes.json", "4", "1", "CLO_GRF_F_2_1", "Sneakers")],
            xml_nodes: vec![xml_node(
                Gender::Female,
                vec![xml_item("DLC_MP_GR_F_FEET_2_1", "CLO_GRF_F_2_1", "5", Some("Trainers"))],
                Vec::new(),
            )],
            ..Default::default()
        };

        let (collections, metrics) = run(&sources);

        // JSON-only item keyed by label, then the XML item keyed by hash
        assert_eq!(collections.female.items.len(), 2);
        let item = collections.female.find_by_key("DLC_MP_GR_F_FEET_2_1").unwrap();
        assert_eq!(item.item_name, "Trainers");
        assert_eq!(item.component_details.drawable_id, 4);
        assert_eq!(item.component_details.texture_id, 1);
        assert_eq!(item.dlc_name, "Gunrunning");
        assert_eq!(metrics.xml_only_items.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_outfits_components_and_membership() {
        let outfit = RawXmlOutfit {
            label_comment: Some("Gunrunner".to_string()),
            lock_hash: String::new(),
            text_label: String::new(),
            unique_name_hash: "DLC_MP_GR_M_OUTFIT_0".to_string(),
            components: vec![RawXmlItem {
                unique_name_hash: "DLC_MP_GR_M_FEET_1_7".to_string(),
                type_code: "PV_COMP_FEET".to_string(),
                ..RawXmlItem::new(XmlItemKind::Component)
            }],
            props: vec![RawXmlItem {
                unique_name_hash: "DLC_MP_GR_M_PHEAD_0_0".to_string(),
                type_code: "ANCHOR_HEAD".to_string(),
                ..RawXmlItem::new(XmlItemKind::Prop)
            }],
        };

        let sources = SourceData {
            metadata: vec![meta("DLC_MP_GR_M_FEET_1_7", "V1")],
            json_items: vec![json("male_shoes.json", "9", "0", "CLO_GRM_F_1_7", "Black Boots")],
            xml_nodes: vec![xml_node(
                Gender::Male,
                vec![xml_item("DLC_MP_GR_M_FEET_1_7", "CLO_GRM_F_1_7", "5", None)],
                vec![outfit],
            )],
        };

        let (collections, metrics) = run(&sources);

        assert_eq!(collections.male.outfits.len(), 1);
        let outfit = &collections.male.outfits[0];
        assert_eq!(outfit.localized_name, "Gunrunner");
        assert_eq!(outfit.dlc_name, "Gunrunning");
        assert!(outfit.is_complete);
        assert_eq!(outfit.components.len(), 2);

        let boots = &outfit.components[0];
        assert!(boots.is_required);
        assert_eq!(boots.text_label, "CLO_GRM_F_1_7");
        assert_eq!(boots.localized_name, "Black Boots");
        assert_eq!(boots.details.drawable_id, 9);
        assert_eq!(boots.default_variant_index, Some(0));

        let hat = &outfit.components[1];
        assert!(!hat.is_required);
        assert_eq!(hat.details.component_type, "HAT");

        let item = collections.male.find_by_key("DLC_MP_GR_M_FEET_1_7").unwrap();
        assert_eq!(item.parent_outfit, Some(OutfitId(0)));
        assert_eq!(metrics.outfits_built.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_outfit_without_comment_is_not_available() {
        let outfit = RawXmlOutfit {
            label_comment: None,
            lock_hash: String::new(),
            text_label: String::new(),
            unique_name_hash: "DLC_MP_GR_F_OUTFIT_1".to_string(),
            components: Vec::new(),
            props: Vec::new(),
        };
        let sources = SourceData {
            xml_nodes: vec![xml_node(Gender::Female, Vec::new(), vec![outfit])],
            ..Default::default()
        };

        let (collections, _) = run(&sources);
        assert_eq!(collections.female.outfits[0].localized_name, "[NA]");
        assert_eq!(collections.female.outfits[0].text_label, "");
    }

    #[test]
    fn test_json_index_lookups() {
        let records = vec![
            json("male_shoes.json", "1", "0", "CLO_A", "NULL"),
            json("male_shoes.json", "1", "1", "CLO_A", "Boots"),
            json("male_shoes.json", "2", "0", "", "Orphan"),
        ];
        let index = JsonLabelIndex::new(&records);

        assert_eq!(index.len(), 1);
        assert_eq!(index.first("CLO_A").map(|r| r.texture_id.as_str()), Some("0"));
        assert_eq!(index.localized_name("CLO_A"), Some("Boots"));
        assert_eq!(index.localized_name("CLO_MISSING"), None);

        let mut details = ComponentDetails::default();
        assert!(!index.enrich(&mut details, "NO_LABEL"));
        assert!(index.enrich(&mut details, "CLO_A"));
        assert_eq!(details.drawable_id, 1);
        assert_eq!(details.component_type, "SHOES");
        assert!(details.variants.is_empty());
    }
}
