//! Records exactly as the source readers produce them, before any merging

use camino::Utf8PathBuf;

use crate::models::clothing::Gender;
use crate::reference::ComponentMapping;

/// One key/value pair from the script metadata file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMetadataItem {
    pub key: String,
    /// Pairing value shared by the male and female version of an item
    pub value: String,
    pub gender: Gender,
    /// Category inferred from the legacy token in the key
    pub component: Option<&'static ComponentMapping>,
    /// DLC display name inferred from the key, empty when unknown
    pub dlc_name: String,
}

/// One record from a JSON lookup file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawJsonItem {
    pub source_file: Utf8PathBuf,
    pub drawable_id: String,
    pub texture_id: String,
    pub gxt_label: String,
    pub localized_name: String,
    /// Internal component type derived from the filename
    pub category: String,
}

impl RawJsonItem {
    pub fn gender(&self) -> Gender {
        Gender::from_json_filename(self.source_file.file_name().unwrap_or(self.source_file.as_str()))
    }
}

/// Whether an XML entry came from the component list or the prop list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum XmlItemKind {
    Component,
    Prop,
}

/// One `<Item>` from an XML shop file, or a component reference inside an outfit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawXmlItem {
    /// Text of the comment directly preceding the item
    pub label_comment: Option<String>,
    pub lock_hash: String,
    pub text_label: String,
    pub unique_name_hash: String,
    pub drawable_index: String,
    pub texture_index: String,
    /// `eCompType` for components, `eAnchorPoint` for props
    pub type_code: String,
    pub kind: XmlItemKind,
}

impl RawXmlItem {
    pub fn new(kind: XmlItemKind) -> Self {
        Self {
            label_comment: None,
            lock_hash: String::new(),
            text_label: String::new(),
            unique_name_hash: String::new(),
            drawable_index: String::new(),
            texture_index: String::new(),
            type_code: String::new(),
            kind,
        }
    }
}

/// One outfit definition from an XML shop file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawXmlOutfit {
    pub label_comment: Option<String>,
    pub lock_hash: String,
    pub text_label: String,
    pub unique_name_hash: String,
    pub components: Vec<RawXmlItem>,
    pub props: Vec<RawXmlItem>,
}

/// One parsed XML shop file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawXmlNode {
    pub source_file: Utf8PathBuf,
    pub ped_name: String,
    pub dlc_name: String,
    pub full_dlc_name: String,
    pub gender: Gender,
    pub outfits: Vec<RawXmlOutfit>,
    pub items: Vec<RawXmlItem>,
}

/// Everything read from the three sources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceData {
    pub metadata: Vec<RawMetadataItem>,
    pub json_items: Vec<RawJsonItem>,
    pub xml_nodes: Vec<RawXmlNode>,
}

impl SourceData {
    pub fn metadata_for(&self, gender: Gender) -> impl Iterator<Item = &RawMetadataItem> {
        self.metadata.iter().filter(move |item| item.gender == gender)
    }

    pub fn xml_nodes_for(&self, gender: Gender) -> impl Iterator<Item = &RawXmlNode> {
        self.xml_nodes.iter().filter(move |node| node.gender == gender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_item(path: &str) -> RawJsonItem {
        RawJsonItem {
            source_file: Utf8PathBuf::from(path),
            drawable_id: "1".to_string(),
            texture_id: "0".to_string(),
            gxt_label: "CLO_X".to_string(),
            localized_name: "Thing".to_string(),
            category: "SHOES".to_string(),
        }
    }

    #[test]
    fn test_json_gender_uses_filename_only() {
        assert_eq!(json_item("data/female_shoes.json").gender(), Gender::Female);
        assert_eq!(json_item("female_data/male_shoes.json").gender(), Gender::Male);
    }

    #[test]
    fn test_metadata_filter_by_gender() {
        let item = |key: &str, gender| RawMetadataItem {
            key: key.to_string(),
            value: "V1".to_string(),
            gender,
            component: None,
            dlc_name: String::new(),
        };

        let data = SourceData {
            metadata: vec![
                item("A_M_1", Gender::Male),
                item("A_F_1", Gender::Female),
                item("B_M_1", Gender::Male),
            ],
            ..Default::default()
        };

        assert_eq!(data.metadata_for(Gender::Male).count(), 2);
        assert_eq!(data.metadata_for(Gender::Female).count(), 1);
    }
}
