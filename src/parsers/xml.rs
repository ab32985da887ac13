use camino::Utf8Path;
use roxmltree::Node;

use super::SourceError;
use super::files::{collect_files_with_extension, parse_xml, read_document};
use crate::metrics::RunMetrics;
use crate::models::{Gender, RawXmlItem, RawXmlNode, RawXmlOutfit, XmlItemKind};

/// Load every shop XML file under `dir`.
///
/// Files that can't be read or parsed are logged and skipped, as are files
/// whose pedName carries no gender marker.
///
/// # Errors
/// `SourceUnavailable` when the directory doesn't exist
pub fn load_xml_dir(
    dir: &Utf8Path,
    extension: &str,
    metrics: &RunMetrics,
) -> Result<Vec<RawXmlNode>, SourceError> {
    let files = collect_files_with_extension(dir, &[extension])?;
    metrics.record_files_scanned(files.len());
    tracing::info!("Found {} XML files in {}", files.len(), dir);

    let mut nodes = Vec::new();
    for path in &files {
        let parsed = read_document(path).and_then(|text| parse_xml_document(&text, path));
        match parsed {
            Ok(Some(node)) => {
                tracing::debug!(
                    "Parsed {} ({}): {} outfits, {} items",
                    path,
                    node.gender,
                    node.outfits.len(),
                    node.items.len()
                );
                metrics.record_file_parsed();
                metrics.record_xml_node();
                nodes.push(node);
            }
            Ok(None) => {
                metrics.record_file_parsed();
                metrics.record_xml_node_dropped();
            }
            Err(e) => {
                tracing::error!("Skipping XML file: {}", e);
                metrics.record_file_skipped();
            }
        }
    }

    Ok(nodes)
}

/// Parse one shop XML document.
///
/// Returns `Ok(None)` when the pedName has neither `_m_` nor `_f_`.
pub fn parse_xml_document(text: &str, path: &Utf8Path) -> Result<Option<RawXmlNode>, SourceError> {
    let doc = parse_xml(text, path)?;
    let root = doc.root_element();

    let ped_name = child_text(root, "pedName");
    let Some(gender) = Gender::from_ped_name(&ped_name) else {
        tracing::warn!(
            "Dropping {}: pedName '{}' has no gender marker",
            path,
            ped_name
        );
        return Ok(None);
    };

    let outfits = child(root, "pedOutfits")
        .map(|section| {
            labelled_items(section)
                .map(|(label, node)| parse_outfit(node, label))
                .collect()
        })
        .unwrap_or_default();

    let mut items: Vec<RawXmlItem> = child(root, "pedComponents")
        .map(|section| {
            labelled_items(section)
                .map(|(label, node)| parse_shop_item(node, label, XmlItemKind::Component))
                .collect()
        })
        .unwrap_or_default();

    if let Some(section) = child(root, "pedProps") {
        items.extend(
            labelled_items(section)
                .map(|(label, node)| parse_shop_item(node, label, XmlItemKind::Prop)),
        );
    }

    Ok(Some(RawXmlNode {
        source_file: path.to_path_buf(),
        ped_name,
        dlc_name: child_text(root, "dlcName"),
        full_dlc_name: child_text(root, "fullDlcName"),
        gender,
        outfits,
        items,
    }))
}

fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|n| n.has_tag_name(name))
}

fn child_text(node: Node, name: &str) -> String {
    child(node, name)
        .and_then(|n| n.text())
        .map(|t| t.trim().to_string())
        .unwrap_or_default()
}

/// Index fields keep their number in a `value` attribute, older files in the text
fn child_value(node: Node, name: &str) -> String {
    let Some(field) = child(node, name) else {
        return String::new();
    };

    field
        .attribute("value")
        .or_else(|| field.text())
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

/// Walk the `Item` children of a section, pairing each with the comment that
/// directly precedes it. A comment is consumed by the next item only.
fn labelled_items<'a, 'input>(
    section: Node<'a, 'input>,
) -> impl Iterator<Item = (Option<String>, Node<'a, 'input>)> {
    let mut pending: Option<String> = None;
    section.children().filter_map(move |node| {
        if node.is_comment() {
            pending = node.text().map(|t| t.trim().to_string());
            None
        } else if node.has_tag_name("Item") {
            Some((pending.take(), node))
        } else {
            None
        }
    })
}

fn parse_outfit(node: Node, label_comment: Option<String>) -> RawXmlOutfit {
    let references = |section: &str, kind: XmlItemKind, type_field: &str| -> Vec<RawXmlItem> {
        child(node, section)
            .map(|list| {
                list.children()
                    .filter(|n| n.has_tag_name("Item"))
                    .map(|entry| RawXmlItem {
                        unique_name_hash: child_text(entry, "nameHash"),
                        type_code: child_text(entry, type_field),
                        ..RawXmlItem::new(kind)
                    })
                    .collect()
            })
            .unwrap_or_default()
    };

    RawXmlOutfit {
        label_comment,
        lock_hash: child_text(node, "lockHash"),
        text_label: child_text(node, "textLabel"),
        unique_name_hash: child_text(node, "uniqueNameHash"),
        components: references("includedPedComponents", XmlItemKind::Component, "eCompType"),
        props: references("includedPedProps", XmlItemKind::Prop, "eAnchorPoint"),
    }
}

fn parse_shop_item(node: Node, label_comment: Option<String>, kind: XmlItemKind) -> RawXmlItem {
    let (index_field, type_field) = match kind {
        XmlItemKind::Component => ("localDrawableIndex", "eCompType"),
        XmlItemKind::Prop => ("propIndex", "eAnchorPoint"),
    };

    RawXmlItem {
        label_comment,
        lock_hash: child_text(node, "lockHash"),
        text_label: child_text(node, "textLabel"),
        unique_name_hash: child_text(node, "uniqueNameHash"),
        drawable_index: child_value(node, index_field),
        texture_index: child_value(node, "textureIndex"),
        type_code: child_text(node, type_field),
        kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SHOP: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ShopPedApparel>
  <pedName>mp_f_freemode_01</pedName>
  <dlcName>mpgunrunning</dlcName>
  <fullDlcName>mp_f_freemode_01_mpgunrunning</fullDlcName>
  <pedOutfits>
    <!-- Gunrunner Outfit -->
    <Item>
      <lockHash />
      <textLabel>OUTFIT_GR_F_0</textLabel>
      <uniqueNameHash>DLC_MP_GR_F_OUTFIT_0</uniqueNameHash>
      <includedPedComponents>
        <Item>
          <nameHash>DLC_MP_GR_F_FEET_1_7</nameHash>
          <eCompType>PV_COMP_FEET</eCompType>
        </Item>
      </includedPedComponents>
      <includedPedProps>
        <Item>
          <nameHash>DLC_MP_GR_F_PHEAD_0_0</nameHash>
          <eAnchorPoint>ANCHOR_HEAD</eAnchorPoint>
        </Item>
      </includedPedProps>
    </Item>
    <Item>
      <uniqueNameHash>DLC_MP_GR_F_OUTFIT_1</uniqueNameHash>
    </Item>
  </pedOutfits>
  <pedComponents>
    <!-- Black Boots -->
    <Item>
      <lockHash>0</lockHash>
      <textLabel>CLO_GRF_F_1_7</textLabel>
      <uniqueNameHash>DLC_MP_GR_F_FEET_1_7</uniqueNameHash>
      <localDrawableIndex value="5" />
      <textureIndex value="7" />
      <eCompType>PV_COMP_FEET</eCompType>
    </Item>
    <Item>
      <textLabel>CLO_GRF_L_2_0</textLabel>
      <uniqueNameHash>DLC_MP_GR_F_LOWR_2_0</uniqueNameHash>
      <localDrawableIndex>3</localDrawableIndex>
      <textureIndex>0</textureIndex>
      <eCompType>PV_COMP_LOWR</eCompType>
    </Item>
  </pedComponents>
  <pedProps>
    <!-- Ballistic Helmet -->
    <Item>
      <textLabel>CLO_GRF_PH_0_0</textLabel>
      <uniqueNameHash>DLC_MP_GR_F_PHEAD_0_0</uniqueNameHash>
      <propIndex value="2" />
      <textureIndex value="0" />
      <eAnchorPoint>ANCHOR_HEAD</eAnchorPoint>
    </Item>
  </pedProps>
</ShopPedApparel>"#;

    fn parse(text: &str) -> Option<RawXmlNode> {
        parse_xml_document(text, Utf8Path::new("xmlfiles/mp_f_gr.meta")).unwrap()
    }

    #[test]
    fn test_node_header() {
        let node = parse(SHOP).unwrap();
        assert_eq!(node.gender, Gender::Female);
        assert_eq!(node.ped_name, "mp_f_freemode_01");
        assert_eq!(node.dlc_name, "mpgunrunning");
        assert_eq!(node.full_dlc_name, "mp_f_freemode_01_mpgunrunning");
    }

    #[test]
    fn test_outfits_and_references() {
        let node = parse(SHOP).unwrap();
        assert_eq!(node.outfits.len(), 2);

        let outfit = &node.outfits[0];
        assert_eq!(outfit.label_comment.as_deref(), Some("Gunrunner Outfit"));
        assert_eq!(outfit.text_label, "OUTFIT_GR_F_0");
        assert_eq!(outfit.unique_name_hash, "DLC_MP_GR_F_OUTFIT_0");
        assert_eq!(outfit.components.len(), 1);
        assert_eq!(outfit.components[0].unique_name_hash, "DLC_MP_GR_F_FEET_1_7");
        assert_eq!(outfit.components[0].type_code, "PV_COMP_FEET");
        assert_eq!(outfit.props.len(), 1);
        assert_eq!(outfit.props[0].type_code, "ANCHOR_HEAD");
        assert_eq!(outfit.props[0].kind, XmlItemKind::Prop);
    }

    #[test]
    fn test_comment_is_consumed_by_next_item() {
        let node = parse(SHOP).unwrap();
        assert_eq!(node.outfits[1].label_comment, None);
        assert_eq!(node.items[0].label_comment.as_deref(), Some("Black Boots"));
        assert_eq!(node.items[1].label_comment, None);
        assert_eq!(node.items[2].label_comment.as_deref(), Some("Ballistic Helmet"));
    }

    #[test]
    fn test_index_fields_attribute_or_text() {
        let node = parse(SHOP).unwrap();
        assert_eq!(node.items.len(), 3);

        assert_eq!(node.items[0].drawable_index, "5");
        assert_eq!(node.items[0].texture_index, "7");
        assert_eq!(node.items[1].drawable_index, "3");
        assert_eq!(node.items[1].texture_index, "0");

        let prop = &node.items[2];
        assert_eq!(prop.kind, XmlItemKind::Prop);
        assert_eq!(prop.drawable_index, "2");
        assert_eq!(prop.type_code, "ANCHOR_HEAD");
    }

    #[test]
    fn test_node_without_gender_is_dropped() {
        let text = "<ShopPedApparel><pedName>player_zero</pedName></ShopPedApparel>";
        assert!(parse(text).is_none());
    }

    #[test]
    fn test_malformed_xml() {
        let err = parse_xml_document("<ShopPedApparel>", Utf8Path::new("bad.meta")).unwrap_err();
        assert!(matches!(err, SourceError::ParseMalformed { .. }));
    }
}
