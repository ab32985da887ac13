use camino::{Utf8Path, Utf8PathBuf};
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::fs;
use thiserror::Error;

use super::pairing::{PairingSummary, pair_by_value};
use crate::models::{
    ClothingCollection, ClothingItem, ComponentDetails, Gender, GenderCollections, Outfit,
    OutfitComponent, Placeholder, UNSET_ID, printable_ascii,
};
use crate::reference::dlc_display_label;

const LINE_WIDTH: usize = 80;
const UNKNOWN_DLC: &str = "Unknown DLC";

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report {path}: {source}")]
    OutputWrite {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to format report: {0}")]
    Format(#[from] fmt::Error),
}

/// Renders the text reports for one run
///
/// Pairing is computed once on construction. Rendering never touches the
/// filesystem; [`write_report`] does that.
pub struct ReportWriter<'a> {
    collections: &'a GenderCollections,
    pairing: PairingSummary<'a>,
}

impl<'a> ReportWriter<'a> {
    pub fn new(collections: &'a GenderCollections) -> Self {
        Self {
            collections,
            pairing: pair_by_value(collections),
        }
    }

    pub fn pairing(&self) -> &PairingSummary<'a> {
        &self.pairing
    }

    /// The main report: gender swap pairs, then each gender's items,
    /// outfits and DLC breakdown
    pub fn render_main_report(&self) -> Result<String, ReportError> {
        let mut out = String::new();

        write_header(&mut out, "GENDER SWAP CLOTHING PAIRS (VALUE-BASED MATCHING)", 0)?;
        writeln!(out, "This section shows clothing items that can be gender-swapped.")?;
        writeln!(out, "Items with the same 'value' from script metadata are gender swap pairs.")?;
        writeln!(out)?;
        self.write_pairs(&mut out)?;
        write_separator(&mut out, 0)?;

        for gender in Gender::ALL {
            let title = match gender {
                Gender::Male => "MALE CLOTHING ITEMS",
                Gender::Female => "FEMALE CLOTHING ITEMS",
            };
            write_header(&mut out, title, 0)?;
            write_collection(&mut out, self.collections.collection(gender), gender)?;
            if gender == Gender::Male {
                write_separator(&mut out, 0)?;
            }
        }

        Ok(out)
    }

    /// Every item, grouped by DLC within each gender
    pub fn render_items_by_dlc(&self) -> Result<String, ReportError> {
        let mut out = String::new();
        write_header(&mut out, "ITEMS BY DLC", 0)?;

        for gender in Gender::ALL {
            let collection = self.collections.collection(gender);
            for (dlc, items) in collection.group_items_by_dlc() {
                writeln!(out, "{} ({}, {} items):", dlc_label(dlc), gender, items.len())?;
                for item in items {
                    write_item(&mut out, collection, item, 2)?;
                }
                writeln!(out)?;
            }
        }

        Ok(out)
    }

    /// Every item, grouped by component type within each gender
    pub fn render_items_by_component(&self) -> Result<String, ReportError> {
        let mut out = String::new();
        write_header(&mut out, "ITEMS BY COMPONENT", 0)?;

        for gender in Gender::ALL {
            let collection = self.collections.collection(gender);
            for (component_type, items) in collection.group_items_by_component() {
                writeln!(
                    out,
                    "{} [{}] ({}, {} items):",
                    clean_component_type_name(component_type),
                    printable_ascii(component_type),
                    gender,
                    items.len()
                )?;
                for item in items {
                    write_item(&mut out, collection, item, 2)?;
                }
                writeln!(out)?;
            }
        }

        Ok(out)
    }

    /// Every outfit, grouped by DLC within each gender
    pub fn render_outfits_by_dlc(&self) -> Result<String, ReportError> {
        let mut out = String::new();
        write_header(&mut out, "OUTFITS BY DLC", 0)?;

        for gender in Gender::ALL {
            for (dlc, outfits) in self.collections.collection(gender).group_outfits_by_dlc() {
                writeln!(out, "{} ({}, {} outfits):", dlc_label(dlc), gender, outfits.len())?;
                for outfit in outfits {
                    write_outfit(&mut out, outfit, 2)?;
                    write_separator(&mut out, 2)?;
                }
                writeln!(out)?;
            }
        }

        Ok(out)
    }

    fn write_pairs(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "GENDER SWAP PAIRS (Based on Script Metadata Values):")?;
        writeln!(out, "{}", "=".repeat(51))?;
        writeln!(out)?;

        for pair in &self.pairing.pairs {
            let value = printable_ascii(pair.value);
            writeln!(out, "GENDER SWAP PAIR - Value: {}", value)?;
            writeln!(out, "{}", "=".repeat(47))?;

            writeln!(out, "MALE VERSION:")?;
            write_pair_item(out, pair.male, 2)?;
            writeln!(out)?;
            writeln!(out, "FEMALE VERSION:")?;
            write_pair_item(out, pair.female, 2)?;

            writeln!(out)?;
            writeln!(
                out,
                "  [OK] VALID GENDER SWAP: Same value ({}) but opposite genders",
                value
            )?;
            writeln!(out)?;
            writeln!(out, "{}", "-".repeat(50))?;
            writeln!(out)?;
        }

        writeln!(out)?;
        writeln!(out, "GENDER SWAP STATISTICS:")?;
        writeln!(out, "{}", "=".repeat(22))?;
        writeln!(out, "Matched Gender Swap Pairs: {}", self.pairing.matched())?;
        writeln!(out, "Male Only Items: {}", self.pairing.male_only)?;
        writeln!(out, "Female Only Items: {}", self.pairing.female_only)?;
        writeln!(out, "Total Unique Values: {}", self.pairing.unique_values)?;
        writeln!(out)
    }
}

/// Write a rendered report, replacing any previous file.
///
/// # Errors
/// `OutputWrite` when the file can't be written
pub fn write_report(path: &Utf8Path, contents: &str) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|source| ReportError::OutputWrite {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!("Wrote report: {}", path);
    Ok(())
}

/// Human-readable component type: trailing digits and underscores are
/// dropped, then a few internal codes get friendlier names.
///
/// `TORSO_2` -> `Torso`, `FEET` -> `Shoes`, `` -> `Unknown`
pub fn clean_component_type_name(component_type: &str) -> String {
    let trimmed = component_type.trim_end_matches(|c: char| c == '_' || c.is_ascii_digit());
    if trimmed.is_empty() {
        return "Unknown".to_string();
    }

    let lower = printable_ascii(trimmed).to_ascii_lowercase();
    let mut chars = lower.chars();
    let title = match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => return "Unknown".to_string(),
    };

    match title.as_str() {
        "Feet" => "Shoes",
        "Berd" => "Mask",
        "Head" => "Hat",
        "Eyes" => "Glasses",
        "Ears" => "Earrings",
        "Hand" => "Gloves",
        "Wrist" => "Watch",
        "Jbib" | "Accs" => "Accessory",
        "Task" => "Gear",
        "Decl" => "Badge",
        other => other,
    }
    .to_string()
}

fn dlc_label(name: &str) -> String {
    if name.is_empty() {
        UNKNOWN_DLC.to_string()
    } else {
        printable_ascii(&dlc_display_label(name))
    }
}

fn id_or_not_available(id: i32) -> String {
    if id == UNSET_ID {
        "Not Available".to_string()
    } else {
        id.to_string()
    }
}

fn or_not_available(value: &str) -> String {
    if value.is_empty() {
        Placeholder::NotAvailable.as_str().to_string()
    } else {
        printable_ascii(value)
    }
}

fn indent(out: &mut String, width: usize) -> fmt::Result {
    write!(out, "{:width$}", "", width = width)
}

fn write_separator(out: &mut String, width: usize) -> fmt::Result {
    indent(out, width)?;
    writeln!(out, "{}", "-".repeat(LINE_WIDTH.saturating_sub(width)))
}

fn write_header(out: &mut String, title: &str, width: usize) -> fmt::Result {
    write_separator(out, width)?;
    indent(out, width)?;
    writeln!(out, "{}", title)?;
    write_separator(out, width)
}

fn write_pair_item(out: &mut String, item: &ClothingItem, width: usize) -> fmt::Result {
    let details = &item.component_details;
    let lines = [
        ("Name", or_not_available(&item.item_name)),
        ("GXT Label", or_not_available(&item.text_label)),
        ("Key", printable_ascii(&item.unique_key)),
        ("Component Type", clean_component_type_name(&details.component_type)),
        ("Drawable ID", id_or_not_available(details.drawable_id)),
        ("Texture ID", id_or_not_available(details.texture_id)),
        ("DLC", dlc_label(&details.dlc_name)),
    ];

    for (field, value) in lines {
        indent(out, width)?;
        writeln!(out, "{}: {}", field, value)?;
    }
    Ok(())
}

fn write_collection(out: &mut String, collection: &ClothingCollection, gender: Gender) -> fmt::Result {
    writeln!(out, "{} Collection Statistics:", gender)?;
    writeln!(out, "Total Items: {}", collection.total_items())?;
    writeln!(out, "Total Outfits: {}", collection.total_outfits())?;
    write_separator(out, 0)?;

    write_header(out, "ITEMS BY COMPONENT TYPE", 0)?;
    writeln!(out, "Items by Component Type:")?;
    for (component_type, items) in collection.group_items_by_component() {
        writeln!(out, "- {}: {} items", printable_ascii(component_type), items.len())?;
    }
    for item in &collection.items {
        write_item(out, collection, item, 2)?;
    }
    write_separator(out, 0)?;

    write_header(out, "OUTFITS", 0)?;
    for outfit in &collection.outfits {
        write_outfit(out, outfit, 0)?;
        write_separator(out, 0)?;
    }
    write_separator(out, 0)?;

    write_header(out, "DLC BREAKDOWN", 0)?;
    write_dlc_breakdown(out, collection)
}

fn write_item(
    out: &mut String,
    collection: &ClothingCollection,
    item: &ClothingItem,
    width: usize,
) -> fmt::Result {
    let display_name = item.display_name();

    indent(out, width)?;
    writeln!(out, "Item: {}", display_name)?;

    let label = printable_ascii(&item.text_label);
    if Placeholder::is_meaningful_label(&label) && label != display_name {
        indent(out, width + 2)?;
        writeln!(out, "Text Label: {}", label)?;
    }

    let name = printable_ascii(&item.item_name);
    if !name.is_empty() && name != display_name {
        indent(out, width + 2)?;
        writeln!(out, "Name: {}", name)?;
    }

    indent(out, width + 2)?;
    writeln!(out, "Key: {}", printable_ascii(&item.unique_key))?;

    if !item.pairing_value.is_empty() && !Placeholder::is_placeholder(&item.pairing_value) {
        indent(out, width + 2)?;
        writeln!(out, "Value: {}", printable_ascii(&item.pairing_value))?;
    }

    indent(out, width + 2)?;
    writeln!(out, "Gender: {}", item.gender)?;

    if let Some(outfit) = item.parent_outfit.and_then(|id| collection.outfit(id)) {
        indent(out, width + 2)?;
        write!(out, "Part of Outfit: {}", printable_ascii(&outfit.localized_name))?;
        if !outfit.text_label.is_empty() {
            write!(out, " (Label: {})", printable_ascii(&outfit.text_label))?;
        }
        writeln!(out)?;
    }

    write_component_details(out, &item.component_details, width + 2)?;
    write_separator(out, width)
}

fn write_component_details(out: &mut String, details: &ComponentDetails, width: usize) -> fmt::Result {
    indent(out, width)?;
    writeln!(out, "Component Type: {}", clean_component_type_name(&details.component_type))?;
    indent(out, width)?;
    writeln!(out, "Drawable ID: {}", id_or_not_available(details.drawable_id))?;
    indent(out, width)?;
    writeln!(out, "Texture ID: {}", id_or_not_available(details.texture_id))?;
    indent(out, width)?;
    writeln!(out, "DLC: {}", dlc_label(&details.dlc_name))?;

    if details.variants.is_empty() {
        return Ok(());
    }

    indent(out, width)?;
    writeln!(out, "Variants:")?;
    for variant in &details.variants {
        indent(out, width + 2)?;
        writeln!(out, "- {}", printable_ascii(&variant.localized_name))?;
        indent(out, width + 4)?;
        writeln!(out, "Texture ID: {}", id_or_not_available(variant.texture_id))?;
        indent(out, width + 4)?;
        writeln!(
            out,
            "{}",
            if variant.is_default { "Default Variant" } else { "Alternative Variant" }
        )?;
    }
    Ok(())
}

fn write_outfit(out: &mut String, outfit: &Outfit, width: usize) -> fmt::Result {
    indent(out, width)?;
    writeln!(out, "Outfit: {}", or_not_available(&outfit.localized_name))?;
    indent(out, width)?;
    writeln!(out, "Hash: {}", printable_ascii(&outfit.hash))?;

    if !outfit.text_label.is_empty() {
        indent(out, width)?;
        writeln!(out, "Text Label: {}", printable_ascii(&outfit.text_label))?;
    }

    indent(out, width)?;
    writeln!(out, "DLC: {}", dlc_label(&outfit.dlc_name))?;
    indent(out, width)?;
    writeln!(out, "Status: {}", if outfit.is_complete { "Complete" } else { "Incomplete" })?;

    indent(out, width)?;
    writeln!(out, "Components:")?;
    for component in &outfit.components {
        write_outfit_component(out, component, width + 2)?;
    }
    Ok(())
}

fn write_outfit_component(out: &mut String, component: &OutfitComponent, width: usize) -> fmt::Result {
    indent(out, width)?;
    writeln!(out, "- {}", or_not_available(&component.localized_name))?;
    indent(out, width + 2)?;
    writeln!(out, "Hash: {}", printable_ascii(&component.component_hash))?;

    if !component.text_label.is_empty() {
        indent(out, width + 2)?;
        writeln!(out, "Text Label: {}", printable_ascii(&component.text_label))?;
    }

    indent(out, width + 2)?;
    writeln!(out, "Required: {}", if component.is_required { "Yes" } else { "Optional" })?;

    write_component_details(out, &component.details, width + 4)
}

fn write_dlc_breakdown(out: &mut String, collection: &ClothingCollection) -> fmt::Result {
    // (items, outfits) per DLC label
    let mut counts: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for item in &collection.items {
        counts.entry(dlc_label(&item.component_details.dlc_name)).or_default().0 += 1;
    }
    for outfit in &collection.outfits {
        counts.entry(dlc_label(&outfit.dlc_name)).or_default().1 += 1;
    }

    writeln!(out, "Content by DLC:")?;
    for (dlc, (items, outfits)) in counts {
        writeln!(out, "- {}:", dlc)?;
        writeln!(out, "  Items: {}", items)?;
        writeln!(out, "  Outfits: {}", outfits)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OutfitId, ComponentVariant};
    use tempfile::TempDir;

    fn item(key: &str, gender: Gender, value: &str) -> ClothingItem {
        let mut item = ClothingItem::new(key, gender);
        item.pairing_value = value.to_string();
        item
    }

    fn round_trip_collections() -> GenderCollections {
        let mut collections = GenderCollections::default();
        collections
            .male
            .items
            .push(item("DLC_MP_GR_M_FEET_1_7", Gender::Male, "V1"));
        collections
            .female
            .items
            .push(item("DLC_MP_GR_F_BERD_2_9", Gender::Female, "V1"));
        collections
    }

    #[test]
    fn test_clean_component_type_name() {
        assert_eq!(clean_component_type_name("TORSO_2"), "Torso");
        assert_eq!(clean_component_type_name("TORSO_1"), "Torso");
        assert_eq!(clean_component_type_name("FEET"), "Shoes");
        assert_eq!(clean_component_type_name("SHOES"), "Shoes");
        assert_eq!(clean_component_type_name("BERD"), "Mask");
        assert_eq!(clean_component_type_name("JBIB"), "Accessory");
        assert_eq!(clean_component_type_name("LEGS"), "Legs");
        assert_eq!(clean_component_type_name(""), "Unknown");
        assert_eq!(clean_component_type_name("_12"), "Unknown");
    }

    #[test]
    fn test_main_report_round_trip() {
        let collections = round_trip_collections();
        let writer = ReportWriter::new(&collections);

        let report = writer.render_main_report().unwrap();

        assert_eq!(report.matches("GENDER SWAP PAIR - Value: V1").count(), 1);
        assert!(report.contains("Matched Gender Swap Pairs: 1\n"));
        assert!(report.contains("Male Only Items: 0\n"));
        assert!(report.contains("Female Only Items: 0\n"));
        assert!(report.contains("Total Unique Values: 1\n"));
        assert!(report.contains("MALE CLOTHING ITEMS"));
        assert!(report.contains("FEMALE CLOTHING ITEMS"));
        assert!(report.contains("Male Collection Statistics:"));
        assert!(report.contains("Drawable ID: Not Available"));
    }

    #[test]
    fn test_main_report_item_details() {
        let mut collections = GenderCollections::default();
        let mut boots = item("DLC_MP_GR_M_FEET_1_7", Gender::Male, "V1");
        boots.text_label = "CLO_GRM_F_1_7".to_string();
        boots.item_name = "Black Boots".to_string();
        boots.dlc_name = "Gunrunning".to_string();
        boots.component_details = ComponentDetails {
            component_type: "SHOES".to_string(),
            drawable_id: 9,
            texture_id: 3,
            dlc_name: "Gunrunning".to_string(),
            variants: vec![ComponentVariant {
                texture_id: 3,
                localized_name: "Black Boots".to_string(),
                is_default: true,
            }],
        };
        boots.parent_outfit = Some(OutfitId(0));
        collections.male.items.push(boots);
        collections.male.add_outfit(Outfit {
            hash: "DLC_MP_GR_M_OUTFIT_0".to_string(),
            localized_name: "Gunrunner".to_string(),
            dlc_name: "Gunrunning".to_string(),
            text_label: "OUTFIT_GR_0".to_string(),
            components: Vec::new(),
            is_complete: true,
        });

        let report = ReportWriter::new(&collections).render_main_report().unwrap();

        assert!(report.contains("  Item: CLO_GRM_F_1_7\n"));
        assert!(report.contains("    Name: Black Boots\n"));
        assert!(report.contains("    Value: V1\n"));
        assert!(report.contains("    Part of Outfit: Gunrunner (Label: OUTFIT_GR_0)\n"));
        assert!(report.contains("    Component Type: Shoes\n"));
        assert!(report.contains("    Drawable ID: 9\n"));
        assert!(report.contains("    DLC: Gunrunning (mpgunrunning)\n"));
        assert!(report.contains("        Default Variant\n"));
        assert!(report.contains("- SHOES: 1 items\n"));
        assert!(report.contains("Outfit: Gunrunner\n"));
        assert!(report.contains("- Gunrunning (mpgunrunning):\n  Items: 1\n  Outfits: 1\n"));
        // Single-sided values are only counted
        assert!(report.contains("Male Only Items: 1\n"));
        assert!(!report.contains("GENDER SWAP PAIR - Value"));
    }

    #[test]
    fn test_report_text_is_ascii() {
        let mut collections = GenderCollections::default();
        let mut hat = item("CLO_M_HAT", Gender::Male, "V9");
        hat.item_name = "Caf\u{e9} Hat\u{7}".to_string();
        collections.male.items.push(hat);

        let report = ReportWriter::new(&collections).render_main_report().unwrap();

        assert!(report.is_ascii());
        assert!(report.contains("Item: [No Name Available]\n"));
        assert!(report.contains("Name: Caf Hat?\n"));
    }

    #[test]
    fn test_breakdown_reports() {
        let collections = round_trip_collections();
        let writer = ReportWriter::new(&collections);

        let by_dlc = writer.render_items_by_dlc().unwrap();
        assert!(by_dlc.contains("ITEMS BY DLC"));
        assert!(by_dlc.contains("Unknown DLC (Male, 1 items):"));
        assert!(by_dlc.contains("Unknown DLC (Female, 1 items):"));

        let by_component = writer.render_items_by_component().unwrap();
        assert!(by_component.contains("Unknown [UNKNOWN] (Male, 1 items):"));

        let outfits = writer.render_outfits_by_dlc().unwrap();
        assert!(outfits.contains("OUTFITS BY DLC"));
        assert!(!outfits.contains("outfits):"));
    }

    #[test]
    fn test_rendering_is_deterministic() {
        let collections = round_trip_collections();
        let first = ReportWriter::new(&collections).render_main_report().unwrap();
        let second = ReportWriter::new(&collections).render_main_report().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_report_failure() {
        let temp_dir = TempDir::new().unwrap();
        let dir = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        write_report(&dir.join("report.txt"), "ok").unwrap();
        assert_eq!(fs::read_to_string(dir.join("report.txt")).unwrap(), "ok");

        let err = write_report(&dir.join("missing").join("report.txt"), "x").unwrap_err();
        assert!(matches!(err, ReportError::OutputWrite { .. }));
    }
}
