use std::collections::BTreeMap;
use std::fmt;

use crate::reference::UNKNOWN_COMPONENT;

/// Value used for drawable and texture IDs that were never set
pub const UNSET_ID: i32 = -1;

/// Shown when an item has neither a usable label nor a name
pub const NO_NAME: &str = "[No Name Available]";

/// Ped gender as encoded in item keys, pedNames and JSON filenames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub const ALL: [Gender; 2] = [Gender::Male, Gender::Female];

    /// Classify a script metadata key by its `_M_` / `_F_` marker.
    /// The male marker is checked first.
    pub fn from_key(key: &str) -> Option<Self> {
        if key.contains("_M_") {
            Some(Gender::Male)
        } else if key.contains("_F_") {
            Some(Gender::Female)
        } else {
            None
        }
    }

    /// Classify an XML pedName by its lowercase `_m_` / `_f_` marker
    pub fn from_ped_name(ped_name: &str) -> Option<Self> {
        if ped_name.contains("_m_") {
            Some(Gender::Male)
        } else if ped_name.contains("_f_") {
            Some(Gender::Female)
        } else {
            None
        }
    }

    /// JSON lookup files are female when the filename says so, male otherwise
    pub fn from_json_filename(filename: &str) -> Self {
        if filename.to_lowercase().contains("female") {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentinel strings the game data uses in place of real names or values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    NotAvailable,
    NotInStores,
    Unknown,
    UnknownName,
    Null,
    NoLabel,
}

impl Placeholder {
    pub const ALL: [Placeholder; 6] = [
        Placeholder::NotAvailable,
        Placeholder::NotInStores,
        Placeholder::Unknown,
        Placeholder::UnknownName,
        Placeholder::Null,
        Placeholder::NoLabel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Placeholder::NotAvailable => "[NA]",
            Placeholder::NotInStores => "[NOT IN STORES]",
            Placeholder::Unknown => "[UNKNOWN]",
            Placeholder::UnknownName => "[NO/ UNKNOWN NAME]",
            Placeholder::Null => "NULL",
            Placeholder::NoLabel => "NO_LABEL",
        }
    }

    pub fn matches(&self, value: &str) -> bool {
        self.as_str() == value
    }

    /// Whether a value is any of the known sentinels
    pub fn is_placeholder(value: &str) -> bool {
        Self::ALL.iter().any(|p| p.matches(value))
    }

    /// A localized name or label worth showing: non-empty and not `NULL`,
    /// `NO_LABEL` or `[NA]`
    pub fn is_meaningful_label(value: &str) -> bool {
        !value.is_empty()
            && !Placeholder::Null.matches(value)
            && !Placeholder::NoLabel.matches(value)
            && !Placeholder::NotAvailable.matches(value)
    }
}

/// Keep printable ASCII only. Other control characters become `?`, NUL and
/// anything outside ASCII is dropped.
pub fn printable_ascii(input: &str) -> String {
    input
        .chars()
        .filter_map(|c| match c {
            ' '..='~' => Some(c),
            '\0' => None,
            c if c.is_ascii() => Some('?'),
            _ => None,
        })
        .collect()
}

/// One texture variant of a drawable, with its localized name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentVariant {
    pub texture_id: i32,
    pub localized_name: String,
    pub is_default: bool,
}

/// Category, indices and DLC of a single drawable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDetails {
    pub component_type: String,
    pub drawable_id: i32,
    pub texture_id: i32,
    pub dlc_name: String,
    pub variants: Vec<ComponentVariant>,
}

impl Default for ComponentDetails {
    fn default() -> Self {
        Self {
            component_type: UNKNOWN_COMPONENT.to_string(),
            drawable_id: UNSET_ID,
            texture_id: UNSET_ID,
            dlc_name: String::new(),
            variants: Vec::new(),
        }
    }
}

impl ComponentDetails {
    /// Record a named texture variant. The first variant recorded is the
    /// default; an identical variant is not recorded twice.
    pub fn add_variant(&mut self, texture_id: i32, localized_name: &str) {
        if self
            .variants
            .iter()
            .any(|v| v.texture_id == texture_id && v.localized_name == localized_name)
        {
            return;
        }

        let is_default = self.variants.is_empty();
        self.variants.push(ComponentVariant {
            texture_id,
            localized_name: localized_name.to_string(),
            is_default,
        });
    }

    pub fn default_variant(&self) -> Option<&ComponentVariant> {
        self.variants.iter().find(|v| v.is_default)
    }

    pub fn has_known_type(&self) -> bool {
        !self.component_type.is_empty() && self.component_type != UNKNOWN_COMPONENT
    }
}

/// Index of an outfit inside its [`ClothingCollection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OutfitId(pub usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutfitComponent {
    pub component_hash: String,
    pub localized_name: String,
    pub text_label: String,
    pub details: ComponentDetails,
    /// Props are optional, body components are required
    pub is_required: bool,
    pub default_variant_index: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outfit {
    pub hash: String,
    pub localized_name: String,
    pub dlc_name: String,
    pub text_label: String,
    pub components: Vec<OutfitComponent>,
    pub is_complete: bool,
}

/// The unified view of one clothing item after all sources are merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClothingItem {
    /// Script metadata key or XML unique name hash
    pub unique_key: String,
    pub text_label: String,
    pub gender: Gender,
    /// Script metadata value shared by both gender versions of the item
    pub pairing_value: String,
    pub component_details: ComponentDetails,
    pub dlc_name: String,
    pub item_name: String,
    pub parent_outfit: Option<OutfitId>,
}

impl ClothingItem {
    pub fn new(unique_key: impl Into<String>, gender: Gender) -> Self {
        Self {
            unique_key: unique_key.into(),
            text_label: String::new(),
            gender,
            pairing_value: String::new(),
            component_details: ComponentDetails::default(),
            dlc_name: String::new(),
            item_name: String::new(),
            parent_outfit: None,
        }
    }

    /// A key plus a real (non-placeholder) text label
    pub fn is_valid(&self) -> bool {
        !self.unique_key.is_empty()
            && Placeholder::is_meaningful_label(&self.text_label)
            && !Placeholder::is_placeholder(&self.text_label)
    }

    pub fn is_part_of_outfit(&self) -> bool {
        self.parent_outfit.is_some()
    }

    pub fn has_known_component(&self) -> bool {
        self.component_details.has_known_type()
    }

    /// Printable name for reports: the cleaned text label, else the cleaned
    /// item name, else `[No Name Available]`
    pub fn display_name(&self) -> String {
        let label = printable_ascii(&self.text_label);
        if Placeholder::is_meaningful_label(&label) && !label.contains('?') {
            return label;
        }

        let name = printable_ascii(&self.item_name);
        if Placeholder::is_meaningful_label(&name) && !name.contains('?') {
            return name;
        }

        NO_NAME.to_string()
    }
}

/// All items and outfits for one gender.
///
/// Outfits live in an arena; items refer to their parent outfit by [`OutfitId`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClothingCollection {
    pub items: Vec<ClothingItem>,
    pub outfits: Vec<Outfit>,
}

impl ClothingCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_outfit(&mut self, outfit: Outfit) -> OutfitId {
        self.outfits.push(outfit);
        OutfitId(self.outfits.len() - 1)
    }

    pub fn outfit(&self, id: OutfitId) -> Option<&Outfit> {
        self.outfits.get(id.0)
    }

    pub fn total_items(&self) -> usize {
        self.items.len()
    }

    pub fn total_outfits(&self) -> usize {
        self.outfits.len()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.outfits.clear();
    }

    pub fn find_by_key(&self, key: &str) -> Option<&ClothingItem> {
        self.items.iter().find(|item| item.unique_key == key)
    }

    pub fn find_by_key_mut(&mut self, key: &str) -> Option<&mut ClothingItem> {
        self.items.iter_mut().find(|item| item.unique_key == key)
    }

    /// First item carrying the given text label. Empty labels never match.
    pub fn find_by_label_mut(&mut self, label: &str) -> Option<&mut ClothingItem> {
        if label.is_empty() {
            return None;
        }
        self.items.iter_mut().find(|item| item.text_label == label)
    }

    pub fn items_by_dlc<'a>(&'a self, dlc: &'a str) -> impl Iterator<Item = &'a ClothingItem> {
        self.items.iter().filter(move |item| item.dlc_name == dlc)
    }

    pub fn items_by_component<'a>(
        &'a self,
        component_type: &'a str,
    ) -> impl Iterator<Item = &'a ClothingItem> {
        self.items
            .iter()
            .filter(move |item| item.component_details.component_type == component_type)
    }

    pub fn outfits_by_dlc<'a>(&'a self, dlc: &'a str) -> impl Iterator<Item = &'a Outfit> {
        self.outfits.iter().filter(move |outfit| outfit.dlc_name == dlc)
    }

    /// Items grouped by DLC name, sorted by name
    pub fn group_items_by_dlc(&self) -> BTreeMap<&str, Vec<&ClothingItem>> {
        let mut groups: BTreeMap<&str, Vec<&ClothingItem>> = BTreeMap::new();
        for item in &self.items {
            groups.entry(item.dlc_name.as_str()).or_default().push(item);
        }
        groups
    }

    /// Items grouped by component type, sorted by type
    pub fn group_items_by_component(&self) -> BTreeMap<&str, Vec<&ClothingItem>> {
        let mut groups: BTreeMap<&str, Vec<&ClothingItem>> = BTreeMap::new();
        for item in &self.items {
            groups
                .entry(item.component_details.component_type.as_str())
                .or_default()
                .push(item);
        }
        groups
    }

    /// Outfits grouped by DLC name, sorted by name
    pub fn group_outfits_by_dlc(&self) -> BTreeMap<&str, Vec<&Outfit>> {
        let mut groups: BTreeMap<&str, Vec<&Outfit>> = BTreeMap::new();
        for outfit in &self.outfits {
            groups.entry(outfit.dlc_name.as_str()).or_default().push(outfit);
        }
        groups
    }
}

/// The male and female collections produced by one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenderCollections {
    pub male: ClothingCollection,
    pub female: ClothingCollection,
}

impl GenderCollections {
    pub fn collection(&self, gender: Gender) -> &ClothingCollection {
        match gender {
            Gender::Male => &self.male,
            Gender::Female => &self.female,
        }
    }

    pub fn collection_mut(&mut self, gender: Gender) -> &mut ClothingCollection {
        match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
        }
    }

    pub fn total_items(&self) -> usize {
        self.male.total_items() + self.female.total_items()
    }

    pub fn total_outfits(&self) -> usize {
        self.male.total_outfits() + self.female.total_outfits()
    }

    pub fn clear(&mut self) {
        self.male.clear();
        self.female.clear();
    }
}
