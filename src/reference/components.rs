//! Clothing component categories and prop anchor points
//!
//! Every clothing record in the game data refers to its category in one of
//! several spellings: the XML enum (`PV_COMP_FEET`), the short token embedded
//! in unique name hashes (`FEET`), the legacy token used in script metadata
//! keys, or a keyword in the per-category JSON filename. This table ties all of
//! them to one internal category name.

use regex::Regex;
use std::sync::LazyLock;

/// Internal category used when nothing in the table matches.
pub const UNKNOWN_COMPONENT: &str = "UNKNOWN";

/// One clothing category with all of its known spellings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentMapping {
    /// Full XML enum value (`eCompType`), empty for categories that never appear there
    pub xml_type: &'static str,
    /// Token used inside unique name hashes
    pub short_type: &'static str,
    /// Standardized internal category
    pub internal_type: &'static str,
    pub display_name: &'static str,
    /// Token used in script metadata keys
    pub legacy_file_token: &'static str,
    /// Keywords matched against JSON lookup filenames
    pub json_file_patterns: &'static [&'static str],
}

/// All component categories. Order is the tie-break for every lookup.
pub const COMPONENTS: &[ComponentMapping] = &[
    ComponentMapping {
        xml_type: "PV_COMP_HEAD",
        short_type: "HEAD",
        internal_type: "HAT",
        display_name: "Hat",
        legacy_file_token: "PHEAD",
        json_file_patterns: &["hats"],
    },
    ComponentMapping {
        xml_type: "PV_COMP_BERD",
        short_type: "BERD",
        internal_type: "MASK",
        display_name: "Mask",
        legacy_file_token: "BERD",
        json_file_patterns: &["mask"],
    },
    ComponentMapping {
        xml_type: "PV_COMP_EYES",
        short_type: "EYES",
        internal_type: "GLASSES",
        display_name: "Glasses",
        legacy_file_token: "PEYES",
        json_file_patterns: &["glasses"],
    },
    ComponentMapping {
        xml_type: "PV_COMP_HAIR",
        short_type: "HAIR",
        internal_type: "HAIR",
        display_name: "Hair",
        legacy_file_token: "HAIR",
        json_file_patterns: &["hair"],
    },
    ComponentMapping {
        xml_type: "PV_COMP_UPPR",
        short_type: "UPPR",
        internal_type: "TORSO",
        display_name: "Torso",
        legacy_file_token: "TORSO",
        json_file_patterns: &["torsos"],
    },
    ComponentMapping {
        xml_type: "PV_COMP_JBIB",
        short_type: "JBIB",
        internal_type: "TORSO_2",
        display_name: "Torso 2 (tops)",
        legacy_file_token: "JBIB",
        json_file_patterns: &["tops"],
    },
    ComponentMapping {
        xml_type: "PV_COMP_ACCS",
        short_type: "ACCS",
        internal_type: "TORSO_1",
        display_name: "Torso 1 (undershirts)",
        legacy_file_token: "ACCS",
        json_file_patterns: &["undershirts"],
    },
    ComponentMapping {
        xml_type: "PV_COMP_LOWR",
        short_type: "LOWR",
        internal_type: "LEGS",
        display_name: "Legs",
        legacy_file_token: "LEGS",
        json_file_patterns: &["legs"],
    },
    ComponentMapping {
        xml_type: "PV_COMP_FEET",
        short_type: "FEET",
        internal_type: "SHOES",
        display_name: "Shoes",
        legacy_file_token: "FEET",
        json_file_patterns: &["shoes"],
    },
    ComponentMapping {
        xml_type: "PV_COMP_TASK",
        short_type: "TASK",
        internal_type: "GLOVES",
        display_name: "Gloves",
        legacy_file_token: "TASK",
        json_file_patterns: &["accessories"],
    },
    ComponentMapping {
        xml_type: "PV_COMP_TEEF",
        short_type: "TEEF",
        internal_type: "TEETH",
        display_name: "Teeth",
        legacy_file_token: "TEETH",
        json_file_patterns: &["ears"],
    },
    ComponentMapping {
        xml_type: "PV_COMP_DECL",
        short_type: "DECL",
        internal_type: "DECAL",
        display_name: "Decal",
        legacy_file_token: "DECL",
        json_file_patterns: &[],
    },
    ComponentMapping {
        xml_type: "",
        short_type: "WRIST",
        internal_type: "WRIST",
        display_name: "Wrist",
        legacy_file_token: "WRIST",
        json_file_patterns: &["watch", "bracelets"],
    },
    ComponentMapping {
        xml_type: "",
        short_type: "OUTFIT",
        internal_type: "OUTFIT",
        display_name: "Outfit",
        legacy_file_token: "OUTFIT",
        json_file_patterns: &[],
    },
    ComponentMapping {
        xml_type: "",
        short_type: "SPECIAL",
        internal_type: UNKNOWN_COMPONENT,
        display_name: "Unknown",
        legacy_file_token: "SPECIAL",
        json_file_patterns: &[],
    },
];

/// Find a component by any of its spellings (XML type, short type, internal
/// type or legacy token). Empty input never matches.
pub fn find_component(code: &str) -> Option<&'static ComponentMapping> {
    if code.is_empty() {
        return None;
    }

    COMPONENTS.iter().find(|m| {
        m.xml_type == code
            || m.short_type == code
            || m.internal_type == code
            || m.legacy_file_token == code
    })
}

/// Find the first component whose legacy token occurs anywhere in a script
/// metadata key
pub fn component_by_legacy_token(key: &str) -> Option<&'static ComponentMapping> {
    COMPONENTS
        .iter()
        .find(|m| !m.legacy_file_token.is_empty() && key.contains(m.legacy_file_token))
}

/// Find the component a JSON lookup file describes from its filename
pub fn component_for_json_filename(filename: &str) -> Option<&'static ComponentMapping> {
    let filename = filename.to_lowercase();
    COMPONENTS.iter().find(|m| {
        m.json_file_patterns
            .iter()
            .any(|pattern| filename.contains(pattern))
    })
}

/// Matches `_<shortType>` inside unique name hashes.
///
/// The token must be followed by `_`, a digit, or the end of the hash, so
/// `_FEET_1` and `_FEET2` match SHOES while `_FEETX` does not.
pub struct HashComponentMatcher {
    patterns: Vec<(Regex, &'static ComponentMapping)>,
}

impl HashComponentMatcher {
    /// Compile one boundary pattern per component, in table order
    pub fn new() -> Self {
        let patterns = COMPONENTS
            .iter()
            .filter(|m| !m.short_type.is_empty())
            .map(|m| {
                let pattern = format!(r"_{}(?:_|[0-9]|$)", regex::escape(m.short_type));
                (
                    Regex::new(&pattern).expect("Invalid component hash regex"),
                    m,
                )
            })
            .collect();

        Self { patterns }
    }

    /// Return the first component (in table order) whose token occurs in the hash
    pub fn match_hash(&self, hash: &str) -> Option<&'static ComponentMapping> {
        if hash.is_empty() {
            return None;
        }

        let hash = hash.to_uppercase();
        self.patterns
            .iter()
            .find(|(pattern, _)| pattern.is_match(&hash))
            .map(|(_, mapping)| *mapping)
    }
}

impl Default for HashComponentMatcher {
    fn default() -> Self {
        Self::new()
    }
}

static HASH_MATCHER: LazyLock<HashComponentMatcher> = LazyLock::new(HashComponentMatcher::new);

/// Extract a component category directly from a unique name hash
pub fn component_from_hash(hash: &str) -> Option<&'static ComponentMapping> {
    HASH_MATCHER.match_hash(hash)
}

/// Resolve the internal category for an XML type code, falling back to the
/// hash when the code is unknown. Prop anchor points are tried first.
pub fn resolve_component_type(code: &str, hash: &str) -> &'static str {
    if let Some(anchor) = find_anchor(code) {
        return anchor.internal_type;
    }

    find_component(code)
        .filter(|m| m.internal_type != UNKNOWN_COMPONENT)
        .or_else(|| component_from_hash(hash))
        .map(|m| m.internal_type)
        .unwrap_or(UNKNOWN_COMPONENT)
}

// ============================================================================
// Prop anchor points
// ============================================================================

/// Where a prop attaches to the ped, and the category it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorMapping {
    pub anchor_point: &'static str,
    pub display_name: &'static str,
    pub internal_type: &'static str,
    pub description: &'static str,
}

pub const ANCHORS: &[AnchorMapping] = &[
    AnchorMapping {
        anchor_point: "ANCHOR_HEAD",
        display_name: "Head",
        internal_type: "HAT",
        description: "Head-mounted props (hats, helmets, headwear)",
    },
    AnchorMapping {
        anchor_point: "ANCHOR_EYES",
        display_name: "Eyes",
        internal_type: "GLASSES",
        description: "Eye-mounted props (glasses, goggles)",
    },
    AnchorMapping {
        anchor_point: "ANCHOR_EARS",
        display_name: "Ears",
        internal_type: "TEETH",
        description: "Ear props (earrings, earpieces)",
    },
    AnchorMapping {
        anchor_point: "ANCHOR_LEFT_WRIST",
        display_name: "Left Wrist",
        internal_type: "WRIST",
        description: "Left wrist props (watches, bracelets)",
    },
    AnchorMapping {
        anchor_point: "ANCHOR_RIGHT_WRIST",
        display_name: "Right Wrist",
        internal_type: "WRIST",
        description: "Right wrist props (watches, bracelets)",
    },
    AnchorMapping {
        anchor_point: "ANCHOR_LEFT_HAND",
        display_name: "Left Hand",
        internal_type: "GLOVES",
        description: "Left hand props (rings, gloves)",
    },
    AnchorMapping {
        anchor_point: "ANCHOR_RIGHT_HAND",
        display_name: "Right Hand",
        internal_type: "GLOVES",
        description: "Right hand props (rings, gloves)",
    },
];

/// Get anchor mapping by XML anchor point
pub fn find_anchor(anchor_point: &str) -> Option<&'static AnchorMapping> {
    ANCHORS.iter().find(|a| a.anchor_point == anchor_point)
}
