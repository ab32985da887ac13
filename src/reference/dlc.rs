//! DLC packs and the keys that identify them
//!
//! Unique name hashes carry the DLC key as a `DLC_MP_<TAG>` prefix, XML
//! files carry a file tag such as `mpgunrunning`. Both resolve to a single
//! display name through [`DLCS`].

/// Prefix every DLC key starts with inside unique name hashes
pub const DLC_PREFIX: &str = "DLC_MP_";

/// Platform qualifier kept as part of the DLC key
const PLATFORM_QUALIFIER: &str = "G9EC";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DlcMapping {
    pub display_name: &'static str,
    pub dlc_key: &'static str,
    pub dlc_file_tag: &'static str,
}

/// All known DLC packs in release order. Some packs appear under more than one key.
pub const DLCS: &[DlcMapping] = &[
    DlcMapping { display_name: "Beach Bum Update", dlc_key: "DLC_MP_BEACH", dlc_file_tag: "mpbeach" },
    DlcMapping { display_name: "Holiday Gifts DLC", dlc_key: "DLC_MP_XMAS", dlc_file_tag: "mpchristmas" },
    DlcMapping { display_name: "Valentine's Day Massacre Special DLC", dlc_key: "DLC_MP_VAL", dlc_file_tag: "mpvalentines" },
    DlcMapping { display_name: "Business Update", dlc_key: "DLC_MP_BUSI", dlc_file_tag: "mpbusiness" },
    DlcMapping { display_name: "Business Update 2", dlc_key: "DLC_MP_BUSI2", dlc_file_tag: "mpbusiness2" },
    DlcMapping { display_name: "Business Update 2", dlc_key: "DLC_MP_BUS2", dlc_file_tag: "mpbusiness2" },
    DlcMapping { display_name: "I'm Not A Hipster Update", dlc_key: "DLC_MP_HIPS", dlc_file_tag: "mphipster" },
    DlcMapping { display_name: "Independence Day Special DLC", dlc_key: "DLC_MP_IND", dlc_file_tag: "mpindependence" },
    DlcMapping { display_name: "San Andreas Flight School Update", dlc_key: "DLC_MP_PILOT", dlc_file_tag: "mppilot" },
    DlcMapping { display_name: "Last Team Standing Update", dlc_key: "DLC_MP_LTS", dlc_file_tag: "mplts" },
    DlcMapping { display_name: "Festive Surprise", dlc_key: "DLC_MP_XMAS2", dlc_file_tag: "mpchristmas2" },
    DlcMapping { display_name: "Heists Update", dlc_key: "DLC_MP_HEIST", dlc_file_tag: "mpheist" },
    DlcMapping { display_name: "Ill-Gotten Gains Part 1", dlc_key: "DLC_MP_LUXE", dlc_file_tag: "mpluxe" },
    DlcMapping { display_name: "Ill-Gotten Gains Part 1", dlc_key: "MP_DLC_LUXE", dlc_file_tag: "mpluxe" },
    DlcMapping { display_name: "Ill-Gotten Gains Part 2", dlc_key: "DLC_MP_LUXE2", dlc_file_tag: "mpluxe2" },
    DlcMapping { display_name: "Lowriders", dlc_key: "DLC_MP_LOW", dlc_file_tag: "mplowrider" },
    DlcMapping { display_name: "Halloween Surprise", dlc_key: "DLC_MP_HAL", dlc_file_tag: "mphalloween" },
    DlcMapping { display_name: "Executives and Other Criminals", dlc_key: "DLC_MP_APA", dlc_file_tag: "mpapartment" },
    DlcMapping { display_name: "Festive Surprise 2015", dlc_key: "DLC_MP_XMAS3", dlc_file_tag: "mpxmas_604490" },
    DlcMapping { display_name: "January 2016 Update", dlc_key: "DLC_MP_JAN", dlc_file_tag: "mpjanuary2016" },
    DlcMapping { display_name: "Be My Valentine", dlc_key: "DLC_MP_VAL2", dlc_file_tag: "mpvalentines2" },
    DlcMapping { display_name: "Lowriders: Custom Classics", dlc_key: "DLC_MP_LOW2", dlc_file_tag: "mplowrider2" },
    DlcMapping { display_name: "Finance And Felony", dlc_key: "DLC_MP_EXEC", dlc_file_tag: "mpexecutive" },
    DlcMapping { display_name: "Cunning Stunts", dlc_key: "DLC_MP_STUNT", dlc_file_tag: "mpstunt" },
    DlcMapping { display_name: "Bikers", dlc_key: "DLC_MP_BIKER", dlc_file_tag: "mpbiker" },
    DlcMapping { display_name: "Import/Export", dlc_key: "DLC_MP_IE", dlc_file_tag: "mpimportexport" },
    DlcMapping { display_name: "Gunrunning", dlc_key: "DLC_MP_GR", dlc_file_tag: "mpgunrunning" },
    DlcMapping { display_name: "Air Races / Smuggler", dlc_key: "DLC_MP_AR", dlc_file_tag: "mpairraces" },
    DlcMapping { display_name: "Smuggler's Run", dlc_key: "DLC_MP_SMUG", dlc_file_tag: "mpsmuggler" },
    DlcMapping { display_name: "The Doomsday Heist", dlc_key: "DLC_MP_X17", dlc_file_tag: "mpchristmas2017" },
    DlcMapping { display_name: "Southern San Andreas Super Sport Series", dlc_key: "DLC_MP_ASS", dlc_file_tag: "mpassault" },
    DlcMapping { display_name: "After Hours", dlc_key: "DLC_MP_BH", dlc_file_tag: "mpbattle" },
    DlcMapping { display_name: "Arena War", dlc_key: "DLC_MP_ARENA", dlc_file_tag: "mpchristmas2018" },
    DlcMapping { display_name: "The Diamond Casino & Resort", dlc_key: "DLC_MP_VWD", dlc_file_tag: "mpvinewood" },
    DlcMapping { display_name: "The Diamond Casino Heist", dlc_key: "DLC_MP_H3", dlc_file_tag: "mpheist3" },
    DlcMapping { display_name: "Los Santos Summer Special", dlc_key: "DLC_MP_SUM", dlc_file_tag: "mpsum" },
    DlcMapping { display_name: "The Cayo Perico Heist", dlc_key: "DLC_MP_H4", dlc_file_tag: "mpheist4" },
    DlcMapping { display_name: "Tuner", dlc_key: "DLC_MP_TUNER", dlc_file_tag: "mptuner" },
    DlcMapping { display_name: "The Contract", dlc_key: "DLC_MP_FIXER", dlc_file_tag: "mpsecurity" },
    DlcMapping { display_name: "Gen9EC", dlc_key: "DLC_MP_G9EC", dlc_file_tag: "mpg9ec" },
    DlcMapping { display_name: "Summer 2022", dlc_key: "DLC_MP_SUM2", dlc_file_tag: "mpSum2" },
    DlcMapping { display_name: "Summer 2022 G9EC", dlc_key: "DLC_MP_SUM2_G9EC", dlc_file_tag: "mpSum2_G9EC" },
    DlcMapping { display_name: "Winter 2022", dlc_key: "DLC_MP_X22", dlc_file_tag: "mpchristmas3" },
    DlcMapping { display_name: "Summer 2023", dlc_key: "DLC_MP_SUM23", dlc_file_tag: "mp2023_01" },
    DlcMapping { display_name: "Christmas2023", dlc_key: "DLC_MP_X23", dlc_file_tag: "mp2023_02" },
    DlcMapping { display_name: "Summer 2024", dlc_key: "DLC_MP_SUM24", dlc_file_tag: "mp2024_01" },
    DlcMapping { display_name: "Winter 2024", dlc_key: "DLC_MP_X24", dlc_file_tag: "mp2024_02" },
    DlcMapping { display_name: "Winter 2024 G9EC", dlc_key: "DLC_MP_X24_G9EC", dlc_file_tag: "mp2024_02_g9ec" },
];

/// Short forms seen in XML dlcName attributes that don't match a file tag
const DLC_ALIASES: &[(&str, &str)] = &[
    ("freemode_business", "DLC_MP_BUSI"),
    ("mpbiker", "DLC_MP_BIKER"),
    ("biker", "DLC_MP_BIKER"),
    ("mpbeach", "DLC_MP_BEACH"),
    ("beach", "DLC_MP_BEACH"),
    ("mpheist3", "DLC_MP_H3"),
];

/// Find a DLC by key, file tag, or display name. Empty input never matches.
pub fn find_dlc(input: &str) -> Option<&'static DlcMapping> {
    if input.is_empty() {
        return None;
    }

    DLCS.iter()
        .find(|d| d.dlc_key == input || d.dlc_file_tag == input || d.display_name == input)
}

/// Find a DLC by exact key only
pub fn dlc_by_key(key: &str) -> Option<&'static DlcMapping> {
    if key.is_empty() {
        return None;
    }

    DLCS.iter().find(|d| d.dlc_key == key)
}

/// Find the DLC a script metadata key belongs to.
///
/// The key extracted from the hash is looked up exactly first. Failing that,
/// the first DLC whose key occurs anywhere in the metadata key wins.
pub fn dlc_for_metadata_key(item_key: &str) -> Option<&'static DlcMapping> {
    dlc_by_key(extract_dlc_from_hash(item_key)).or_else(|| {
        DLCS.iter()
            .find(|d| !d.dlc_key.is_empty() && item_key.contains(d.dlc_key))
    })
}

/// Extract the `DLC_MP_<TAG>` key from a unique name hash.
///
/// The key normally ends at the first underscore after the prefix. When the
/// segment after that underscore is the `G9EC` platform qualifier it is kept
/// as part of the key. A hash without the prefix yields an empty string.
///
/// # Examples
///
/// ```
/// use genderswap::reference::extract_dlc_from_hash;
///
/// assert_eq!(extract_dlc_from_hash("DLC_MP_GR_F_FEET_1_7"), "DLC_MP_GR");
/// assert_eq!(extract_dlc_from_hash("DLC_MP_X24_G9EC_F_LEGS_0"), "DLC_MP_X24_G9EC");
/// assert_eq!(extract_dlc_from_hash("CLO_BASE_M_HAT"), "");
/// ```
pub fn extract_dlc_from_hash(hash: &str) -> &str {
    let Some(start) = hash.find(DLC_PREFIX) else {
        return "";
    };

    let tag_start = start + DLC_PREFIX.len();
    let Some(first_rel) = hash[tag_start..].find('_') else {
        return &hash[start..];
    };
    let first = tag_start + first_rel;
    let after_first = &hash[first + 1..];

    // Gender marker follows directly
    if after_first.starts_with('M') || after_first.starts_with('F') {
        return &hash[start..first];
    }

    match after_first.find('_') {
        Some(second_rel) => {
            let second = first + 1 + second_rel;
            if &hash[first + 1..second] == PLATFORM_QUALIFIER {
                &hash[start..second]
            } else {
                &hash[start..first]
            }
        }
        None => &hash[start..],
    }
}

/// Resolve any DLC spelling (key, file tag, display name, or known alias)
/// to its display name. Unknown input is returned unchanged.
pub fn resolve_dlc_name(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    if let Some(dlc) = find_dlc(input) {
        return dlc.display_name.to_string();
    }

    let lowered = input.to_lowercase();
    DLC_ALIASES
        .iter()
        .find(|(alias, _)| lowered.contains(alias))
        .and_then(|(_, key)| dlc_by_key(key))
        .map(|dlc| dlc.display_name.to_string())
        .unwrap_or_else(|| input.to_string())
}

/// Resolve the DLC display name for a hash, using `fallback` (typically the
/// XML node's dlcName) when the hash carries no known key.
///
/// Returns the raw extracted key when neither resolves, or an empty string
/// when there is nothing to go on.
pub fn resolve_dlc_from_hash(hash: &str, fallback: &str) -> String {
    let extracted = extract_dlc_from_hash(hash);
    if let Some(dlc) = find_dlc(extracted) {
        return dlc.display_name.to_string();
    }

    if !fallback.is_empty() {
        return resolve_dlc_name(fallback);
    }

    extracted.to_string()
}

/// Format a DLC name with its file tag, e.g. `Gunrunning (mpgunrunning)`
pub fn dlc_display_label(name: &str) -> String {
    match find_dlc(name) {
        Some(dlc) => format!("{} ({})", dlc.display_name, dlc.dlc_file_tag),
        None => name.to_string(),
    }
}
