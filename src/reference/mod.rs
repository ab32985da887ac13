//! Static reference tables for component categories, prop anchors and DLC packs
//!
//! All tables are immutable and shared across the whole run.

pub mod components;
pub mod dlc;

pub use components::{
    ANCHORS, AnchorMapping, COMPONENTS, ComponentMapping, HashComponentMatcher,
    UNKNOWN_COMPONENT, component_by_legacy_token, component_for_json_filename,
    component_from_hash, find_anchor, find_component, resolve_component_type,
};
pub use dlc::{
    DLC_PREFIX, DLCS, DlcMapping, dlc_by_key, dlc_display_label, dlc_for_metadata_key,
    extract_dlc_from_hash, find_dlc, resolve_dlc_from_hash, resolve_dlc_name,
};
