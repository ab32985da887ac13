//! Data models for the gender swap dump.
//!
//! This module contains the core data structures used throughout the application:
//! - [`DumpConfig`]: Source locations, report names and logging settings loaded from `GenderSwap Config.yaml`
//! - [`raw`]: Records exactly as the three source readers produce them
//! - [`ClothingItem`] / [`Outfit`]: The merged view built by the enrichment passes
//! - [`GenderCollections`]: The male and female collections that reports are written from
//!
//! # Architecture Note
//!
//! Raw records are never mutated after reading. Enrichment builds new
//! [`ClothingItem`]s from them, and outfits are stored in a per-collection
//! arena addressed by [`OutfitId`].

pub mod clothing;
pub mod config;
pub mod raw;

pub use clothing::{
    ClothingCollection, ClothingItem, ComponentDetails, ComponentVariant, Gender,
    GenderCollections, NO_NAME, Outfit, OutfitComponent, OutfitId, Placeholder, UNSET_ID,
    printable_ascii,
};
pub use config::{DumpConfig, LoggingConfig, OutputConfig, SourcesConfig};
pub use raw::{
    RawJsonItem, RawMetadataItem, RawXmlItem, RawXmlNode, RawXmlOutfit, SourceData, XmlItemKind,
};
