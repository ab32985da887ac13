use std::collections::BTreeMap;

use crate::models::{ClothingItem, Gender, GenderCollections, Placeholder};

/// A male and a female item sharing one pairing value
#[derive(Debug, Clone, Copy)]
pub struct GenderSwapPair<'a> {
    pub value: &'a str,
    pub male: &'a ClothingItem,
    pub female: &'a ClothingItem,
}

/// Result of matching both collections by pairing value
#[derive(Debug, Default)]
pub struct PairingSummary<'a> {
    /// Matched pairs, ascending by value
    pub pairs: Vec<GenderSwapPair<'a>>,
    pub male_only: usize,
    pub female_only: usize,
    /// Distinct usable values across both genders
    pub unique_values: usize,
    /// Items dropped because a later item of the same gender reused the value
    pub collisions: usize,
}

impl PairingSummary<'_> {
    pub fn matched(&self) -> usize {
        self.pairs.len()
    }
}

#[derive(Default)]
struct Slot<'a> {
    male: Option<&'a ClothingItem>,
    female: Option<&'a ClothingItem>,
}

impl<'a> Slot<'a> {
    fn side(&mut self, gender: Gender) -> &mut Option<&'a ClothingItem> {
        match gender {
            Gender::Male => &mut self.male,
            Gender::Female => &mut self.female,
        }
    }
}

/// Pair male and female items that share a pairing value.
///
/// Items with an empty or placeholder value are ignored. Within one gender
/// the last item seen for a value replaces earlier ones; every replacement is
/// logged and counted in [`PairingSummary::collisions`].
pub fn pair_by_value(collections: &GenderCollections) -> PairingSummary<'_> {
    let mut slots: BTreeMap<&str, Slot> = BTreeMap::new();
    let mut collisions = 0;

    for gender in Gender::ALL {
        for item in &collections.collection(gender).items {
            let value = item.pairing_value.as_str();
            if value.is_empty() || Placeholder::is_placeholder(value) {
                continue;
            }

            let side = slots.entry(value).or_default().side(gender);
            if let Some(previous) = side.replace(item) {
                tracing::warn!(
                    "Value {} already used by {} item {}, keeping {}",
                    value,
                    gender,
                    previous.unique_key,
                    item.unique_key
                );
                collisions += 1;
            }
        }
    }

    let mut summary = PairingSummary {
        unique_values: slots.len(),
        collisions,
        ..PairingSummary::default()
    };

    for (value, slot) in slots {
        match (slot.male, slot.female) {
            (Some(male), Some(female)) => summary.pairs.push(GenderSwapPair { value, male, female }),
            (Some(_), None) => summary.male_only += 1,
            (None, Some(_)) => summary.female_only += 1,
            (None, None) => {}
        }
    }

    tracing::info!(
        "Gender swap pairing complete: {} pairs, {} male only, {} female only",
        summary.matched(),
        summary.male_only,
        summary.female_only
    );

    summary
}
