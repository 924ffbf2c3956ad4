//! Authoritative id -> location map and load-time id repair.

use crate::index::locator::ItemLocation;
use crate::model::trip::{ItemId, Trip};
use log::warn;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

/// Id -> location map for one trip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemIndex {
    locations: HashMap<ItemId, ItemLocation>,
    duplicates: Vec<ItemId>,
}

impl ItemIndex {
    /// Builds the index in locator scan order; first occurrence wins.
    pub fn build(trip: &Trip) -> Self {
        let mut index = Self::default();
        for (section, items) in trip.collections() {
            for (position, item) in items.iter().enumerate() {
                if index.locations.contains_key(&item.id) {
                    index.duplicates.push(item.id);
                    continue;
                }
                index.locations.insert(
                    item.id,
                    ItemLocation {
                        section,
                        index: position,
                    },
                );
            }
        }
        index
    }

    pub fn get(&self, item_id: ItemId) -> Option<ItemLocation> {
        self.locations.get(&item_id).copied()
    }

    pub fn contains(&self, item_id: ItemId) -> bool {
        self.locations.contains_key(&item_id)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Ids seen more than once while building. Empty after load-time repair.
    pub fn duplicates(&self) -> &[ItemId] {
        &self.duplicates
    }
}

/// Re-mints any trip, day or item id already used earlier in `trips`.
///
/// The first occurrence keeps its id. Returns the number of ids replaced.
pub fn reassign_duplicate_ids(trips: &mut [Trip]) -> usize {
    let mut seen = HashSet::new();
    let mut replaced = 0;
    let mut claim = |id: &mut Uuid| {
        if !seen.insert(*id) {
            *id = fresh_unused(&seen);
            seen.insert(*id);
            replaced += 1;
        }
    };

    for trip in trips.iter_mut() {
        claim(&mut trip.id);
        for item in trip
            .recommended_places
            .iter_mut()
            .chain(trip.wishlist.iter_mut())
            .chain(trip.todo.iter_mut())
        {
            claim(&mut item.id);
        }
        for day in trip.days.iter_mut() {
            claim(&mut day.id);
            for item in day.items.iter_mut() {
                claim(&mut item.id);
            }
        }
    }

    if replaced > 0 {
        warn!(
            "event=id_repair module=index status=ok replaced={} trips={}",
            replaced,
            trips.len()
        );
    }
    replaced
}

fn fresh_unused(seen: &HashSet<Uuid>) -> Uuid {
    loop {
        let candidate = Uuid::new_v4();
        if !seen.contains(&candidate) {
            return candidate;
        }
    }
}
