//! Drop-zone registry and pointer hit-testing.
//!
//! # Invariants
//! - Hit-testing uses pointer containment only; bounding-box overlap between
//!   zones never influences the winner.
//! - When several zones contain the pointer, an item zone beats a collection
//!   zone, and among equals the most recently registered (top-most) wins.

use crate::interaction::geometry::{Point, Rect};
use crate::model::section::SectionRef;
use crate::model::trip::{ItemId, TripId};

/// What a drop zone represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneKind {
    /// Empty space of a collection column.
    Collection,
    /// One rendered item card inside a collection.
    Item(ItemId),
}

/// Registered drop target with its layout bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropZone {
    pub trip_id: TripId,
    pub section: SectionRef,
    pub kind: ZoneKind,
    pub bounds: Rect,
}

impl DropZone {
    pub fn collection(trip_id: TripId, section: SectionRef, bounds: Rect) -> Self {
        Self {
            trip_id,
            section,
            kind: ZoneKind::Collection,
            bounds,
        }
    }

    pub fn item(trip_id: TripId, section: SectionRef, item_id: ItemId, bounds: Rect) -> Self {
        Self {
            trip_id,
            section,
            kind: ZoneKind::Item(item_id),
            bounds,
        }
    }

    pub fn hovered_item(&self) -> Option<ItemId> {
        match self.kind {
            ZoneKind::Collection => None,
            ZoneKind::Item(item_id) => Some(item_id),
        }
    }
}

/// Zones registered by the current layout pass.
#[derive(Debug, Clone, Default)]
pub struct DropZoneRegistry {
    zones: Vec<DropZone>,
}

impl DropZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a zone; later registrations are treated as drawn on top.
    pub fn register(&mut self, zone: DropZone) {
        self.zones.push(zone);
    }

    /// Drops all zones, typically before re-layout.
    pub fn clear(&mut self) {
        self.zones.clear();
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Returns the zone directly under `point`, if any.
    pub fn hit_test(&self, point: Point) -> Option<&DropZone> {
        let rank = |zone: &DropZone| match zone.kind {
            ZoneKind::Item(_) => 1,
            ZoneKind::Collection => 0,
        };
        self.zones
            .iter()
            .enumerate()
            .filter(|(_, zone)| zone.bounds.contains(point))
            .max_by_key(|(order, zone)| (rank(*zone), *order))
            .map(|(_, zone)| zone)
    }
}

#[cfg(test)]
mod tests {
    use super::{DropZone, DropZoneRegistry, ZoneKind};
    use crate::interaction::geometry::{Point, Rect};
    use crate::model::section::SectionRef;
    use uuid::Uuid;

    #[test]
    fn item_card_wins_over_its_column() {
        let trip_id = Uuid::new_v4();
        let item_id = Uuid::new_v4();
        let mut registry = DropZoneRegistry::new();
        registry.register(DropZone::item(
            trip_id,
            SectionRef::WISHLIST,
            item_id,
            Rect::new(10.0, 10.0, 80.0, 20.0),
        ));
        registry.register(DropZone::collection(
            trip_id,
            SectionRef::WISHLIST,
            Rect::new(0.0, 0.0, 100.0, 300.0),
        ));

        let hit = registry.hit_test(Point::new(20.0, 15.0)).unwrap();
        assert_eq!(hit.kind, ZoneKind::Item(item_id));

        let hit = registry.hit_test(Point::new(20.0, 200.0)).unwrap();
        assert_eq!(hit.kind, ZoneKind::Collection);
    }

    #[test]
    fn pointer_containment_beats_larger_overlap() {
        let trip_id = Uuid::new_v4();
        let mut registry = DropZoneRegistry::new();
        // A wide zone and a narrow neighbour; the pointer is only inside the narrow one.
        registry.register(DropZone::collection(
            trip_id,
            SectionRef::WISHLIST,
            Rect::new(0.0, 0.0, 200.0, 100.0),
        ));
        registry.register(DropZone::collection(
            trip_id,
            SectionRef::TODO,
            Rect::new(200.0, 0.0, 20.0, 100.0),
        ));

        let hit = registry.hit_test(Point::new(205.0, 50.0)).unwrap();
        assert_eq!(hit.section, SectionRef::TODO);
        assert!(registry.hit_test(Point::new(500.0, 50.0)).is_none());
    }
}
