//! Scan-based item locator.

use crate::model::section::SectionRef;
use crate::model::trip::{DayId, ItemId, Trip};

/// Current position of one item inside a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemLocation {
    /// Collection holding the item.
    pub section: SectionRef,
    /// Zero-based position inside that collection.
    pub index: usize,
}

impl ItemLocation {
    pub fn day_id(&self) -> Option<DayId> {
        self.section.day_id()
    }

    /// One-based position used by list badges and drag previews.
    pub fn display_position(&self) -> usize {
        self.index + 1
    }
}

/// Finds the first collection holding `item_id`.
///
/// Deterministic: the first match in scan order wins, so a duplicated id
/// (which load-time repair prevents) would resolve to its earliest copy.
pub fn locate(trip: &Trip, item_id: ItemId) -> Option<ItemLocation> {
    trip.collections().find_map(|(section, items)| {
        items
            .iter()
            .position(|item| item.id == item_id)
            .map(|index| ItemLocation { section, index })
    })
}

#[cfg(test)]
mod tests {
    use super::locate;
    use crate::model::section::SectionRef;
    use crate::model::trip::{DaySection, PlaceItem, PlacePayload, Trip};
    use uuid::Uuid;

    #[test]
    fn finds_items_in_days_with_day_id() {
        let mut trip = Trip::empty();
        let mut day = DaySection::new("Day 1");
        day.items.push(PlaceItem::from_payload(PlacePayload::named("a")));
        day.items.push(PlaceItem::from_payload(PlacePayload::named("b")));
        let target = day.items[1].id;
        let day_id = day.id;
        trip.days.push(day);

        let location = locate(&trip, target).unwrap();
        assert_eq!(location.section, SectionRef::Day(day_id));
        assert_eq!(location.index, 1);
        assert_eq!(location.display_position(), 2);
    }

    #[test]
    fn recommended_is_scanned_before_wishlist() {
        let mut trip = Trip::empty();
        let item = PlaceItem::from_payload(PlacePayload::named("dup"));
        trip.wishlist.push(item.clone());
        trip.recommended_places.push(item.clone());

        let location = locate(&trip, item.id).unwrap();
        assert_eq!(location.section, SectionRef::RECOMMENDED);
    }

    #[test]
    fn missing_item_is_none() {
        assert!(locate(&Trip::empty(), Uuid::new_v4()).is_none());
    }
}
