//! Trip, day section and place item records.
//!
//! # Responsibility
//! - Define the persisted document shape (camelCase wire names).
//! - Mint fresh ids for every newly admitted entity.
//!
//! # Invariants
//! - `id` fields are assigned at creation and never rewritten by edits.
//! - Place payloads never carry an id; admission always mints one.
//! - Absent optional fields are omitted on the wire, never written as `null`.

use crate::model::section::{FlatSection, SectionRef};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Stable identifier of a trip.
pub type TripId = Uuid;
/// Stable identifier of a day section.
pub type DayId = Uuid;
/// Stable identifier of a place item.
pub type ItemId = Uuid;

/// Name given to trips created without one.
pub const DEFAULT_TRIP_NAME: &str = "New Trip";
/// Prefix prepended to the name of a cloned trip.
pub const CLONE_NAME_PREFIX: &str = "Copy of ";

/// A place reference attached to exactly one collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceItem {
    /// Process-unique id, minted on admission.
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Opaque id from the place lookup provider.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    /// Latitude. Missing coordinates mean the item is not mappable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    /// Free-text "recommended for" annotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_for: Option<String>,
    /// Free-text instructions or notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl PlaceItem {
    /// Admits a payload as a new item with a freshly minted id.
    pub fn from_payload(payload: PlacePayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: payload.name,
            place_id: payload.place_id,
            lat: payload.lat,
            lng: payload.lng,
            recommended_for: payload.recommended_for,
            instructions: payload.instructions,
        }
    }

    /// Returns `(lat, lng)` when both coordinates are present.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        Some((self.lat?, self.lng?))
    }

    /// Copies this item under a new id.
    pub(crate) fn duplicate(&self) -> Self {
        Self {
            id: Uuid::new_v4(),
            ..self.clone()
        }
    }

    pub(crate) fn apply_patch(&mut self, patch: &ItemPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(value) = &patch.place_id {
            self.place_id = value.clone();
        }
        if let Some(value) = patch.lat {
            self.lat = value;
        }
        if let Some(value) = patch.lng {
            self.lng = value;
        }
        if let Some(value) = &patch.recommended_for {
            self.recommended_for = value.clone();
        }
        if let Some(value) = &patch.instructions {
            self.instructions = value.clone();
        }
    }
}

/// Id-less place description received from lookup widgets or the assistant.
///
/// Unknown fields (including a stray `id`) are ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacePayload {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_for: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl PlacePayload {
    /// Creates a payload carrying only a display name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Attaches coordinates.
    pub fn at(mut self, lat: f64, lng: f64) -> Self {
        self.lat = Some(lat);
        self.lng = Some(lng);
        self
    }

    /// Attaches an external place id.
    pub fn with_place_id(mut self, place_id: impl Into<String>) -> Self {
        self.place_id = Some(place_id.into());
        self
    }

    /// Attaches instructions.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }
}

/// Shallow partial update for one place item.
///
/// Outer `None` keeps the field. For optional fields, `Some(None)` clears it;
/// on the wire that is an explicit `null`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "explicit_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub place_id: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "explicit_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub lat: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "explicit_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub lng: Option<Option<f64>>,
    #[serde(
        default,
        deserialize_with = "explicit_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub recommended_for: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "explicit_field",
        skip_serializing_if = "Option::is_none"
    )]
    pub instructions: Option<Option<String>>,
}

impl ItemPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn recommended_for(mut self, value: Option<String>) -> Self {
        self.recommended_for = Some(value);
        self
    }

    pub fn instructions(mut self, value: Option<String>) -> Self {
        self.instructions = Some(value);
        self
    }

    pub fn coordinates(mut self, value: Option<(f64, f64)>) -> Self {
        self.lat = Some(value.map(|(lat, _)| lat));
        self.lng = Some(value.map(|(_, lng)| lng));
        self
    }

    /// Returns whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.place_id.is_none()
            && self.lat.is_none()
            && self.lng.is_none()
            && self.recommended_for.is_none()
            && self.instructions.is_none()
    }
}

// A present field (even `null`) becomes `Some(..)`; `default` covers absence.
fn explicit_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// One itinerary day: a named, ordered bucket of places.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySection {
    pub id: DayId,
    pub name: String,
    #[serde(default)]
    pub items: Vec<PlaceItem>,
}

impl DaySection {
    /// Creates an empty day with a fresh id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Positional default name for a day appended after `existing_days` days.
    pub fn default_name(existing_days: usize) -> String {
        format!("Day {}", existing_days + 1)
    }
}

/// Top-level planning unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: TripId,
    pub name: String,
    #[serde(default)]
    pub wishlist: Vec<PlaceItem>,
    #[serde(default)]
    pub todo: Vec<PlaceItem>,
    #[serde(default)]
    pub days: Vec<DaySection>,
    #[serde(default)]
    pub recommended_places: Vec<PlaceItem>,
}

impl Trip {
    /// Creates an empty trip named [`DEFAULT_TRIP_NAME`] with a fresh id.
    pub fn empty() -> Self {
        Self::named(DEFAULT_TRIP_NAME)
    }

    /// Creates an empty trip with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            wishlist: Vec::new(),
            todo: Vec::new(),
            days: Vec::new(),
            recommended_places: Vec::new(),
        }
    }

    /// Returns one flat collection.
    pub fn flat(&self, section: FlatSection) -> &[PlaceItem] {
        match section {
            FlatSection::Wishlist => &self.wishlist,
            FlatSection::Todo => &self.todo,
            FlatSection::Recommended => &self.recommended_places,
        }
    }

    /// Returns one day by id.
    pub fn day(&self, day_id: DayId) -> Option<&DaySection> {
        self.days.iter().find(|day| day.id == day_id)
    }

    /// Returns the items of any collection; `None` when the day is missing.
    pub fn collection(&self, section: SectionRef) -> Option<&[PlaceItem]> {
        match section {
            SectionRef::Flat(flat) => Some(self.flat(flat)),
            SectionRef::Day(day_id) => self.day(day_id).map(|day| day.items.as_slice()),
        }
    }

    pub(crate) fn collection_mut(&mut self, section: SectionRef) -> Option<&mut Vec<PlaceItem>> {
        match section {
            SectionRef::Flat(FlatSection::Wishlist) => Some(&mut self.wishlist),
            SectionRef::Flat(FlatSection::Todo) => Some(&mut self.todo),
            SectionRef::Flat(FlatSection::Recommended) => Some(&mut self.recommended_places),
            SectionRef::Day(day_id) => self
                .days
                .iter_mut()
                .find(|day| day.id == day_id)
                .map(|day| &mut day.items),
        }
    }

    /// Iterates every collection in locator scan order with its items.
    pub fn collections(&self) -> impl Iterator<Item = (SectionRef, &[PlaceItem])> + '_ {
        FlatSection::SCAN_ORDER
            .into_iter()
            .map(|flat| (SectionRef::Flat(flat), self.flat(flat)))
            .chain(
                self.days
                    .iter()
                    .map(|day| (SectionRef::Day(day.id), day.items.as_slice())),
            )
    }

    /// Total number of place items across all collections.
    pub fn item_count(&self) -> usize {
        self.collections().map(|(_, items)| items.len()).sum()
    }

    /// Deep copy with fresh ids for the trip, every day and every item.
    pub(crate) fn deep_clone(&self) -> Self {
        let copy_items = |items: &[PlaceItem]| -> Vec<PlaceItem> {
            items.iter().map(PlaceItem::duplicate).collect()
        };
        Self {
            id: Uuid::new_v4(),
            name: format!("{CLONE_NAME_PREFIX}{}", self.name),
            wishlist: copy_items(&self.wishlist),
            todo: copy_items(&self.todo),
            recommended_places: copy_items(&self.recommended_places),
            days: self
                .days
                .iter()
                .map(|day| DaySection {
                    id: Uuid::new_v4(),
                    name: day.name.clone(),
                    items: copy_items(&day.items),
                })
                .collect(),
        }
    }
}
