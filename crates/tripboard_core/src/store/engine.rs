//! Pure structural edits over trips.
//!
//! # Responsibility
//! - Evaluate one `TripCommand` against an immutable trip list.
//! - Keep every edit all-or-nothing: either the whole command applies or the
//!   returned list is identical to the input.
//!
//! # Invariants
//! - Inputs are never mutated; changed trips are rebuilt, untouched trips are
//!   shared (`Arc::ptr_eq` holds for them).
//! - Moves remove and insert as one step; a missing source or destination
//!   leaves the trip untouched.
//! - Insert/reorder indexes are clamped against the list after removal.
//! - Admitted places always get freshly minted ids.

use crate::index::locator::locate;
use crate::model::proposal::ProposedDay;
use crate::model::section::SectionRef;
use crate::model::trip::{
    DayId, DaySection, ItemId, ItemPatch, PlaceItem, PlacePayload, Trip, TripId,
};
use crate::store::command::{MutationOutcome, NoOpReason, TripCommand};
use log::debug;
use std::sync::Arc;

/// Ordered trip list with per-trip structural sharing.
pub type TripList = Vec<Arc<Trip>>;

type EditResult = Result<(Trip, MutationOutcome), NoOpReason>;

/// Applies one command and returns the next trip list with its outcome.
pub fn apply_command(trips: &[Arc<Trip>], command: &TripCommand) -> (TripList, MutationOutcome) {
    match command {
        TripCommand::AddTrip { name } => {
            let trip = name.as_deref().map_or_else(Trip::empty, Trip::named);
            let trip_id = trip.id;
            let mut next = trips.to_vec();
            next.push(Arc::new(trip));
            (next, MutationOutcome::Created(trip_id))
        }
        TripCommand::RenameTrip { trip_id, name } => edit_trip(trips, *trip_id, |trip| {
            let mut next = trip.clone();
            next.name = name.clone();
            Ok((next, MutationOutcome::Applied))
        }),
        TripCommand::DeleteTrip { trip_id } => {
            if !trips.iter().any(|trip| trip.id == *trip_id) {
                return unchanged(trips, NoOpReason::TripNotFound(*trip_id));
            }
            let next = trips
                .iter()
                .filter(|trip| trip.id != *trip_id)
                .cloned()
                .collect();
            (next, MutationOutcome::Applied)
        }
        TripCommand::CloneTrip { trip_id } => {
            let Some(source) = trips.iter().find(|trip| trip.id == *trip_id) else {
                return unchanged(trips, NoOpReason::TripNotFound(*trip_id));
            };
            let copy = source.deep_clone();
            let copy_id = copy.id;
            let mut next = trips.to_vec();
            next.push(Arc::new(copy));
            (next, MutationOutcome::Created(copy_id))
        }
        TripCommand::AddItemToSection {
            trip_id,
            section,
            payload,
        } => edit_trip(trips, *trip_id, |trip| {
            add_item(trip, SectionRef::Flat(*section), payload.clone())
        }),
        TripCommand::AddItemToDay {
            trip_id,
            day_id,
            payload,
        } => edit_trip(trips, *trip_id, |trip| {
            add_item(trip, SectionRef::Day(*day_id), payload.clone())
        }),
        TripCommand::MoveItem {
            trip_id,
            item_id,
            from,
            to,
            to_index,
        } => edit_trip(trips, *trip_id, |trip| {
            move_item(trip, *item_id, *from, *to, *to_index)
        }),
        TripCommand::ReorderItem {
            trip_id,
            item_id,
            section,
            to_index,
        } => edit_trip(trips, *trip_id, |trip| {
            reorder_item(trip, *item_id, *section, *to_index)
        }),
        TripCommand::RemoveItem {
            trip_id,
            item_id,
            section,
        } => edit_trip(trips, *trip_id, |trip| {
            remove_item(trip, *item_id, *section)
        }),
        TripCommand::UpdateItem {
            trip_id,
            item_id,
            section,
            patch,
        } => edit_trip(trips, *trip_id, |trip| {
            update_item(trip, *item_id, *section, patch)
        }),
        TripCommand::AddDaySection { trip_id, name } => edit_trip(trips, *trip_id, |trip| {
            Ok(add_day(trip, name.as_deref()))
        }),
        TripCommand::RenameDaySection {
            trip_id,
            day_id,
            name,
        } => edit_trip(trips, *trip_id, |trip| rename_day(trip, *day_id, name)),
        TripCommand::RemoveDaySection { trip_id, day_id } => {
            edit_trip(trips, *trip_id, |trip| remove_day(trip, *day_id))
        }
        TripCommand::CreateItinerary { trip_id, days } => {
            edit_trip(trips, *trip_id, |trip| create_itinerary(trip, days))
        }
    }
}

fn edit_trip<F>(trips: &[Arc<Trip>], trip_id: TripId, edit: F) -> (TripList, MutationOutcome)
where
    F: FnOnce(&Trip) -> EditResult,
{
    let Some(position) = trips.iter().position(|trip| trip.id == trip_id) else {
        return unchanged(trips, NoOpReason::TripNotFound(trip_id));
    };

    match edit(&trips[position]) {
        Ok((trip, outcome)) => {
            let mut next = trips.to_vec();
            next[position] = Arc::new(trip);
            (next, outcome)
        }
        Err(reason) => unchanged(trips, reason),
    }
}

fn unchanged(trips: &[Arc<Trip>], reason: NoOpReason) -> (TripList, MutationOutcome) {
    (trips.to_vec(), MutationOutcome::NoOp(reason))
}

fn missing(section: SectionRef, item_id: ItemId) -> NoOpReason {
    match section.day_id() {
        Some(day_id) => NoOpReason::DayNotFound(day_id),
        None => NoOpReason::ItemNotFound(item_id),
    }
}

/// Appends a newly admitted place to the end of `section`.
pub fn add_item(trip: &Trip, section: SectionRef, payload: PlacePayload) -> EditResult {
    let item = PlaceItem::from_payload(payload);
    let item_id = item.id;
    let mut next = trip.clone();
    next.collection_mut(section)
        .ok_or_else(|| missing(section, item_id))?
        .push(item);
    Ok((next, MutationOutcome::Created(item_id)))
}

/// Relocates an item to `to`, inserting at `to_index` (default: end).
///
/// The source collection comes from the locator; `from_hint` is only
/// compared for diagnostics.
pub fn move_item(
    trip: &Trip,
    item_id: ItemId,
    from_hint: Option<SectionRef>,
    to: SectionRef,
    to_index: Option<usize>,
) -> EditResult {
    let source = locate(trip, item_id).ok_or(NoOpReason::ItemNotFound(item_id))?;
    if let Some(hint) = from_hint.filter(|hint| *hint != source.section) {
        debug!(
            "event=move_item module=engine status=hint_mismatch item_id={} hint={} actual={}",
            item_id, hint, source.section
        );
    }
    if trip.collection(to).is_none() {
        return Err(missing(to, item_id));
    }

    let mut next = trip.clone();
    let item = next
        .collection_mut(source.section)
        .filter(|items| source.index < items.len())
        .ok_or(NoOpReason::ItemNotFound(item_id))?
        .remove(source.index);
    let destination = next.collection_mut(to).ok_or_else(|| missing(to, item_id))?;
    let index = to_index
        .unwrap_or(destination.len())
        .min(destination.len());
    destination.insert(index, item);
    Ok((next, MutationOutcome::Applied))
}

/// Moves an item within its own collection.
///
/// `to_index` is interpreted against the collection with the item removed:
/// `[A, B, C, D]` with `A -> 2` yields `[B, C, A, D]`.
pub fn reorder_item(
    trip: &Trip,
    item_id: ItemId,
    section: SectionRef,
    to_index: usize,
) -> EditResult {
    let items = trip
        .collection(section)
        .ok_or_else(|| missing(section, item_id))?;
    let from_index = items
        .iter()
        .position(|item| item.id == item_id)
        .ok_or(NoOpReason::ItemNotFound(item_id))?;

    let mut next = trip.clone();
    let items = next
        .collection_mut(section)
        .ok_or_else(|| missing(section, item_id))?;
    let item = items.remove(from_index);
    let index = to_index.min(items.len());
    items.insert(index, item);
    Ok((next, MutationOutcome::Applied))
}

/// Deletes an item from the named collection.
pub fn remove_item(trip: &Trip, item_id: ItemId, section: SectionRef) -> EditResult {
    let position = trip
        .collection(section)
        .ok_or_else(|| missing(section, item_id))?
        .iter()
        .position(|item| item.id == item_id)
        .ok_or(NoOpReason::ItemNotFound(item_id))?;

    let mut next = trip.clone();
    if let Some(items) = next.collection_mut(section) {
        items.remove(position);
    }
    Ok((next, MutationOutcome::Applied))
}

/// Shallow-merges `patch` onto an item in place (same index, same id).
pub fn update_item(
    trip: &Trip,
    item_id: ItemId,
    section: SectionRef,
    patch: &ItemPatch,
) -> EditResult {
    let mut next = trip.clone();
    let item = next
        .collection_mut(section)
        .ok_or_else(|| missing(section, item_id))?
        .iter_mut()
        .find(|item| item.id == item_id)
        .ok_or(NoOpReason::ItemNotFound(item_id))?;
    item.apply_patch(patch);
    Ok((next, MutationOutcome::Applied))
}

/// Appends a day. Without a name it is labelled `Day <count + 1>`.
///
/// The default label is positional: removing `Day 2` of three and adding a
/// new day yields another `Day 3`.
pub fn add_day(trip: &Trip, name: Option<&str>) -> (Trip, MutationOutcome) {
    let name = name.map_or_else(|| DaySection::default_name(trip.days.len()), str::to_string);
    let day = DaySection::new(name);
    let day_id = day.id;
    let mut next = trip.clone();
    next.days.push(day);
    (next, MutationOutcome::Created(day_id))
}

pub fn rename_day(trip: &Trip, day_id: DayId, name: &str) -> EditResult {
    let mut next = trip.clone();
    let day = next
        .days
        .iter_mut()
        .find(|day| day.id == day_id)
        .ok_or(NoOpReason::DayNotFound(day_id))?;
    day.name = name.to_string();
    Ok((next, MutationOutcome::Applied))
}

/// Deletes a day together with its items.
pub fn remove_day(trip: &Trip, day_id: DayId) -> EditResult {
    if trip.day(day_id).is_none() {
        return Err(NoOpReason::DayNotFound(day_id));
    }
    let mut next = trip.clone();
    next.days.retain(|day| day.id != day_id);
    Ok((next, MutationOutcome::Applied))
}

/// Appends one fresh day per proposed entry.
///
/// Existing days and flat collections are untouched; proposed places are
/// copies, never moves, even when they match existing items.
pub fn create_itinerary(trip: &Trip, days: &[ProposedDay]) -> EditResult {
    if days.is_empty() {
        return Err(NoOpReason::EmptyItinerary);
    }
    let mut next = trip.clone();
    next.days.extend(days.iter().map(|proposed| {
        let mut day = DaySection::new(proposed.day_name.clone());
        day.items = proposed
            .places
            .iter()
            .cloned()
            .map(PlaceItem::from_payload)
            .collect();
        day
    }));
    Ok((next, MutationOutcome::Applied))
}
