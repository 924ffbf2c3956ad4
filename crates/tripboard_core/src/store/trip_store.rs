//! In-memory trip list container.
//!
//! # Responsibility
//! - Own the single trip list and the current selection for one session.
//! - Route every edit through `engine::apply_command` and keep the per-trip
//!   item index in step with the list.
//! - Hand out immutable snapshots to readers (map, export, persistence).
//!
//! # Invariants
//! - Snapshots taken earlier never observe later edits.
//! - Item indexes exist for exactly the trips in the list and are refreshed
//!   for every trip an applied command rebuilt.
//! - Selection is either `None` or the id of a trip in the list.

use crate::index::item_index::{reassign_duplicate_ids, ItemIndex};
use crate::index::locator::ItemLocation;
use crate::model::proposal::ProposedDay;
use crate::model::section::{FlatSection, SectionRef};
use crate::model::trip::{DayId, ItemId, ItemPatch, PlacePayload, Trip, TripId};
use crate::store::command::{MutationOutcome, TripCommand};
use crate::store::engine::{apply_command, TripList};
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;

/// Immutable point-in-time view of the trip list.
#[derive(Debug, Clone, Default)]
pub struct TripSnapshot {
    trips: TripList,
}

impl TripSnapshot {
    pub fn trips(&self) -> &[Arc<Trip>] {
        &self.trips
    }

    pub fn trip(&self, trip_id: TripId) -> Option<&Trip> {
        self.trips
            .iter()
            .find(|trip| trip.id == trip_id)
            .map(Arc::as_ref)
    }

    /// Owned copy in document order, as handed to persistence.
    pub fn to_trips(&self) -> Vec<Trip> {
        self.trips.iter().map(|trip| trip.as_ref().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }
}

/// Session-scoped trip state container.
#[derive(Debug, Default)]
pub struct TripStore {
    trips: TripList,
    indexes: HashMap<TripId, ItemIndex>,
    selected_trip_id: Option<TripId>,
}

impl TripStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store populated as if `trips` had just been loaded.
    pub fn with_trips(trips: Vec<Trip>) -> Self {
        let mut store = Self::new();
        store.set_trips(trips);
        store
    }

    /// Replaces the whole trip list (load or sign-out).
    ///
    /// Duplicate ids in incoming data are re-minted first. Selection survives
    /// when its trip is still present, otherwise falls back to the first trip.
    pub fn set_trips(&mut self, mut trips: Vec<Trip>) {
        reassign_duplicate_ids(&mut trips);
        self.trips = trips.into_iter().map(Arc::new).collect();
        self.indexes = self
            .trips
            .iter()
            .map(|trip| (trip.id, ItemIndex::build(trip)))
            .collect();
        self.selected_trip_id = self
            .selected_trip_id
            .filter(|selected| self.indexes.contains_key(selected))
            .or_else(|| self.trips.first().map(|trip| trip.id));
        info!(
            "event=trips_replaced module=store status=ok trips={} selected={}",
            self.trips.len(),
            self.selected_trip_id.is_some()
        );
    }

    /// Empties the list and clears selection.
    pub fn clear(&mut self) {
        self.set_trips(Vec::new());
    }

    /// Applies one command; the only write path for incremental edits.
    pub fn apply(&mut self, command: &TripCommand) -> MutationOutcome {
        let (next, outcome) = apply_command(&self.trips, command);
        match outcome {
            MutationOutcome::NoOp(reason) => {
                debug!(
                    "event=mutation module=store status=noop op={} reason={}",
                    command.op_name(),
                    reason
                );
                return outcome;
            }
            MutationOutcome::Applied | MutationOutcome::Created(_) => {}
        }

        self.refresh_indexes(&next);
        self.trips = next;
        if self
            .selected_trip_id
            .is_some_and(|selected| !self.indexes.contains_key(&selected))
        {
            self.selected_trip_id = self.trips.first().map(|trip| trip.id);
        }
        debug!(
            "event=mutation module=store status=ok op={} trips={}",
            command.op_name(),
            self.trips.len()
        );
        outcome
    }

    fn refresh_indexes(&mut self, next: &[Arc<Trip>]) {
        let previous: HashMap<TripId, &Arc<Trip>> =
            self.trips.iter().map(|trip| (trip.id, trip)).collect();
        let mut indexes = HashMap::with_capacity(next.len());
        for trip in next {
            let reusable = previous
                .get(&trip.id)
                .is_some_and(|old| Arc::ptr_eq(old, trip));
            let index = match self.indexes.remove(&trip.id) {
                Some(index) if reusable => index,
                _ => ItemIndex::build(trip),
            };
            indexes.insert(trip.id, index);
        }
        self.indexes = indexes;
    }

    pub fn snapshot(&self) -> TripSnapshot {
        TripSnapshot {
            trips: self.trips.clone(),
        }
    }

    pub fn trips(&self) -> &[Arc<Trip>] {
        &self.trips
    }

    pub fn trip(&self, trip_id: TripId) -> Option<&Trip> {
        self.trips
            .iter()
            .find(|trip| trip.id == trip_id)
            .map(Arc::as_ref)
    }

    pub fn len(&self) -> usize {
        self.trips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trips.is_empty()
    }

    /// Looks up an item through the maintained index.
    pub fn locate(&self, trip_id: TripId, item_id: ItemId) -> Option<ItemLocation> {
        self.indexes.get(&trip_id)?.get(item_id)
    }

    pub fn item_index(&self, trip_id: TripId) -> Option<&ItemIndex> {
        self.indexes.get(&trip_id)
    }

    pub fn selected_trip_id(&self) -> Option<TripId> {
        self.selected_trip_id
    }

    pub fn selected_trip(&self) -> Option<&Trip> {
        self.selected_trip_id.and_then(|trip_id| self.trip(trip_id))
    }

    /// Selects a trip; returns `false` (selection unchanged) for unknown ids.
    pub fn select_trip(&mut self, trip_id: Option<TripId>) -> bool {
        match trip_id {
            Some(id) if !self.indexes.contains_key(&id) => false,
            other => {
                self.selected_trip_id = other;
                true
            }
        }
    }

    /// Appends an empty "New Trip" and returns its id.
    pub fn add_trip(&mut self) -> TripId {
        let outcome = self.apply(&TripCommand::AddTrip { name: None });
        match outcome.created_id() {
            Some(trip_id) => trip_id,
            None => unreachable!("add_trip always creates a trip"),
        }
    }

    pub fn rename_trip(&mut self, trip_id: TripId, name: impl Into<String>) -> MutationOutcome {
        self.apply(&TripCommand::RenameTrip {
            trip_id,
            name: name.into(),
        })
    }

    pub fn delete_trip(&mut self, trip_id: TripId) -> MutationOutcome {
        self.apply(&TripCommand::DeleteTrip { trip_id })
    }

    /// Deep-copies a trip with fresh ids; returns the copy's id.
    pub fn clone_trip(&mut self, trip_id: TripId) -> Option<TripId> {
        self.apply(&TripCommand::CloneTrip { trip_id })
            .created_id()
    }

    pub fn add_item_to_section(
        &mut self,
        trip_id: TripId,
        section: FlatSection,
        payload: PlacePayload,
    ) -> Option<ItemId> {
        self.apply(&TripCommand::AddItemToSection {
            trip_id,
            section,
            payload,
        })
        .created_id()
    }

    pub fn add_item_to_day(
        &mut self,
        trip_id: TripId,
        day_id: DayId,
        payload: PlacePayload,
    ) -> Option<ItemId> {
        self.apply(&TripCommand::AddItemToDay {
            trip_id,
            day_id,
            payload,
        })
        .created_id()
    }

    pub fn move_item(
        &mut self,
        trip_id: TripId,
        item_id: ItemId,
        from: Option<SectionRef>,
        to: SectionRef,
        to_index: Option<usize>,
    ) -> MutationOutcome {
        self.apply(&TripCommand::MoveItem {
            trip_id,
            item_id,
            from,
            to,
            to_index,
        })
    }

    pub fn reorder_item(
        &mut self,
        trip_id: TripId,
        item_id: ItemId,
        section: SectionRef,
        to_index: usize,
    ) -> MutationOutcome {
        self.apply(&TripCommand::ReorderItem {
            trip_id,
            item_id,
            section,
            to_index,
        })
    }

    pub fn remove_item(
        &mut self,
        trip_id: TripId,
        item_id: ItemId,
        section: SectionRef,
    ) -> MutationOutcome {
        self.apply(&TripCommand::RemoveItem {
            trip_id,
            item_id,
            section,
        })
    }

    pub fn update_item(
        &mut self,
        trip_id: TripId,
        item_id: ItemId,
        section: SectionRef,
        patch: ItemPatch,
    ) -> MutationOutcome {
        self.apply(&TripCommand::UpdateItem {
            trip_id,
            item_id,
            section,
            patch,
        })
    }

    pub fn add_day_section(&mut self, trip_id: TripId, name: Option<String>) -> Option<DayId> {
        self.apply(&TripCommand::AddDaySection { trip_id, name })
            .created_id()
    }

    pub fn rename_day_section(
        &mut self,
        trip_id: TripId,
        day_id: DayId,
        name: impl Into<String>,
    ) -> MutationOutcome {
        self.apply(&TripCommand::RenameDaySection {
            trip_id,
            day_id,
            name: name.into(),
        })
    }

    pub fn remove_day_section(&mut self, trip_id: TripId, day_id: DayId) -> MutationOutcome {
        self.apply(&TripCommand::RemoveDaySection { trip_id, day_id })
    }

    pub fn create_itinerary(&mut self, trip_id: TripId, days: Vec<ProposedDay>) -> MutationOutcome {
        self.apply(&TripCommand::CreateItinerary { trip_id, days })
    }
}
