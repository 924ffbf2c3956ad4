//! Mutation commands and their outcomes.
//!
//! # Responsibility
//! - Express every structural edit as one serializable value.
//! - Report why a command left state unchanged without failing the caller.
//!
//! # Invariants
//! - A `NoOp` outcome always means the trip list is unchanged.
//! - `Created` carries the primary id minted by the command.

use crate::model::proposal::ProposedDay;
use crate::model::section::{FlatSection, SectionRef};
use crate::model::trip::{DayId, ItemId, ItemPatch, PlacePayload, TripId};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// One structural edit against the trip list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum TripCommand {
    AddTrip {
        #[serde(default)]
        name: Option<String>,
    },
    RenameTrip {
        trip_id: TripId,
        name: String,
    },
    DeleteTrip {
        trip_id: TripId,
    },
    CloneTrip {
        trip_id: TripId,
    },
    AddItemToSection {
        trip_id: TripId,
        section: FlatSection,
        payload: PlacePayload,
    },
    AddItemToDay {
        trip_id: TripId,
        day_id: DayId,
        payload: PlacePayload,
    },
    /// `from` is a caller hint only; the item's scanned location is authoritative.
    MoveItem {
        trip_id: TripId,
        item_id: ItemId,
        #[serde(default)]
        from: Option<SectionRef>,
        to: SectionRef,
        #[serde(default)]
        to_index: Option<usize>,
    },
    ReorderItem {
        trip_id: TripId,
        item_id: ItemId,
        section: SectionRef,
        to_index: usize,
    },
    RemoveItem {
        trip_id: TripId,
        item_id: ItemId,
        section: SectionRef,
    },
    UpdateItem {
        trip_id: TripId,
        item_id: ItemId,
        section: SectionRef,
        patch: ItemPatch,
    },
    AddDaySection {
        trip_id: TripId,
        #[serde(default)]
        name: Option<String>,
    },
    RenameDaySection {
        trip_id: TripId,
        day_id: DayId,
        name: String,
    },
    RemoveDaySection {
        trip_id: TripId,
        day_id: DayId,
    },
    CreateItinerary {
        trip_id: TripId,
        days: Vec<ProposedDay>,
    },
}

impl TripCommand {
    /// Stable operation name used in logs.
    pub fn op_name(&self) -> &'static str {
        match self {
            Self::AddTrip { .. } => "add_trip",
            Self::RenameTrip { .. } => "rename_trip",
            Self::DeleteTrip { .. } => "delete_trip",
            Self::CloneTrip { .. } => "clone_trip",
            Self::AddItemToSection { .. } => "add_item_to_section",
            Self::AddItemToDay { .. } => "add_item_to_day",
            Self::MoveItem { .. } => "move_item",
            Self::ReorderItem { .. } => "reorder_item",
            Self::RemoveItem { .. } => "remove_item",
            Self::UpdateItem { .. } => "update_item",
            Self::AddDaySection { .. } => "add_day_section",
            Self::RenameDaySection { .. } => "rename_day_section",
            Self::RemoveDaySection { .. } => "remove_day_section",
            Self::CreateItinerary { .. } => "create_itinerary",
        }
    }

    /// Trip targeted by this command; `None` for trip creation.
    pub fn trip_id(&self) -> Option<TripId> {
        match self {
            Self::AddTrip { .. } => None,
            Self::RenameTrip { trip_id, .. }
            | Self::DeleteTrip { trip_id }
            | Self::CloneTrip { trip_id }
            | Self::AddItemToSection { trip_id, .. }
            | Self::AddItemToDay { trip_id, .. }
            | Self::MoveItem { trip_id, .. }
            | Self::ReorderItem { trip_id, .. }
            | Self::RemoveItem { trip_id, .. }
            | Self::UpdateItem { trip_id, .. }
            | Self::AddDaySection { trip_id, .. }
            | Self::RenameDaySection { trip_id, .. }
            | Self::RemoveDaySection { trip_id, .. }
            | Self::CreateItinerary { trip_id, .. } => Some(*trip_id),
        }
    }
}

/// Why a command left the trip list unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    TripNotFound(TripId),
    DayNotFound(DayId),
    ItemNotFound(ItemId),
    EmptyItinerary,
}

impl Display for NoOpReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TripNotFound(id) => write!(f, "trip_not_found:{id}"),
            Self::DayNotFound(id) => write!(f, "day_not_found:{id}"),
            Self::ItemNotFound(id) => write!(f, "item_not_found:{id}"),
            Self::EmptyItinerary => f.write_str("empty_itinerary"),
        }
    }
}

/// Result of applying one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// State changed; nothing new was minted that callers need to know about.
    Applied,
    /// State changed and a new trip/day/item with this id was minted.
    Created(Uuid),
    /// State unchanged.
    NoOp(NoOpReason),
}

impl MutationOutcome {
    pub fn is_applied(&self) -> bool {
        !matches!(self, Self::NoOp(_))
    }

    pub fn created_id(&self) -> Option<Uuid> {
        match self {
            Self::Created(id) => Some(*id),
            _ => None,
        }
    }

    pub fn noop_reason(&self) -> Option<NoOpReason> {
        match self {
            Self::NoOp(reason) => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TripCommand;
    use crate::model::section::SectionRef;
    use uuid::Uuid;

    #[test]
    fn move_command_parses_from_wire_json() {
        let trip_id = Uuid::new_v4();
        let item_id = Uuid::new_v4();
        let day_id = Uuid::new_v4();
        let json = format!(
            r#"{{"op":"move_item","tripId":"{trip_id}","itemId":"{item_id}","from":"wishlist","to":"days:{day_id}"}}"#
        );

        let command: TripCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(
            command,
            TripCommand::MoveItem {
                trip_id,
                item_id,
                from: Some(SectionRef::WISHLIST),
                to: SectionRef::Day(day_id),
                to_index: None,
            }
        );
        assert_eq!(command.op_name(), "move_item");
        assert_eq!(command.trip_id(), Some(trip_id));
    }

    #[test]
    fn add_trip_name_is_optional() {
        let command: TripCommand = serde_json::from_str(r#"{"op":"add_trip"}"#).unwrap();
        assert_eq!(command, TripCommand::AddTrip { name: None });
        assert_eq!(command.trip_id(), None);
    }
}
