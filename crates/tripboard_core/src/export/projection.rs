//! Id-free trip projection handed to the chat assistant.
//!
//! # Invariants
//! - Projections are built from a borrowed trip and never feed back into
//!   the store.
//! - No entity id is present in the output.

use crate::model::trip::{PlaceItem, Trip};
use serde::Serialize;

/// One place reduced to its descriptive fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedPlace {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_for: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl From<&PlaceItem> for ProjectedPlace {
    fn from(item: &PlaceItem) -> Self {
        Self {
            name: item.name.clone(),
            place_id: item.place_id.clone(),
            lat: item.lat,
            lng: item.lng,
            recommended_for: item.recommended_for.clone(),
            instructions: item.instructions.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedDay {
    pub name: String,
    pub items: Vec<ProjectedPlace>,
}

/// Read-only view of a whole trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripProjection {
    pub name: String,
    pub wishlist: Vec<ProjectedPlace>,
    pub todo: Vec<ProjectedPlace>,
    pub recommended_places: Vec<ProjectedPlace>,
    pub days: Vec<ProjectedDay>,
}

impl TripProjection {
    pub fn of(trip: &Trip) -> Self {
        let project = |items: &[PlaceItem]| -> Vec<ProjectedPlace> {
            items.iter().map(ProjectedPlace::from).collect()
        };
        Self {
            name: trip.name.clone(),
            wishlist: project(&trip.wishlist),
            todo: project(&trip.todo),
            recommended_places: project(&trip.recommended_places),
            days: trip
                .days
                .iter()
                .map(|day| ProjectedDay {
                    name: day.name.clone(),
                    items: project(&day.items),
                })
                .collect(),
        }
    }

    /// JSON text sent alongside a chat message.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
