//! Itinerary ingestion from the chat assistant.
//!
//! # Responsibility
//! - Decode the assistant's structured itinerary proposal.
//! - Append it to a trip through the store's single bulk entry point.
//!
//! # Invariants
//! - A proposal that fails to decode creates nothing.
//! - A missing trip or empty proposal never reaches the store.
//! - Ingestion only appends days; existing collections are untouched.

use crate::model::proposal::ProposedDay;
use crate::model::trip::TripId;
use crate::store::trip_store::TripStore;
use log::{debug, info};
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum ItineraryError {
    Malformed(serde_json::Error),
    EmptyProposal,
    TripNotFound(TripId),
}

impl Display for ItineraryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "itinerary proposal is malformed: {err}"),
            Self::EmptyProposal => write!(f, "itinerary proposal has no days"),
            Self::TripNotFound(id) => write!(f, "trip not found: {id}"),
        }
    }
}

impl Error for ItineraryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            Self::EmptyProposal | Self::TripNotFound(_) => None,
        }
    }
}

impl From<serde_json::Error> for ItineraryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Malformed(value)
    }
}

/// Decodes a JSON array of `{dayName, places}` entries.
pub fn parse_proposal(json: &str) -> Result<Vec<ProposedDay>, ItineraryError> {
    Ok(serde_json::from_str(json)?)
}

/// Appends `days` to `trip_id`. Returns the number of days added.
pub fn ingest_itinerary(
    store: &mut TripStore,
    trip_id: TripId,
    days: Vec<ProposedDay>,
) -> Result<usize, ItineraryError> {
    if days.is_empty() {
        debug!("event=itinerary_ingest module=itinerary status=noop reason=empty_proposal");
        return Err(ItineraryError::EmptyProposal);
    }
    if store.trip(trip_id).is_none() {
        debug!("event=itinerary_ingest module=itinerary status=noop reason=trip_not_found");
        return Err(ItineraryError::TripNotFound(trip_id));
    }

    let added = days.len();
    let places: usize = days.iter().map(|day| day.places.len()).sum();
    store.create_itinerary(trip_id, days);
    info!(
        "event=itinerary_ingest module=itinerary status=ok days={added} places={places}"
    );
    Ok(added)
}

/// One assistant reply: display text plus an optional structured itinerary.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub itinerary: Option<Vec<ProposedDay>>,
}

impl ChatReply {
    pub fn parse(json: &str) -> Result<Self, ItineraryError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Applies the reply's itinerary to the selected trip.
///
/// Returns `Ok(None)` when there is nothing to apply: no itinerary, an empty
/// one, or no selected trip.
pub fn ingest_chat_reply(
    store: &mut TripStore,
    reply: ChatReply,
) -> Result<Option<usize>, ItineraryError> {
    let Some(days) = reply.itinerary.filter(|days| !days.is_empty()) else {
        return Ok(None);
    };
    let Some(trip_id) = store.selected_trip_id() else {
        debug!("event=itinerary_ingest module=itinerary status=noop reason=no_selection");
        return Ok(None);
    };
    ingest_itinerary(store, trip_id, days).map(Some)
}
