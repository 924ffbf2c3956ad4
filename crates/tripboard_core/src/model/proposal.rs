//! Structured itinerary proposal received from the assistant.
//!
//! Parsing the natural-language exchange happens outside core; this is only
//! the already-structured payload shape.

use crate::model::trip::PlacePayload;
use serde::{Deserialize, Serialize};

/// Name used when a proposed day arrives without `dayName`.
pub const DEFAULT_PROPOSED_DAY_NAME: &str = "Day";

fn default_day_name() -> String {
    DEFAULT_PROPOSED_DAY_NAME.to_string()
}

/// One proposed itinerary day. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposedDay {
    #[serde(default = "default_day_name")]
    pub day_name: String,
    #[serde(default)]
    pub places: Vec<PlacePayload>,
}

impl ProposedDay {
    pub fn new(day_name: impl Into<String>, places: Vec<PlacePayload>) -> Self {
        Self {
            day_name: day_name.into(),
            places,
        }
    }
}
