//! Core trip-planning state for tripboard.
//! This crate is the single source of truth for trip and collection invariants.

pub mod config;
pub mod db;
pub mod export;
pub mod index;
pub mod interaction;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{AppConfig, ConfigError};
pub use index::item_index::ItemIndex;
pub use index::locator::{locate, ItemLocation};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::proposal::ProposedDay;
pub use model::section::{FlatSection, SectionRef};
pub use model::trip::{
    DayId, DaySection, ItemId, ItemPatch, PlaceItem, PlacePayload, Trip, TripId,
};
pub use repo::trip_document_repo::{
    SqliteTripDocumentRepository, TripDocumentRepoError, TripDocumentRepository,
    TripDocumentResult,
};
pub use service::itinerary_service::{
    ingest_chat_reply, ingest_itinerary, parse_proposal, ChatReply, ItineraryError,
};
pub use service::sync_service::{PendingSave, SyncError, SyncStatus, TripSync, UserId};
pub use store::command::{MutationOutcome, NoOpReason, TripCommand};
pub use store::trip_store::{TripSnapshot, TripStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
