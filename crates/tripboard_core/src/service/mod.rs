//! Use-case services on top of the store and repositories.
//!
//! # Responsibility
//! - Orchestrate persistence round trips around the in-memory store.
//! - Adapt assistant output into store commands.
//!
//! # Invariants
//! - Services mutate trips only through `TripStore`.

pub mod itinerary_service;
pub mod sync_service;
