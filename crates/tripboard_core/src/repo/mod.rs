//! Persistence contracts and their SQLite implementations.
//!
//! # Responsibility
//! - Define the save/load contract the session sync layer depends on.
//! - Isolate SQL and document encoding from store and service code.
//!
//! # Invariants
//! - Repositories persist whole trip lists; they never merge or patch.

pub mod trip_document_repo;
