//! Trip state container and mutation engine.
//!
//! # Responsibility
//! - Define the command set for every structural edit.
//! - Evaluate commands as pure functions of (trip list, command).
//! - Hold the session's trip list behind a single write path.
//!
//! # Invariants
//! - Not-found targets are silent no-ops; no command is ever half-applied.
//! - An item id appears in at most one collection after any command.

pub mod command;
pub mod engine;
pub mod trip_store;
