//! Trip planning domain model.
//!
//! # Responsibility
//! - Define the canonical trip/day/place shapes shared by every core layer.
//! - Provide construction helpers only; all edits live in `store::engine`.
//!
//! # Invariants
//! - Every entity is identified by a core-minted `Uuid` that never changes.
//! - A place item belongs to at most one collection of one trip at a time.
//!
//! # See also
//! - `crate::store::engine` for every structural edit

pub mod proposal;
pub mod section;
pub mod trip;
