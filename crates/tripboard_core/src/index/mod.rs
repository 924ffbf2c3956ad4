//! Item lookup by id.
//!
//! # Responsibility
//! - Answer "which collection currently holds this item" for one trip.
//! - Keep an authoritative id -> location map that the store refreshes inside
//!   every applied mutation.
//!
//! # Invariants
//! - Scan order is recommended, wishlist, todo, then days in array order.
//! - Index and scan agree for every id once duplicate ids are repaired.

pub mod item_index;
pub mod locator;
