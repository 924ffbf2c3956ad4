//! Pointer-driven drag-and-drop over trip collections.
//!
//! # Responsibility
//! - Track a pointer gesture and decide when it becomes a drag.
//! - Hit-test drop zones by pointer containment.
//! - Translate a completed drag into exactly one store command.
//!
//! # See also
//! - `crate::store::trip_store::TripStore` for the write path drops go through.

pub mod drag;
pub mod drop_zone;
pub mod geometry;
pub mod gesture;
