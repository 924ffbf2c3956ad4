//! Read-only trip views for external consumers (assistant, printouts, map).
//!
//! # Invariants
//! - Nothing here mutates a trip; every function takes `&Trip`.

pub mod outline;
pub mod pins;
pub mod projection;
