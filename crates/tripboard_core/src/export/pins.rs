//! Map pin colors per collection.

use crate::model::section::{FlatSection, SectionRef};
use crate::model::trip::Trip;

pub const RECOMMENDED_PIN_COLOR: &str = "#e11d48";
pub const WISHLIST_PIN_COLOR: &str = "#d97706";
pub const TODO_PIN_COLOR: &str = "#059669";

/// Day pins cycle through this palette by day position.
pub const DAY_PIN_COLORS: [&str; 10] = [
    "#7c3aed", "#0ea5e9", "#06b6d4", "#ea580c", "#c026d3", "#4f46e5", "#0d9488", "#ec4899",
    "#84cc16", "#3b82f6",
];

pub fn flat_pin_color(section: FlatSection) -> &'static str {
    match section {
        FlatSection::Recommended => RECOMMENDED_PIN_COLOR,
        FlatSection::Wishlist => WISHLIST_PIN_COLOR,
        FlatSection::Todo => TODO_PIN_COLOR,
    }
}

pub fn day_pin_color(day_position: usize) -> &'static str {
    DAY_PIN_COLORS[day_position % DAY_PIN_COLORS.len()]
}

/// Color for a collection of `trip`; `None` when the day no longer exists.
pub fn pin_color(trip: &Trip, section: SectionRef) -> Option<&'static str> {
    match section {
        SectionRef::Flat(flat) => Some(flat_pin_color(flat)),
        SectionRef::Day(day_id) => trip
            .days
            .iter()
            .position(|day| day.id == day_id)
            .map(day_pin_color),
    }
}
