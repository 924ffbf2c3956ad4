//! Plain-text trip outline and export file naming.
//!
//! # Responsibility
//! - Render a trip as a printable outline: title, then Recommended, Wishlist,
//!   To Do, then each day in order.
//! - Derive a filesystem-safe file name from the trip name.
//!
//! # Invariants
//! - Rendering is a pure read of the trip.
//! - Sections without items are still printed, with an `(empty)` marker.

use crate::model::section::FlatSection;
use crate::model::trip::{PlaceItem, Trip};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

const EXPORT_FILE_EXTENSION: &str = "txt";
const FALLBACK_FILE_STEM: &str = "Trip";
const EMPTY_MARKER: &str = "(empty)";
const DISPLAY_ORDER: [FlatSection; 3] = [
    FlatSection::Recommended,
    FlatSection::Wishlist,
    FlatSection::Todo,
];

static UNSAFE_FILE_CHARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\?%*:|"<>]"#).expect("valid file name regex"));

/// Renders the trip as a text outline.
pub fn render_outline(trip: &Trip) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", trip.name);
    let _ = writeln!(out, "{}", "=".repeat(trip.name.chars().count().max(1)));

    for section in DISPLAY_ORDER {
        write_section(&mut out, section.title(), trip.flat(section));
    }
    for day in &trip.days {
        write_section(&mut out, &day.name, &day.items);
    }
    out
}

fn write_section(out: &mut String, heading: &str, items: &[PlaceItem]) {
    let _ = writeln!(out);
    let _ = writeln!(out, "{heading}");
    if items.is_empty() {
        let _ = writeln!(out, "  {EMPTY_MARKER}");
        return;
    }
    for (position, item) in items.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", position + 1, item.name);
        if let Some(recommended_for) = non_blank(item.recommended_for.as_deref()) {
            let _ = writeln!(out, "     For: {recommended_for}");
        }
        if let Some(instructions) = non_blank(item.instructions.as_deref()) {
            let _ = writeln!(out, "     {instructions}");
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

/// File name for an exported outline; `Kyoto/Osaka` becomes `Kyoto-Osaka.txt`.
pub fn export_file_name(trip: &Trip) -> String {
    let sanitized = UNSAFE_FILE_CHARS_RE.replace_all(&trip.name, "-");
    let stem = sanitized.trim();
    let stem = if stem.is_empty() {
        FALLBACK_FILE_STEM
    } else {
        stem
    };
    format!("{stem}.{EXPORT_FILE_EXTENSION}")
}
