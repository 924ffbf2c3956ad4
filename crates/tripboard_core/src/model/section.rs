//! Collection addressing for one trip.
//!
//! # Responsibility
//! - Name the three flat collections and the per-day collections as one
//!   closed variant, so every routing `match` is exhaustive.
//! - Provide a stable text form (`wishlist`, `todo`, `recommendedPlaces`,
//!   `days:<uuid>`) for commands, drop-zone metadata and logs.

use crate::model::trip::DayId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

const DAY_PREFIX: &str = "days:";

/// One of the three day-independent collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlatSection {
    #[serde(rename = "wishlist")]
    Wishlist,
    #[serde(rename = "todo")]
    Todo,
    #[serde(rename = "recommendedPlaces")]
    Recommended,
}

impl FlatSection {
    /// Order in which the locator scans flat collections.
    pub const SCAN_ORDER: [FlatSection; 3] = [
        FlatSection::Recommended,
        FlatSection::Wishlist,
        FlatSection::Todo,
    ];

    /// Wire/document field name.
    pub fn key(self) -> &'static str {
        match self {
            Self::Wishlist => "wishlist",
            Self::Todo => "todo",
            Self::Recommended => "recommendedPlaces",
        }
    }

    /// Human-readable heading.
    pub fn title(self) -> &'static str {
        match self {
            Self::Wishlist => "Wishlist",
            Self::Todo => "To Do",
            Self::Recommended => "Recommended",
        }
    }

    fn from_key(value: &str) -> Option<Self> {
        match value {
            "wishlist" => Some(Self::Wishlist),
            "todo" => Some(Self::Todo),
            "recommendedPlaces" | "recommended" => Some(Self::Recommended),
            _ => None,
        }
    }
}

/// Address of one collection inside a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SectionRef {
    Flat(FlatSection),
    Day(DayId),
}

impl SectionRef {
    pub const WISHLIST: SectionRef = SectionRef::Flat(FlatSection::Wishlist);
    pub const TODO: SectionRef = SectionRef::Flat(FlatSection::Todo);
    pub const RECOMMENDED: SectionRef = SectionRef::Flat(FlatSection::Recommended);

    /// Returns the day id when this addresses a day.
    pub fn day_id(self) -> Option<DayId> {
        match self {
            Self::Flat(_) => None,
            Self::Day(day_id) => Some(day_id),
        }
    }

    pub fn is_day(self) -> bool {
        matches!(self, Self::Day(_))
    }
}

impl From<FlatSection> for SectionRef {
    fn from(value: FlatSection) -> Self {
        Self::Flat(value)
    }
}

impl Display for SectionRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flat(flat) => f.write_str(flat.key()),
            Self::Day(day_id) => write!(f, "{DAY_PREFIX}{day_id}"),
        }
    }
}

/// Section text could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionParseError(String);

impl Display for SectionParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid section `{}`; expected wishlist|todo|recommendedPlaces|days:<uuid>",
            self.0
        )
    }
}

impl Error for SectionParseError {}

impl FromStr for SectionRef {
    type Err = SectionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if let Some(flat) = FlatSection::from_key(trimmed) {
            return Ok(Self::Flat(flat));
        }
        trimmed
            .strip_prefix(DAY_PREFIX)
            .and_then(|raw| Uuid::parse_str(raw).ok())
            .map(Self::Day)
            .ok_or_else(|| SectionParseError(trimmed.to_string()))
    }
}

impl TryFrom<String> for SectionRef {
    type Error = SectionParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SectionRef> for String {
    fn from(value: SectionRef) -> Self {
        value.to_string()
    }
}
