//! Avatar selection keys
//!
//! The closed set of overlay categories a user can pick: a plain category
//! (day off, vacation) or a business trip qualified by region. Each key maps
//! one-to-one onto an overlay file stem in the catalog.

use std::fmt;

/// Top-level avatar category, as offered by the /start menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    DayOff,
    Vacation,
    BusinessTrip,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::DayOff => "day_off",
            Category::Vacation => "vacation",
            Category::BusinessTrip => "business_trip",
        }
    }

    /// Parses the callback-data suffix sent by the category keyboard.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "day_off" => Some(Category::DayOff),
            "vacation" => Some(Category::Vacation),
            "business_trip" => Some(Category::BusinessTrip),
            _ => None,
        }
    }
}

/// Region for the business-trip category (the time-zone sub-menu)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Utc,
    Dubai,
    Moscow,
    NewYork,
}

impl Region {
    /// All regions, in menu order.
    pub const ALL: [Region; 4] = [Region::Utc, Region::Dubai, Region::Moscow, Region::NewYork];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Utc => "utc",
            Region::Dubai => "dubai",
            Region::Moscow => "moscow",
            Region::NewYork => "ny",
        }
    }

    /// Parses the callback-data suffix sent by the region keyboard.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "utc" => Some(Region::Utc),
            "dubai" => Some(Region::Dubai),
            "moscow" => Some(Region::Moscow),
            "ny" => Some(Region::NewYork),
            _ => None,
        }
    }
}

/// A complete overlay selection
///
/// This is what the session store holds between "category chosen" and
/// "photo submitted", and what the catalog resolves to an overlay file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectionKey {
    DayOff,
    Vacation,
    BusinessTrip(Region),
}

impl SelectionKey {
    /// Stable overlay file stem: the catalog stores `<asset_name>.png`.
    pub fn asset_name(&self) -> &'static str {
        match self {
            SelectionKey::DayOff => "day_off",
            SelectionKey::Vacation => "vacation",
            SelectionKey::BusinessTrip(Region::Utc) => "business_trip_utc",
            SelectionKey::BusinessTrip(Region::Dubai) => "business_trip_dubai",
            SelectionKey::BusinessTrip(Region::Moscow) => "business_trip_moscow",
            SelectionKey::BusinessTrip(Region::NewYork) => "business_trip_ny",
        }
    }

    /// Inverse of [`asset_name`](Self::asset_name), used by the offline CLI.
    pub fn from_asset_name(name: &str) -> Option<Self> {
        match name {
            "day_off" => Some(SelectionKey::DayOff),
            "vacation" => Some(SelectionKey::Vacation),
            other => other
                .strip_prefix("business_trip_")
                .and_then(Region::parse)
                .map(SelectionKey::BusinessTrip),
        }
    }
}

impl fmt::Display for SelectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.asset_name())
    }
}
