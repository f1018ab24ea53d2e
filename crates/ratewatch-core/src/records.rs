use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Bookability of a hotel for one night.
///
/// The variants form a precedence ladder: a property-wide sellout outranks
/// numeric scarcity, which outranks room-type constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailabilityStatus {
    Available,
    LowStock,
    SoldOut,
}

impl AvailabilityStatus {
    /// Returns `true` for `LowStock` and `SoldOut`.
    #[must_use]
    pub fn is_constrained(self) -> bool {
        matches!(self, Self::LowStock | Self::SoldOut)
    }
}

impl std::fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AvailabilityStatus::Available => write!(f, "Available"),
            AvailabilityStatus::LowStock => write!(f, "Low Stock"),
            AvailabilityStatus::SoldOut => write!(f, "Sold Out"),
        }
    }
}

/// Output of the availability classifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
    pub status: AvailabilityStatus,
    /// Constraint descriptions in rule-evaluation order. Always empty for
    /// `SoldOut` and `Available`.
    pub notes: Vec<String>,
}

impl Availability {
    #[must_use]
    pub fn available() -> Self {
        Self {
            status: AvailabilityStatus::Available,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn sold_out() -> Self {
        Self {
            status: AvailabilityStatus::SoldOut,
            notes: Vec::new(),
        }
    }

    #[must_use]
    pub fn low_stock(notes: Vec<String>) -> Self {
        Self {
            status: AvailabilityStatus::LowStock,
            notes,
        }
    }
}

/// Rate and availability extracted for one hotel on one date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelSignal {
    /// Nightly rate in whole US dollars; `None` when no confident match.
    pub rate: Option<u32>,
    pub availability: AvailabilityStatus,
    pub notes: Vec<String>,
}

impl HotelSignal {
    #[must_use]
    pub fn new(rate: Option<u32>, availability: Availability) -> Self {
        Self {
            rate,
            availability: availability.status,
            notes: availability.notes,
        }
    }

    /// A signal for a record whose content could not be obtained or
    /// processed. The rate is absent and the status stays at the default
    /// `Available`; `reason` is surfaced as the only note.
    #[must_use]
    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            rate: None,
            availability: AvailabilityStatus::Available,
            notes: vec![reason.into()],
        }
    }

    /// Notes joined for display, e.g. `"Queen beds sold out, 2 king beds left"`.
    #[must_use]
    pub fn notes_display(&self) -> String {
        self.notes.join(", ")
    }

    /// Flattened form handed to callers outside the workspace.
    #[must_use]
    pub fn to_output(&self) -> SignalOutput {
        SignalOutput {
            rate: self.rate,
            availability: self.availability,
            notes: self.notes_display(),
        }
    }
}

/// Serialized shape of a [`HotelSignal`]: `{ rate, availability, notes }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalOutput {
    pub rate: Option<u32>,
    pub availability: AvailabilityStatus,
    pub notes: String,
}

/// All hotel signals for a single stay date, keyed by hotel key.
///
/// Records are rebuilt from scratch on every collection cycle; there is no
/// merge with a previous cycle's values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelRateRecord {
    pub date: NaiveDate,
    pub signals: BTreeMap<String, HotelSignal>,
}

impl HotelRateRecord {
    #[must_use]
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            signals: BTreeMap::new(),
        }
    }

    /// Stores the signal for `hotel_key`, replacing any earlier value.
    pub fn insert(&mut self, hotel_key: impl Into<String>, signal: HotelSignal) {
        self.signals.insert(hotel_key.into(), signal);
    }

    #[must_use]
    pub fn get(&self, hotel_key: &str) -> Option<&HotelSignal> {
        self.signals.get(hotel_key)
    }

    #[must_use]
    pub fn rate(&self, hotel_key: &str) -> Option<u32> {
        self.get(hotel_key).and_then(|s| s.rate)
    }
}
