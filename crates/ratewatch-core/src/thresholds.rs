//! Tunable limits for rate extraction and availability classification.
//!
//! Every limit is exposed as a named default so callers can override it from
//! configuration without touching the extraction code.

use std::ops::RangeInclusive;

/// Lowest nightly rate accepted when the amount has contextual support
/// (structured data, hotel-name proximity, or a rate keyword).
pub const ANCHORED_RATE_MIN_USD: u32 = 50;
/// Highest nightly rate accepted when the amount has contextual support.
pub const ANCHORED_RATE_MAX_USD: u32 = 800;
/// Lowest nightly rate accepted for a bare `$`-amount with no context.
pub const UNANCHORED_RATE_MIN_USD: u32 = 80;
/// Highest nightly rate accepted for a bare `$`-amount with no context.
pub const UNANCHORED_RATE_MAX_USD: u32 = 500;
/// Lines scanned above and below a hotel-name mention.
pub const NAME_WINDOW_LINES: usize = 3;
/// A "N rooms left" banner counts as low stock at or below this count.
pub const LOW_STOCK_ROOMS_MAX: u32 = 5;
/// A "N king beds left" banner counts as a constraint at or below this count.
pub const LOW_STOCK_BEDS_MAX: u32 = 3;

/// Limits consumed by the extraction engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionThresholds {
    pub anchored_rate_range: RangeInclusive<u32>,
    pub unanchored_rate_range: RangeInclusive<u32>,
    pub name_window_lines: usize,
    pub low_stock_rooms_max: u32,
    pub low_stock_beds_max: u32,
}

impl Default for ExtractionThresholds {
    fn default() -> Self {
        Self {
            anchored_rate_range: ANCHORED_RATE_MIN_USD..=ANCHORED_RATE_MAX_USD,
            unanchored_rate_range: UNANCHORED_RATE_MIN_USD..=UNANCHORED_RATE_MAX_USD,
            name_window_lines: NAME_WINDOW_LINES,
            low_stock_rooms_max: LOW_STOCK_ROOMS_MAX,
            low_stock_beds_max: LOW_STOCK_BEDS_MAX,
        }
    }
}

impl ExtractionThresholds {
    /// Returns the name of the first rate range that cannot contain any
    /// value, if any.
    #[must_use]
    pub fn empty_range(&self) -> Option<&'static str> {
        if self.anchored_rate_range.is_empty() {
            Some("anchored_rate_range")
        } else if self.unanchored_rate_range.is_empty() {
            Some("unanchored_rate_range")
        } else {
            None
        }
    }
}
