//! Availability classification.
//!
//! Rules are evaluated in precedence order and the first rule that fires
//! decides the status:
//!
//! 1. a property-wide sold-out phrase → `SoldOut`
//! 2. a low room count → `LowStock` with one note
//! 3. bed-type constraints → `LowStock` with one note per constraint
//! 4. otherwise → `Available`

use once_cell::sync::Lazy;
use ratewatch_core::{Availability, ExtractionThresholds};
use regex::Regex;

use crate::html::PageContent;
use crate::text::contains_any;

/// Phrases that mean the whole property is unbookable. Matched against
/// lowercased text after bed-type sold-out phrases have been removed, so
/// "King beds sold out" alone never marks the property sold out.
const SOLD_OUT_PHRASES: &[&str] = &[
    "sold out",
    "no availability",
    "no rooms available",
    "fully booked",
];

/// Room-count banners, tried in order. A pattern whose count exceeds the
/// limit does not stop later patterns from being tried.
static LOW_STOCK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\bonly\s+(\d+)\s+rooms?\b",
        r"(?i)\bonly\s+(\d+)\s+left\b",
        r"(?i)\b(\d+)\s+rooms?\s+left\b",
        r"(?i)\blast\s+(\d+)\s+rooms?\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

struct BedType {
    /// Capitalised form used in sold-out notes.
    display: &'static str,
    /// Lowercase form used in count notes.
    label: &'static str,
    sold_out: Regex,
    remaining: Regex,
}

impl BedType {
    fn new(display: &'static str, label: &'static str) -> Self {
        Self {
            display,
            label,
            sold_out: Regex::new(&format!(r"(?i)\b{label}\s+(?:beds?|rooms?)\s+(?:are\s+)?sold\s+out"))
                .expect("valid regex"),
            remaining: Regex::new(&format!(r"(?i)\b(\d+)\s+{label}\s+(?:beds?|rooms?)\s+left\b"))
                .expect("valid regex"),
        }
    }
}

/// Bed types checked for constraints, in note order.
static BED_TYPES: Lazy<Vec<BedType>> =
    Lazy::new(|| vec![BedType::new("King", "king"), BedType::new("Queen", "queen")]);

/// Stateless availability classifier parameterised by low-stock limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityClassifier {
    rooms_max: u32,
    beds_max: u32,
}

impl Default for AvailabilityClassifier {
    fn default() -> Self {
        Self::new(&ExtractionThresholds::default())
    }
}

impl AvailabilityClassifier {
    #[must_use]
    pub fn new(thresholds: &ExtractionThresholds) -> Self {
        Self {
            rooms_max: thresholds.low_stock_rooms_max,
            beds_max: thresholds.low_stock_beds_max,
        }
    }

    /// Classifies the bookability signals in `content`.
    #[must_use]
    pub fn classify(&self, content: &str) -> Availability {
        self.classify_page(&PageContent::new(content))
    }

    pub(crate) fn classify_page(&self, page: &PageContent<'_>) -> Availability {
        let text = page.text();

        if property_sold_out(text) {
            tracing::debug!("property sold out");
            return Availability::sold_out();
        }

        if let Some(rooms) = self.low_room_count(text) {
            tracing::debug!(rooms, "low room count");
            return Availability::low_stock(vec![format!("Only {rooms} rooms left")]);
        }

        let notes = self.bed_constraints(text);
        if notes.is_empty() {
            Availability::available()
        } else {
            tracing::debug!(?notes, "bed-type constraints");
            Availability::low_stock(notes)
        }
    }

    fn low_room_count(&self, text: &str) -> Option<u32> {
        LOW_STOCK_PATTERNS.iter().find_map(|pattern| {
            let count = capture_count(pattern, text)?;
            (count <= self.rooms_max).then_some(count)
        })
    }

    fn bed_constraints(&self, text: &str) -> Vec<String> {
        let mut notes: Vec<String> = BED_TYPES
            .iter()
            .filter(|bed| bed.sold_out.is_match(text))
            .map(|bed| format!("{} beds sold out", bed.display))
            .collect();

        notes.extend(BED_TYPES.iter().filter_map(|bed| {
            let count = capture_count(&bed.remaining, text)?;
            (count <= self.beds_max).then(|| format!("{count} {} beds left", bed.label))
        }));

        notes
    }
}

/// Classifies availability using the default limits.
#[must_use]
pub fn extract_availability(content: &str) -> Availability {
    AvailabilityClassifier::default().classify(content)
}

fn property_sold_out(text: &str) -> bool {
    let mut remaining = text.to_lowercase();
    for bed in BED_TYPES.iter() {
        remaining = bed.sold_out.replace_all(&remaining, " ").into_owned();
    }
    contains_any(&remaining, SOLD_OUT_PHRASES)
}

/// First capture of `pattern` parsed as a count. Counts that overflow `u32`
/// are treated as no match.
fn capture_count(pattern: &Regex, text: &str) -> Option<u32> {
    pattern.captures(text)?.get(1)?.as_str().parse().ok()
}

#[cfg(test)]
#[path = "availability_test.rs"]
mod tests;
