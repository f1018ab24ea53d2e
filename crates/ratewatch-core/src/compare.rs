//! Subject-vs-competitor rate comparison and opportunity detection.

use serde::Serialize;

use crate::records::AvailabilityStatus;

/// Rate differences smaller than this are reported as [`RateComparison::Similar`].
pub const COMPARISON_DEAD_BAND_USD: u32 = 10;
/// A competitor must charge more than the subject rate plus this margin to
/// flag an opportunity.
pub const OPPORTUNITY_MARGIN_USD: u32 = 10;

/// Direction of a competitor's rate relative to the subject hotel's rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RateComparison {
    Higher,
    Lower,
    Similar,
}

impl RateComparison {
    /// Single-character marker used in tabular output.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            RateComparison::Higher => "+",
            RateComparison::Lower => "-",
            RateComparison::Similar => "=",
        }
    }
}

/// Compares a competitor rate against the subject rate.
///
/// Returns `None` when either rate is absent.
#[must_use]
pub fn compare_rates(
    subject: Option<u32>,
    competitor: Option<u32>,
    dead_band: u32,
) -> Option<RateComparison> {
    let (subject, competitor) = (subject?, competitor?);
    if subject.abs_diff(competitor) < dead_band {
        Some(RateComparison::Similar)
    } else if competitor > subject {
        Some(RateComparison::Higher)
    } else {
        Some(RateComparison::Lower)
    }
}

/// A competitor priced above the subject rate by more than `margin` while
/// constrained (low stock or sold out) signals room to raise the subject rate.
#[must_use]
pub fn has_opportunity(
    subject: Option<u32>,
    competitor: Option<u32>,
    competitor_status: AvailabilityStatus,
    margin: u32,
) -> bool {
    match (subject, competitor) {
        (Some(subject), Some(competitor)) => {
            competitor > subject.saturating_add(margin) && competitor_status.is_constrained()
        }
        _ => false,
    }
}
