//! Combined rate and availability extraction for one hotel page.

use ratewatch_core::{Availability, ExtractionThresholds, HotelSignal};
use serde::Serialize;

use crate::availability::AvailabilityClassifier;
use crate::error::ScraperError;
use crate::hotel_name::infer_from_page;
use crate::html::PageContent;
use crate::rate::{RateExtractor, RateHit};

/// Page content plus the caller's hints about which hotel it describes.
#[derive(Debug, Clone, Copy)]
pub struct ExtractionInput<'a> {
    pub content: &'a str,
    /// Display name used to anchor the name-proximity search. May be blank,
    /// in which case a name is inferred from the page or `source_url`.
    pub hotel_name: &'a str,
    pub source_url: Option<&'a str>,
}

impl<'a> ExtractionInput<'a> {
    #[must_use]
    pub fn new(content: &'a str, hotel_name: &'a str) -> Self {
        Self {
            content,
            hotel_name,
            source_url: None,
        }
    }

    #[must_use]
    pub fn with_source_url(mut self, source_url: &'a str) -> Self {
        self.source_url = Some(source_url);
        self
    }
}

/// Extraction result with the detail a [`HotelSignal`] flattens away.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignalReport {
    /// Name used for the proximity search, after inference.
    pub hotel_name: Option<String>,
    pub rate: Option<RateHit>,
    pub availability: Availability,
}

impl SignalReport {
    #[must_use]
    pub fn into_signal(self) -> HotelSignal {
        HotelSignal::new(self.rate.map(|hit| hit.amount_usd), self.availability)
    }
}

/// Runs the rate extractor and availability classifier over shared,
/// once-parsed page content.
#[derive(Debug, Clone, Default)]
pub struct SignalExtractor {
    rates: RateExtractor,
    availability: AvailabilityClassifier,
}

impl SignalExtractor {
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidThresholds`] if a rate range is empty.
    pub fn new(thresholds: &ExtractionThresholds) -> Result<Self, ScraperError> {
        Ok(Self {
            rates: RateExtractor::new(thresholds)?,
            availability: AvailabilityClassifier::new(thresholds),
        })
    }

    /// Extracts the rate and availability signal for one hotel page.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Pattern`] if the hotel-name pattern cannot be
    /// built. Finding nothing is not an error.
    pub fn extract(&self, input: &ExtractionInput<'_>) -> Result<HotelSignal, ScraperError> {
        self.extract_detailed(input).map(SignalReport::into_signal)
    }

    /// Like [`SignalExtractor::extract`], but keeps the winning strategy and
    /// the inferred hotel name.
    ///
    /// # Errors
    ///
    /// See [`SignalExtractor::extract`].
    pub fn extract_detailed(&self, input: &ExtractionInput<'_>) -> Result<SignalReport, ScraperError> {
        let page = PageContent::new(input.content);

        let hotel_name = if input.hotel_name.trim().is_empty() {
            infer_from_page(&page, input.source_url)
        } else {
            Some(input.hotel_name.trim().to_string())
        };

        let rate = self
            .rates
            .extract_page(&page, hotel_name.as_deref().unwrap_or_default())?;
        let availability = self.availability.classify_page(&page);

        Ok(SignalReport {
            hotel_name,
            rate,
            availability,
        })
    }
}

/// Extracts a [`HotelSignal`] from `input` under `thresholds`.
///
/// # Errors
///
/// Returns [`ScraperError`] for invalid thresholds or an unbuildable name
/// pattern.
pub fn extract_signal(
    input: &ExtractionInput<'_>,
    thresholds: &ExtractionThresholds,
) -> Result<HotelSignal, ScraperError> {
    SignalExtractor::new(thresholds)?.extract(input)
}
