//! Nightly rate extraction.
//!
//! Strategies run in the fixed order of [`RateStrategy::ORDER`]; the first
//! strategy that yields an amount inside its validity range wins. There is no
//! scoring across strategies, and no strategy ever invents a default rate.
//!
//! | strategy          | input          | validity range |
//! |-------------------|----------------|----------------|
//! | `JsonLdOffer`     | raw HTML       | anchored       |
//! | `PriceSelector`   | parsed HTML    | anchored       |
//! | `NameProximity`   | visible text   | anchored       |
//! | `KeywordAdjacent` | visible text   | anchored       |
//! | `AnyPrice`        | visible text   | unanchored     |

use std::ops::RangeInclusive;

use once_cell::sync::Lazy;
use ratewatch_core::ExtractionThresholds;
use regex::{Regex, RegexBuilder};
use scraper::Selector;
use serde::Serialize;

use crate::error::ScraperError;
use crate::html::{compile_selectors, element_text, PageContent};
use crate::jsonld::extract_offer_prices;
use crate::text::{dollar_amounts, first_token, line_window, parse_amount};

/// Headline-price elements on common booking pages, most specific first.
static PRICE_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    compile_selectors(&[
        r#"[data-testid="price-summary-message-line"]"#,
        r#"[data-stid="price-display-field"]"#,
        ".price-current",
        ".rate-price",
        ".uitk-type-600",
        ".uitk-type-500",
        ".uitk-text-emphasis-theme",
    ])
});

/// Rate keywords paired with an amount, keyword-first then amount-first for
/// each keyword. Neither side may cross another `$` or a line break, so the
/// captured amount is the one adjacent to the keyword.
static KEYWORD_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)per\s+night[^$\n]*?\$(\d+)",
        r"(?i)\$(\d+)[^$\n]*?per\s+night",
        r"(?i)\btotal\b[^$\n]*?\$(\d+)",
        r"(?i)\$(\d+)[^$\n]*?\btotal\b",
        r"(?i)\b(?:avg|average)\b[^$\n]*?\$(\d+)",
        r"(?i)\$(\d+)[^$\n]*?\b(?:avg|average)\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid regex"))
    .collect()
});

/// One step of the rate-extraction cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RateStrategy {
    /// `offers.price` in embedded schema.org JSON-LD.
    JsonLdOffer,
    /// Headline-price CSS selectors.
    PriceSelector,
    /// `$`-amount within a few lines of the hotel's name.
    NameProximity,
    /// `$`-amount adjacent to "per night", "total", or "avg".
    KeywordAdjacent,
    /// First plausible `$`-amount anywhere.
    AnyPrice,
}

impl RateStrategy {
    /// Evaluation order of the cascade.
    pub const ORDER: [RateStrategy; 5] = [
        RateStrategy::JsonLdOffer,
        RateStrategy::PriceSelector,
        RateStrategy::NameProximity,
        RateStrategy::KeywordAdjacent,
        RateStrategy::AnyPrice,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RateStrategy::JsonLdOffer => "jsonld_offer",
            RateStrategy::PriceSelector => "price_selector",
            RateStrategy::NameProximity => "name_proximity",
            RateStrategy::KeywordAdjacent => "keyword_adjacent",
            RateStrategy::AnyPrice => "any_price",
        }
    }
}

impl std::fmt::Display for RateStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A validated nightly rate and the strategy that found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RateHit {
    pub amount_usd: u32,
    pub strategy: RateStrategy,
}

/// Stateless rate extractor parameterised by validity ranges.
#[derive(Debug, Clone)]
pub struct RateExtractor {
    anchored: RangeInclusive<u32>,
    unanchored: RangeInclusive<u32>,
    name_window_lines: usize,
}

impl Default for RateExtractor {
    fn default() -> Self {
        let t = ExtractionThresholds::default();
        Self {
            anchored: t.anchored_rate_range,
            unanchored: t.unanchored_rate_range,
            name_window_lines: t.name_window_lines,
        }
    }
}

impl RateExtractor {
    /// Builds an extractor from configured thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidThresholds`] if either rate range is empty.
    pub fn new(thresholds: &ExtractionThresholds) -> Result<Self, ScraperError> {
        if let Some(field) = thresholds.empty_range() {
            return Err(ScraperError::InvalidThresholds { field });
        }
        Ok(Self {
            anchored: thresholds.anchored_rate_range.clone(),
            unanchored: thresholds.unanchored_rate_range.clone(),
            name_window_lines: thresholds.name_window_lines,
        })
    }

    /// Finds the most plausible nightly rate in `content`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Pattern`] if the name-proximity pattern built
    /// from `hotel_name` cannot be compiled.
    pub fn extract(&self, content: &str, hotel_name: &str) -> Result<Option<RateHit>, ScraperError> {
        self.extract_page(&PageContent::new(content), hotel_name)
    }

    pub(crate) fn extract_page(
        &self,
        page: &PageContent<'_>,
        hotel_name: &str,
    ) -> Result<Option<RateHit>, ScraperError> {
        for strategy in RateStrategy::ORDER {
            if let Some(amount_usd) = self.run(strategy, page, hotel_name)? {
                tracing::debug!(hotel_name, strategy = %strategy, amount_usd, "rate found");
                return Ok(Some(RateHit {
                    amount_usd,
                    strategy,
                }));
            }
        }

        tracing::debug!(hotel_name, "no rate found");
        Ok(None)
    }

    fn run(
        &self,
        strategy: RateStrategy,
        page: &PageContent<'_>,
        hotel_name: &str,
    ) -> Result<Option<u32>, ScraperError> {
        let found = match strategy {
            RateStrategy::JsonLdOffer => page
                .document()
                .and_then(|_| jsonld_offer(page.raw(), &self.anchored)),
            RateStrategy::PriceSelector => page
                .document()
                .and_then(|doc| price_selector(doc, &self.anchored)),
            RateStrategy::NameProximity => {
                name_proximity(page.text(), hotel_name, self.name_window_lines, &self.anchored)?
            }
            RateStrategy::KeywordAdjacent => keyword_adjacent(page.text(), &self.anchored),
            RateStrategy::AnyPrice => any_price(page.text(), &self.unanchored),
        };
        Ok(found)
    }
}

/// Finds a nightly rate using the default thresholds.
///
/// # Errors
///
/// See [`RateExtractor::extract`].
pub fn extract_rate(content: &str, hotel_name: &str) -> Result<Option<u32>, ScraperError> {
    Ok(RateExtractor::default()
        .extract(content, hotel_name)?
        .map(|hit| hit.amount_usd))
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

fn jsonld_offer(html: &str, range: &RangeInclusive<u32>) -> Option<u32> {
    extract_offer_prices(html)
        .into_iter()
        .filter_map(whole_dollars)
        .find(|amount| range.contains(amount))
}

fn price_selector(document: &scraper::Html, range: &RangeInclusive<u32>) -> Option<u32> {
    PRICE_SELECTORS.iter().find_map(|selector| {
        document
            .select(selector)
            .find_map(|el| dollar_amounts(&element_text(el)).find(|a| range.contains(a)))
    })
}

/// Scans ±`window` lines around every line mentioning the first token of
/// `hotel_name`. Prices printed next to the hotel's own heading are the
/// likeliest to be its rate rather than a neighbour's.
fn name_proximity(
    text: &str,
    hotel_name: &str,
    window: usize,
    range: &RangeInclusive<u32>,
) -> Result<Option<u32>, ScraperError> {
    let Some(token) = first_token(hotel_name) else {
        return Ok(None);
    };
    let pattern = RegexBuilder::new(&regex::escape(token))
        .case_insensitive(true)
        .build()
        .map_err(|source| ScraperError::Pattern {
            token: token.to_string(),
            source,
        })?;

    let lines: Vec<&str> = text.lines().collect();
    for (i, line) in lines.iter().enumerate() {
        if !pattern.is_match(line) {
            continue;
        }
        for j in line_window(i, window, lines.len()) {
            if let Some(amount) = dollar_amounts(lines[j]).find(|a| range.contains(a)) {
                return Ok(Some(amount));
            }
        }
    }
    Ok(None)
}

fn keyword_adjacent(text: &str, range: &RangeInclusive<u32>) -> Option<u32> {
    KEYWORD_PATTERNS.iter().find_map(|pattern| {
        let cap = pattern.captures(text)?;
        parse_amount(cap.get(1)?.as_str()).filter(|a| range.contains(a))
    })
}

fn any_price(text: &str, range: &RangeInclusive<u32>) -> Option<u32> {
    dollar_amounts(text).find(|a| range.contains(a))
}

/// Rounds a structured-data price to whole dollars.
fn whole_dollars(price: f64) -> Option<u32> {
    let rounded = price.round();
    if !(0.0..=f64::from(u32::MAX)).contains(&rounded) {
        return None;
    }
    // Bounds checked above; the value is a non-negative integer below u32::MAX.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    Some(rounded as u32)
}

#[cfg(test)]
#[path = "rate_test.rs"]
mod tests;
