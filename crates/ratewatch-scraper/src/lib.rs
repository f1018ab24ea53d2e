//! Rate and availability extraction from raw booking-page content.
//!
//! The engine is pure: it never fetches, caches, or mutates shared state.
//! Callers hand it page content (rendered HTML, markdown, or plain text)
//! plus a hotel-name hint and get back a [`ratewatch_core::HotelSignal`].

pub mod availability;
pub mod error;
pub mod hotel_name;
pub mod rate;
pub mod signal;

mod html;
mod jsonld;
mod text;

pub use availability::{extract_availability, AvailabilityClassifier};
pub use error::ScraperError;
pub use hotel_name::{infer_hotel_name, name_from_url};
pub use rate::{extract_rate, RateExtractor, RateHit, RateStrategy};
pub use signal::{extract_signal, ExtractionInput, SignalExtractor, SignalReport};
