//! End-to-end extraction tests over the public API.
//!
//! Covers the behaviour callers rely on: plain-text, markdown, and HTML
//! inputs, the precedence between rate strategies, and the availability
//! rule ladder.

use ratewatch_core::{AvailabilityStatus, ExtractionThresholds, HotelSignal};
use ratewatch_scraper::{
    extract_availability, extract_rate, extract_signal, infer_hotel_name, ExtractionInput,
    RateStrategy, SignalExtractor,
};

const HOTEL_PAGE: &str = include_str!("fixtures/hotel_information.html");

const MARKDOWN_LISTING: &str = "\
# Shelton, CT hotels

## Courtyard by Marriott Shelton
* 8.4/10 Very Good
* $164 per night
* $358 total
* Free parking
* Fitness center
* Free WiFi

## Hyatt House Shelton
* 8.7/10 Excellent
* Only 2 rooms left
* $211 per night
";

fn signal(content: &str, hotel: &str) -> HotelSignal {
    extract_signal(
        &ExtractionInput::new(content, hotel),
        &ExtractionThresholds::default(),
    )
    .unwrap()
}

#[test]
fn text_without_prices_has_no_rate() {
    assert_eq!(extract_rate("Call the front desk for rates.", "Hampton Inn").unwrap(), None);
}

#[test]
fn per_night_price_is_extracted() {
    assert_eq!(extract_rate("$189 per night", "Hampton Inn").unwrap(), Some(189));
}

#[test]
fn implausibly_low_price_is_rejected() {
    assert_eq!(extract_rate("$45", "Hampton Inn").unwrap(), None);
}

#[test]
fn sold_out_has_no_notes() {
    let a = extract_availability("Only 1 room left. 1 king bed left. Sold Out");
    assert_eq!(a.status, AvailabilityStatus::SoldOut);
    assert!(a.notes.is_empty());
}

#[test]
fn rooms_left_is_low_stock() {
    let a = extract_availability("Only 3 rooms left");
    assert_eq!(a.status, AvailabilityStatus::LowStock);
    assert_eq!(a.notes, vec!["Only 3 rooms left"]);
}

#[test]
fn bed_constraints_are_ordered() {
    let a = extract_availability("2 king beds left\nqueen beds sold out");
    assert_eq!(a.status, AvailabilityStatus::LowStock);
    assert_eq!(a.notes, vec!["Queen beds sold out", "2 king beds left"]);
}

#[test]
fn no_signals_is_available() {
    let a = extract_availability("Outdoor pool. Pet friendly.");
    assert_eq!(a.status, AvailabilityStatus::Available);
    assert!(a.notes.is_empty());
}

#[test]
fn html_page_uses_price_selector_and_ignores_scripts() {
    let report = SignalExtractor::default()
        .extract_detailed(&ExtractionInput::new(HOTEL_PAGE, "Hampton Inn"))
        .unwrap();

    let rate = report.rate.unwrap();
    assert_eq!(rate.amount_usd, 189);
    assert_eq!(rate.strategy, RateStrategy::PriceSelector);
    assert_eq!(report.availability.status, AvailabilityStatus::LowStock);
    assert_eq!(report.availability.notes, vec!["Queen beds sold out"]);
}

#[test]
fn html_page_name_is_inferred_when_blank() {
    assert_eq!(
        infer_hotel_name(HOTEL_PAGE, None).as_deref(),
        Some("Hampton Inn By Hilton Shelton")
    );
    let s = signal(HOTEL_PAGE, "");
    assert_eq!(s.rate, Some(189));
}

#[test]
fn markdown_listing_binds_price_to_the_named_hotel() {
    let hyatt = signal(MARKDOWN_LISTING, "Hyatt House Shelton");
    assert_eq!(hyatt.rate, Some(211));
    assert_eq!(hyatt.availability, AvailabilityStatus::LowStock);

    let courtyard = signal(MARKDOWN_LISTING, "Courtyard by Marriott");
    assert_eq!(courtyard.rate, Some(164));
}

#[test]
fn serialized_output_shape() {
    let s = signal("2 king beds left\nqueen beds sold out\n$189 per night", "Hampton Inn");
    let json = serde_json::to_value(s.to_output()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "rate": 189,
            "availability": "LowStock",
            "notes": "Queen beds sold out, 2 king beds left"
        })
    );
}

#[test]
fn identical_input_gives_identical_output() {
    let first = signal(HOTEL_PAGE, "Hampton Inn");
    let second = signal(HOTEL_PAGE, "Hampton Inn");
    assert_eq!(first, second);
}

#[test]
fn extractor_is_shareable_across_threads() {
    let extractor = std::sync::Arc::new(SignalExtractor::default());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let extractor = std::sync::Arc::clone(&extractor);
            std::thread::spawn(move || {
                extractor
                    .extract(&ExtractionInput::new("$189 per night", "Hampton Inn"))
                    .unwrap()
                    .rate
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Some(189));
    }
}
