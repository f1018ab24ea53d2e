use super::*;

fn hit(content: &str, hotel: &str) -> Option<RateHit> {
    RateExtractor::default().extract(content, hotel).unwrap()
}

#[test]
fn no_currency_yields_none() {
    assert_eq!(extract_rate("Great location, free breakfast", "Hampton Inn").unwrap(), None);
    assert_eq!(extract_rate("", "Hampton Inn").unwrap(), None);
}

#[test]
fn per_night_amount_is_found() {
    let found = hit("$189 per night", "Hampton Inn").unwrap();
    assert_eq!(found.amount_usd, 189);
    assert_eq!(found.strategy, RateStrategy::KeywordAdjacent);
}

#[test]
fn amount_below_every_range_yields_none() {
    assert_eq!(extract_rate("Parking $45", "Hampton Inn").unwrap(), None);
    assert_eq!(extract_rate("$49 per night", "Hampton Inn").unwrap(), None);
}

#[test]
fn four_digit_amount_is_not_truncated() {
    assert_eq!(extract_rate("$1899 per night", "Hampton Inn").unwrap(), None);
}

#[test]
fn name_proximity_takes_amount_near_the_hotel_name() {
    let text = "Hampton Inn Shelton\n4.5 out of 5\n$189\n\nother listing\nfoo\nbar\n$139 avg per night";
    let found = hit(text, "Hampton Inn").unwrap();
    assert_eq!(found.amount_usd, 189);
    assert_eq!(found.strategy, RateStrategy::NameProximity);
}

#[test]
fn name_proximity_is_case_insensitive() {
    let found = hit("HAMPTON INN\n$172", "hampton inn").unwrap();
    assert_eq!(found.amount_usd, 172);
    assert_eq!(found.strategy, RateStrategy::NameProximity);
}

#[test]
fn name_proximity_skips_out_of_range_amounts() {
    let found = hit("Hampton Inn $20 fee $175\n$45 parking", "Hampton Inn").unwrap();
    assert_eq!(found.amount_usd, 175);
    assert_eq!(found.strategy, RateStrategy::NameProximity);

    let found = hit("Hampton Inn\n$45 parking\n$140 tonight", "Hampton Inn").unwrap();
    assert_eq!(found.amount_usd, 140);
}

#[test]
fn name_window_is_three_lines() {
    let found = hit("Hampton Inn\na\nb\nc\nd\n$189", "Hampton Inn").unwrap();
    assert_eq!(found.amount_usd, 189);
    assert_eq!(found.strategy, RateStrategy::AnyPrice);
}

#[test]
fn name_with_regex_metacharacters_is_escaped() {
    let found = hit("(Main) Inn downtown\n$130", "(Main) Inn").unwrap();
    assert_eq!(found.amount_usd, 130);
    assert_eq!(found.strategy, RateStrategy::NameProximity);
}

#[test]
fn blank_hotel_name_skips_name_proximity() {
    let found = hit("Nice stay\n$130", "   ").unwrap();
    assert_eq!(found.amount_usd, 130);
    assert_eq!(found.strategy, RateStrategy::AnyPrice);
}

#[test]
fn keyword_table_order_beats_text_position() {
    let found = hit("Total $420\n$189 per night", "Courtyard").unwrap();
    assert_eq!(found.amount_usd, 189);
    assert_eq!(found.strategy, RateStrategy::KeywordAdjacent);
}

#[test]
fn keyword_before_amount_is_matched() {
    assert_eq!(hit("Per night: $205", "Courtyard").unwrap().amount_usd, 205);
    assert_eq!(hit("avg nightly $155", "Courtyard").unwrap().amount_usd, 155);
    assert_eq!(hit("Total for 1 night $310", "Courtyard").unwrap().amount_usd, 310);
}

#[test]
fn keyword_match_does_not_cross_lines_or_other_amounts() {
    let found = hit("Resort fee $95\nRooms from $210 per night", "Courtyard").unwrap();
    assert_eq!(found.amount_usd, 210);
    assert_eq!(found.strategy, RateStrategy::KeywordAdjacent);
}

#[test]
fn keyword_uses_anchored_range() {
    assert_eq!(hit("$650 per night", "Courtyard").unwrap().amount_usd, 650);
    assert_eq!(hit("$55 per night", "Courtyard").unwrap().amount_usd, 55);
}

#[test]
fn any_price_uses_unanchored_range() {
    assert_eq!(extract_rate("Suites $650", "Courtyard").unwrap(), None);

    let found = hit("$60 parking, $75 breakfast, $120", "Courtyard").unwrap();
    assert_eq!(found.amount_usd, 120);
    assert_eq!(found.strategy, RateStrategy::AnyPrice);
}

#[test]
fn jsonld_offer_wins_over_text() {
    let html = r#"<!DOCTYPE html><html><head>
        <script type="application/ld+json">{"@type": "Hotel", "name": "Hampton Inn", "offers": {"price": "199.00"}}</script>
        </head><body><h1>Hampton Inn</h1><p>$150 per night</p></body></html>"#;
    let found = hit(html, "Hampton Inn").unwrap();
    assert_eq!(found.amount_usd, 199);
    assert_eq!(found.strategy, RateStrategy::JsonLdOffer);
}

#[test]
fn jsonld_price_is_rounded() {
    let html = r#"<html><head><script type="application/ld+json">{"@type": "Offer", "price": 148.6}</script></head><body></body></html>"#;
    assert_eq!(extract_rate(html, "Hampton Inn").unwrap(), Some(149));
}

#[test]
fn out_of_range_jsonld_falls_through_to_selectors() {
    let html = r#"<html><head>
        <script type="application/ld+json">{"@type": "Hotel", "offers": {"price": 1200}}</script>
        </head><body><span class="price-current">$185</span><p>$150 per night</p></body></html>"#;
    let found = hit(html, "Hampton Inn").unwrap();
    assert_eq!(found.amount_usd, 185);
    assert_eq!(found.strategy, RateStrategy::PriceSelector);
}

#[test]
fn price_selector_reads_headline_price() {
    let html = r#"<html><body>
        <p>Resort fee $95</p>
        <div data-stid="price-display-field"><span>$</span><span>175</span></div>
        <div class="rate-price">$175 nightly</div>
        </body></html>"#;
    let found = hit(html, "Courtyard").unwrap();
    assert_eq!(found.amount_usd, 175);
    assert_eq!(found.strategy, RateStrategy::PriceSelector);
}

#[test]
fn script_text_is_not_scanned() {
    let html = r#"<html><body>
        <script>window.price = "$999 per night";</script>
        <p>Rooms from $140 per night</p>
        </body></html>"#;
    let found = hit(html, "Courtyard").unwrap();
    assert_eq!(found.amount_usd, 140);
    assert_eq!(found.strategy, RateStrategy::KeywordAdjacent);
}

#[test]
fn inline_price_markup_keeps_keyword_adjacent() {
    let html = "<html><body>\n<p>Breakfast $95 daily</p>\n<div><span>$189</span> per night</div>\n</body></html>";
    let found = hit(html, "Courtyard").unwrap();
    assert_eq!(found.amount_usd, 189);
    assert_eq!(found.strategy, RateStrategy::KeywordAdjacent);
}

#[test]
fn custom_thresholds_change_validity() {
    let thresholds = ExtractionThresholds {
        anchored_rate_range: 100..=200,
        ..ExtractionThresholds::default()
    };
    let extractor = RateExtractor::new(&thresholds).unwrap();
    let found = extractor.extract("$250 per night", "Courtyard").unwrap().unwrap();
    assert_eq!(found.amount_usd, 250);
    assert_eq!(found.strategy, RateStrategy::AnyPrice);
}

#[test]
fn empty_range_is_rejected() {
    let thresholds = ExtractionThresholds {
        anchored_rate_range: 800..=50,
        ..ExtractionThresholds::default()
    };
    let err = RateExtractor::new(&thresholds).unwrap_err();
    assert!(matches!(
        err,
        ScraperError::InvalidThresholds {
            field: "anchored_rate_range"
        }
    ));
}

#[test]
fn extraction_is_idempotent() {
    let text = "Hampton Inn\n$189\nTotal $420";
    let first = hit(text, "Hampton Inn");
    let second = hit(text, "Hampton Inn");
    assert_eq!(first, second);
}

#[test]
fn strategy_order_and_labels() {
    let labels: Vec<&str> = RateStrategy::ORDER.iter().map(|s| s.label()).collect();
    assert_eq!(
        labels,
        vec![
            "jsonld_offer",
            "price_selector",
            "name_proximity",
            "keyword_adjacent",
            "any_price"
        ]
    );
    assert_eq!(RateStrategy::AnyPrice.to_string(), "any_price");
}

#[test]
fn whole_dollars_rejects_out_of_bounds() {
    assert_eq!(whole_dollars(189.4), Some(189));
    assert_eq!(whole_dollars(-1.0), None);
    assert_eq!(whole_dollars(1e12), None);
}
