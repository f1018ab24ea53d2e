//! schema.org JSON-LD offer prices.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static SCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<script[^>]+type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid regex")
});

/// Keys under which an item lists its offers.
const OFFER_KEYS: &[&str] = &["offers", "makesOffer"];
/// Keys holding a price on an offer, in preference order.
const PRICE_KEYS: &[&str] = &["price", "lowPrice"];

/// Collect offer prices from every `<script type="application/ld+json">`
/// block in `html`, in document order.
///
/// Blocks that fail to parse are skipped; they never abort the scan.
pub(crate) fn extract_offer_prices(html: &str) -> Vec<f64> {
    let mut prices = Vec::new();

    for cap in SCRIPT_RE.captures_iter(html) {
        let Some(json_text) = cap.get(1).map(|m| m.as_str()) else {
            continue;
        };

        let value: Value = match serde_json::from_str(json_text.trim()) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(error = %e, "skipping malformed JSON-LD block");
                continue;
            }
        };

        // Accept top-level object, array, or @graph container.
        let mut candidates: Vec<&Value> = match &value {
            Value::Array(items) => items.iter().collect(),
            other => vec![other],
        };
        let graph_items: Vec<&Value> = candidates
            .iter()
            .filter_map(|item| item.get("@graph").and_then(Value::as_array))
            .flatten()
            .collect();
        candidates.extend(graph_items);

        for item in candidates {
            collect_item_prices(item, &mut prices);
        }
    }

    prices
}

/// Appends prices carried by `item` itself (when it is an offer) and by any
/// offers it lists.
fn collect_item_prices(item: &Value, out: &mut Vec<f64>) {
    if is_offer(item) {
        collect_offer_prices(item, out);
    }

    for key in OFFER_KEYS {
        match item.get(*key) {
            Some(Value::Array(offers)) => {
                for offer in offers {
                    collect_offer_prices(offer, out);
                }
            }
            Some(offer) if offer.is_object() => collect_offer_prices(offer, out),
            _ => {}
        }
    }
}

fn is_offer(item: &Value) -> bool {
    let offer_type =
        |s: &str| s.eq_ignore_ascii_case("Offer") || s.eq_ignore_ascii_case("AggregateOffer");
    match item.get("@type") {
        Some(Value::String(s)) => offer_type(s),
        Some(Value::Array(types)) => types.iter().filter_map(Value::as_str).any(offer_type),
        _ => false,
    }
}

fn collect_offer_prices(offer: &Value, out: &mut Vec<f64>) {
    for key in PRICE_KEYS {
        if let Some(price) = offer.get(*key).and_then(price_value) {
            out.push(price);
            return;
        }
    }

    // priceSpecification may be a single object or a list.
    let spec_price = match offer.get("priceSpecification") {
        Some(Value::Array(specs)) => specs
            .iter()
            .find_map(|s| s.get("price").and_then(price_value)),
        Some(spec) => spec.get("price").and_then(price_value),
        None => None,
    };
    if let Some(price) = spec_price {
        out.push(price);
    }
}

/// Prices appear as numbers or as strings such as `"189.00"` or `"$189"`.
fn price_value(v: &Value) -> Option<f64> {
    let price = v.as_f64().or_else(|| {
        v.as_str().and_then(|s| {
            let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
            cleaned.trim().parse::<f64>().ok()
        })
    })?;
    (price.is_finite() && price > 0.0).then_some(price)
}
