//! Shared text-matching primitives for the rate and availability modules.
//!
//! Dollar amounts are recognised as `$` followed by exactly two or three
//! digits. Longer digit runs (`$1899`) and thousands separators (`$1,299`)
//! are rejected rather than truncated.

use once_cell::sync::Lazy;
use regex::Regex;

static DOLLAR_AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$(\d+)").expect("valid regex"));

/// Parses a captured digit run as a whole-dollar amount.
///
/// Returns `None` unless `digits` is two or three ASCII digits.
pub(crate) fn parse_amount(digits: &str) -> Option<u32> {
    if !(2..=3).contains(&digits.len()) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok()
}

/// Yields every `$NN` / `$NNN` amount in `text`, left to right.
pub(crate) fn dollar_amounts(text: &str) -> impl Iterator<Item = u32> + '_ {
    DOLLAR_AMOUNT
        .captures_iter(text)
        .filter_map(|cap| parse_amount(cap.get(1)?.as_str()))
}

/// First whitespace-delimited token of a hotel name, e.g. `"Hampton"` from
/// `"Hampton Inn Shelton CT"`.
pub(crate) fn first_token(name: &str) -> Option<&str> {
    name.split_whitespace().next()
}

/// Returns `true` if `haystack` contains any of `needles`.
///
/// Callers lowercase `haystack` first; needles are stored lowercase.
pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Inclusive line-index window of `radius` lines around `center`, clamped
/// to `[0, len)`. `len` must be non-zero.
pub(crate) fn line_window(center: usize, radius: usize, len: usize) -> std::ops::RangeInclusive<usize> {
    let start = center.saturating_sub(radius);
    let end = center.saturating_add(radius).min(len.saturating_sub(1));
    start..=end
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_two_and_three_digits() {
        assert_eq!(parse_amount("89"), Some(89));
        assert_eq!(parse_amount("189"), Some(189));
    }

    #[test]
    fn parse_amount_rejects_other_lengths() {
        assert_eq!(parse_amount("9"), None);
        assert_eq!(parse_amount("1899"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn parse_amount_rejects_non_digits() {
        assert_eq!(parse_amount("1a9"), None);
        assert_eq!(parse_amount("١٢٣"), None);
    }

    #[test]
    fn dollar_amounts_in_order() {
        let found: Vec<u32> = dollar_amounts("was $219, now $189 (save $30)").collect();
        assert_eq!(found, vec![219, 189, 30]);
    }

    #[test]
    fn dollar_amounts_skips_long_and_grouped_numbers() {
        let found: Vec<u32> = dollar_amounts("$1899 total, $1,299 package, $5 fee, $149.99").collect();
        assert_eq!(found, vec![149]);
    }

    #[test]
    fn dollar_amounts_empty_without_currency() {
        assert_eq!(dollar_amounts("189 per night").count(), 0);
    }

    #[test]
    fn first_token_splits_on_whitespace() {
        assert_eq!(first_token("Hampton Inn Shelton CT"), Some("Hampton"));
        assert_eq!(first_token("  Hyatt\tHouse"), Some("Hyatt"));
        assert_eq!(first_token("   "), None);
    }

    #[test]
    fn contains_any_matches_substrings() {
        assert!(contains_any("hotel is sold out tonight", &["no availability", "sold out"]));
        assert!(!contains_any("rooms available", &["sold out"]));
    }

    #[test]
    fn line_window_clamps_at_edges() {
        assert_eq!(line_window(0, 3, 10), 0..=3);
        assert_eq!(line_window(5, 3, 10), 2..=8);
        assert_eq!(line_window(9, 3, 10), 6..=9);
        assert_eq!(line_window(0, 3, 1), 0..=0);
    }
}
