//! Stay-date query URLs for hotel information pages.

use chrono::NaiveDate;
use url::Url;

/// Fixed search parameters: one room for two adults, priced in USD.
const SEARCH_PARAMS: &[(&str, &str)] = &[
    ("x_pwa", "1"),
    ("rfrr", "HSR"),
    ("useRewards", "false"),
    ("rm1", "a2"),
    ("destType", "MARKET"),
    ("sort", "RECOMMENDED"),
    ("top_cur", "USD"),
];

/// Builds the page URL for a one-night stay starting on `check_in`.
///
/// Parameters already present on `base_url` are kept unless this function
/// sets them, in which case the new value replaces the old one.
///
/// # Errors
///
/// Returns an error if `base_url` is not an absolute URL or `check_in` is
/// the last representable date.
pub(crate) fn build_query_url(base_url: &str, check_in: NaiveDate) -> anyhow::Result<Url> {
    let mut url = Url::parse(base_url)?;
    let check_out = check_in
        .succ_opt()
        .ok_or_else(|| anyhow::anyhow!("no check-out date after {check_in}"))?;

    let chkin = check_in.format("%Y-%m-%d").to_string();
    let chkout = check_out.format("%Y-%m-%d").to_string();
    let mut params: Vec<(&str, &str)> = vec![("chkin", chkin.as_str()), ("chkout", chkout.as_str())];
    params.extend_from_slice(SEARCH_PARAMS);

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| !params.iter().any(|(name, _)| *name == &**k))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut query = url.query_pairs_mut();
        query.clear();
        query.extend_pairs(kept.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        query.extend_pairs(params);
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sets_stay_dates_and_search_params() {
        let url = build_query_url(
            "https://www.expedia.com/Shelton-Hotels-Hyatt-House-Shelton.h2345678.Hotel-Information",
            date(2026, 10, 17),
        )
        .unwrap();

        assert_eq!(url.path(), "/Shelton-Hotels-Hyatt-House-Shelton.h2345678.Hotel-Information");
        assert_eq!(
            url.query(),
            Some(
                "chkin=2026-10-17&chkout=2026-10-18&x_pwa=1&rfrr=HSR&useRewards=false\
                 &rm1=a2&destType=MARKET&sort=RECOMMENDED&top_cur=USD"
            )
        );
    }

    #[test]
    fn check_out_rolls_over_month_and_year() {
        let url = build_query_url("https://example.com/h", date(2026, 12, 31)).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("chkin".to_string(), "2026-12-31".to_string())));
        assert!(pairs.contains(&("chkout".to_string(), "2027-01-01".to_string())));
    }

    #[test]
    fn existing_params_are_replaced_or_kept() {
        let url = build_query_url(
            "https://example.com/h?chkin=2020-01-01&top_cur=EUR&langid=1033",
            date(2026, 10, 17),
        )
        .unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(pairs[0], ("langid".to_string(), "1033".to_string()));
        assert_eq!(pairs.iter().filter(|(k, _)| k == "chkin").count(), 1);
        assert!(pairs.contains(&("top_cur".to_string(), "USD".to_string())));
    }

    #[test]
    fn relative_base_url_is_rejected() {
        assert!(build_query_url("/Hotel-Information", date(2026, 10, 17)).is_err());
    }
}
