//! Hotel-name inference for callers that have no name hint.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::Selector;
use url::Url;

use crate::html::{compile_selectors, element_text, PageContent};

/// Property-title elements, most specific first.
static NAME_SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    compile_selectors(&[
        r#"h1[data-stid="content-hotel-title"]"#,
        r#"[data-testid="hotel-name"]"#,
        ".property-name",
        ".uitk-heading-3",
        "h1",
    ])
});

/// Trailing property id and page kind on hotel-information slugs,
/// e.g. `.h200381.Hotel-Information`.
static SLUG_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.h\d+\.hotel-information$").expect("valid regex"));

/// Headings this short are labels ("Map", "Deal"), not property names.
const MIN_NAME_CHARS: usize = 4;

/// Infers a display name from page headings, falling back to the URL slug.
#[must_use]
pub fn infer_hotel_name(content: &str, source_url: Option<&str>) -> Option<String> {
    infer_from_page(&PageContent::new(content), source_url)
}

pub(crate) fn infer_from_page(page: &PageContent<'_>, source_url: Option<&str>) -> Option<String> {
    if let Some(name) = page.document().and_then(heading_name) {
        tracing::debug!(name = %name, "hotel name from heading");
        return Some(name);
    }

    let name = source_url.and_then(name_from_url)?;
    tracing::debug!(name = %name, "hotel name from url");
    Some(name)
}

fn heading_name(document: &scraper::Html) -> Option<String> {
    NAME_SELECTORS.iter().find_map(|selector| {
        document
            .select(selector)
            .map(element_text)
            .find(|text| text.chars().count() >= MIN_NAME_CHARS)
    })
}

/// Derives a hotel name from a booking-site URL path.
///
/// `https://www.expedia.com/Shelton-Hotels-Hampton-Inn-By-Hilton-Shelton.h200381.Hotel-Information`
/// yields `"Hampton Inn By Hilton Shelton"`. Returns `None` for unparseable
/// URLs or URLs without a usable path segment.
#[must_use]
pub fn name_from_url(source_url: &str) -> Option<String> {
    let url = Url::parse(source_url).ok()?;
    let segment = url
        .path_segments()?
        .filter(|s| !s.is_empty())
        .next_back()?;

    let slug = SLUG_SUFFIX_RE.replace(segment, "");
    let slug = slug
        .split_once("-Hotels-")
        .map_or(slug.as_ref(), |(_, rest)| rest);

    let name = slug
        .split(['-', '_'])
        .filter(|w| !w.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (name.chars().count() >= MIN_NAME_CHARS).then_some(name)
}
