//! HTML detection and visible-text reduction.
//!
//! Content arrives from arbitrary transports: rendered HTML, markdown
//! extractions, or plain text. HTML is parsed once per extraction and reduced
//! to one line per block-level element so the line-oriented strategies behave
//! the same on every input shape. Inline markup (`<span>`, `<em>`, `<b>`)
//! never splits a line.

use std::borrow::Cow;

use scraper::{ElementRef, Html, Selector};

/// Elements whose text never reaches the rendered page.
const HIDDEN_ELEMENTS: &[&str] = &["script", "style", "noscript", "template", "head"];

/// Elements that start a new line of visible text. Everything else is inline.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "dd", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "header", "hr", "li", "main", "nav", "ol", "p", "pre", "section", "table", "tbody", "td",
    "tfoot", "th", "thead", "tr", "ul",
];

/// Bytes inspected when sniffing for markup.
const SNIFF_LEN: usize = 2048;

/// Page content prepared for extraction.
pub(crate) struct PageContent<'a> {
    raw: &'a str,
    document: Option<Html>,
    text: Cow<'a, str>,
}

impl<'a> PageContent<'a> {
    pub(crate) fn new(raw: &'a str) -> Self {
        if looks_like_html(raw) {
            let document = Html::parse_document(raw);
            let text = Cow::Owned(visible_text(&document));
            Self {
                raw,
                document: Some(document),
                text,
            }
        } else {
            Self {
                raw,
                document: None,
                text: Cow::Borrowed(raw),
            }
        }
    }

    /// The content exactly as supplied.
    pub(crate) fn raw(&self) -> &str {
        self.raw
    }

    /// Parsed document, present only for HTML input.
    pub(crate) fn document(&self) -> Option<&Html> {
        self.document.as_ref()
    }

    /// Human-visible text: the raw content for text input, or the reduced
    /// text for HTML input.
    pub(crate) fn text(&self) -> &str {
        &self.text
    }
}

/// Heuristic check for HTML markup near the start of `content`.
pub(crate) fn looks_like_html(content: &str) -> bool {
    let mut end = content.len().min(SNIFF_LEN);
    while !content.is_char_boundary(end) {
        end -= 1;
    }
    let head = content[..end].to_ascii_lowercase();
    let trimmed = head.trim_start();

    trimmed.starts_with("<!doctype html")
        || head.contains("<html")
        || head.contains("<body")
        || (trimmed.starts_with('<') && head.contains("</"))
}

/// Collects the document's visible text, one whitespace-collapsed line per
/// block-level element.
fn visible_text(document: &Html) -> String {
    let mut lines = Vec::new();
    let mut block = String::new();
    collect_blocks(document.root_element(), &mut block, &mut lines);
    flush_block(&mut block, &mut lines);
    lines.join("\n")
}

fn collect_blocks(element: ElementRef<'_>, block: &mut String, lines: &mut Vec<String>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            block.push_str(text);
            continue;
        }
        let Some(child) = ElementRef::wrap(child) else {
            continue;
        };
        let name = child.value().name();
        if HIDDEN_ELEMENTS.contains(&name) {
            continue;
        }
        if BLOCK_ELEMENTS.contains(&name) {
            flush_block(block, lines);
            collect_blocks(child, block, lines);
            flush_block(block, lines);
        } else {
            collect_blocks(child, block, lines);
        }
    }
}

fn flush_block(block: &mut String, lines: &mut Vec<String>) {
    let line = block.split_whitespace().collect::<Vec<_>>().join(" ");
    if !line.is_empty() {
        lines.push(line);
    }
    block.clear();
}

/// Text of an element with whitespace runs collapsed to single spaces.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses a list of literal selectors. Panics only on a malformed literal.
pub(crate) fn compile_selectors(selectors: &[&str]) -> Vec<Selector> {
    selectors
        .iter()
        .map(|s| Selector::parse(s).expect("valid selector"))
        .collect()
}
