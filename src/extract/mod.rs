//! Extraction rules over parsed documents. Everything here is pure and
//! synchronous; fetching belongs to [`crate::client`].

pub mod detail;
pub mod episode;
pub mod listing;

use scraper::ElementRef;

pub(crate) mod selector {
    use scraper::Selector;

    pub fn from(s: &str) -> Selector {
        match Selector::parse(s) {
            Ok(s) => s,
            Err(_) => panic!("unable to parse selector {s}"),
        }
    }
}

/// Text content of an element with whitespace collapsed.
pub(crate) fn text_of(element: &ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
