use scraper::Html;

use super::selector;
use crate::model::SearchResult;

/// Container wrapping search and genre results.
pub const ITEMS: &str = "ul.items";
/// Container wrapping the airing-now panel on the front page.
pub const AIRING: &str = "nav.menu_series.cron ul";

/// Position of the catalog slug inside a listing link's path, e.g.
/// `clannad-dub` in `/category/clannad-dub`.
const SLUG_SEGMENT: usize = 2;

/// How a listing page failed to yield results. "Container missing" and
/// "container empty" are distinct outcomes; call sites map them to
/// different domain errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingError {
    MissingContainer,
    Empty,
}

/// Extracts the result entries of a listing page, in document order.
///
/// `container` selects the element wrapping the entries ([`ITEMS`] or
/// [`AIRING`]); each `li` contributes its anchor's `title` attribute and
/// the slug segment of its `href`.
pub fn extract_listing(page: &Html, container: &str) -> Result<Vec<SearchResult>, ListingError> {
    let list = selector::from(container);
    let item = selector::from("li");
    let anchor = selector::from("a");

    let list = page
        .select(&list)
        .next()
        .ok_or(ListingError::MissingContainer)?;

    let results = list
        .select(&item)
        .filter_map(|li| {
            let a = li.select(&anchor).next()?;
            let title = a.value().attr("title")?;
            let id = a.value().attr("href")?.split('/').nth(SLUG_SEGMENT)?;

            Some(SearchResult {
                title: title.to_string(),
                id: id.to_string(),
            })
        })
        .collect::<Vec<_>>();

    if results.is_empty() {
        return Err(ListingError::Empty);
    }

    Ok(results)
}
