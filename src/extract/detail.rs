use scraper::Html;

use super::{selector, text_of};
use crate::model::MediaInfo;

// The category page renders its `p.type` label paragraphs in a fixed
// order; the decoder validates the sequence length once, then indexes
// positionally.
const LABEL_TYPE: usize = 0;
const LABEL_PLOT: usize = 1;
const LABEL_GENRES: usize = 2;
const LABEL_RELEASED: usize = 3;
const LABEL_STATUS: usize = 4;
const LABEL_OTHER_NAMES: usize = 5;
const LABEL_COUNT: usize = 6;

/// A category page whose markup does not match the expected shape, most
/// commonly because the id is not a real catalog slug.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailError;

/// Decodes a title's category page into its metadata record.
pub fn extract_detail(page: &Html) -> Result<MediaInfo, DetailError> {
    let info_block = selector::from("div.anime_info_body_bg");
    let img = selector::from("img");
    let h1 = selector::from("h1");
    let label = selector::from("p.type");
    let anchor = selector::from("a");

    let info = page.select(&info_block).next().ok_or(DetailError)?;

    let image_url = info
        .select(&img)
        .next()
        .and_then(|i| i.value().attr("src"))
        .ok_or(DetailError)?
        .to_string();

    let title = info
        .select(&h1)
        .next()
        .map(|h| text_of(&h))
        .ok_or(DetailError)?;

    let labels = page.select(&label).collect::<Vec<_>>();
    if labels.len() < LABEL_COUNT {
        return Err(DetailError);
    }

    let category = labels[LABEL_TYPE]
        .select(&anchor)
        .next()
        .and_then(|a| a.value().attr("title"))
        .ok_or(DetailError)?
        .to_string();

    let summary = plot_summary(&text_of(&labels[LABEL_PLOT]));

    let genres = labels[LABEL_GENRES]
        .select(&anchor)
        .filter_map(|a| a.value().attr("title"))
        .map(str::to_string)
        .collect();

    let year = text_of(&labels[LABEL_RELEASED])
        .split_whitespace()
        .nth(1)
        .and_then(|y| y.parse().ok())
        .ok_or(DetailError)?;

    let status = labels[LABEL_STATUS]
        .select(&anchor)
        .next()
        .map(|a| text_of(&a))
        .ok_or(DetailError)?;

    let other_names = other_names(&text_of(&labels[LABEL_OTHER_NAMES]));

    let episodes = episode_count(page).ok_or(DetailError)?;

    Ok(MediaInfo {
        title,
        year,
        other_names,
        category,
        status,
        genres,
        episodes,
        image_url,
        summary,
    })
}

/// Drops the "Plot Summary:" prefix and rejoins the remaining
/// colon-delimited segments without a separator.
fn plot_summary(text: &str) -> String {
    let mut segments = text.split(':');
    segments.next();

    segments.collect::<String>().trim().to_string()
}

/// Drops the "Other name:" prefix, keeping the names themselves.
fn other_names(text: &str) -> String {
    let mut segments = text.split(':');
    segments.next();

    segments.collect::<String>().trim().to_string()
}

/// The `#episode_page` navigation lists episode ranges; the upper bound of
/// the last range is the total episode count.
fn episode_count(page: &Html) -> Option<u32> {
    let nav = selector::from("#episode_page");
    let anchor = selector::from("a");

    let last = page.select(&nav).next()?.select(&anchor).last()?;

    if let Some(end) = last.value().attr("ep_end")
        && let Ok(end) = end.parse()
    {
        return Some(end);
    }

    text_of(&last).rsplit('-').next()?.trim().parse().ok()
}
