use std::sync::OnceLock;

use regex::Regex;
use scraper::Html;

use super::{selector, text_of};
use crate::model::{MediaLinks, Provider, Quality};

/// Head entries skipped from the provider panel before collecting raw HDP
/// candidates; the panel's first item is a UI label, not a provider.
const HDP_SKIP: usize = 1;
/// Head entries skipped before reading provider display names; the named
/// run starts one item further in.
const PROVIDER_SKIP: usize = 2;

/// Script block of the mirror player page holding the direct link.
const PLAYER_SCRIPT: usize = 2;

static ABSOLUTE_URL: OnceLock<Regex> = OnceLock::new();

fn absolute_url_pattern() -> &'static Regex {
    ABSOLUTE_URL.get_or_init(|| Regex::new(r"https?://\S+").unwrap())
}

/// How an episode page failed to yield links.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpisodeError {
    /// Download or mirror panel absent: unrecognized id or episode number.
    MissingPanel,
    /// A mirror entry without its `data-video` payload; the site renders
    /// entries this way when the auth cookies are rejected.
    MissingVideo,
}

/// Result of the episode-page scrape: the assembled slots plus the ordered
/// raw HDP candidates for the secondary resolution step.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EpisodeBundle {
    pub links: MediaLinks,
    pub hdp_candidates: Vec<String>,
}

/// Scrapes the two link panels of an episode page.
///
/// The download panel fills the direct quality slots; the mirror panel is
/// read twice, as two independently derived sequences: once for raw HDP
/// candidates ([`HDP_SKIP`]) and once for named provider slots
/// ([`PROVIDER_SKIP`]). The `hdp` slot itself stays vacant here; resolving
/// it needs a second fetch, see [`scrape_direct_link`].
pub fn extract_episode_links(page: &Html) -> Result<EpisodeBundle, EpisodeError> {
    let download = selector::from("div.cf-download");
    let mirrors = selector::from("div.anime_muti_link");
    let item = selector::from("li");
    let anchor = selector::from("a");

    let mut links = MediaLinks::default();

    let panel = page
        .select(&download)
        .next()
        .ok_or(EpisodeError::MissingPanel)?;

    for a in panel.select(&anchor) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };

        // resolution token after the literal `x`, e.g. "MP4 x720";
        // unrecognized tokens are ignored
        if let Some(quality) = text_of(&a).split('x').nth(1).and_then(Quality::from_token) {
            links.set_quality(quality, href.to_string());
        }
    }

    let panel = page
        .select(&mirrors)
        .next()
        .ok_or(EpisodeError::MissingPanel)?;
    let entries = panel.select(&item).collect::<Vec<_>>();

    let mut hdp_candidates = Vec::new();
    for li in entries.iter().skip(HDP_SKIP) {
        let video = li
            .select(&anchor)
            .next()
            .and_then(|a| a.value().attr("data-video"))
            .ok_or(EpisodeError::MissingVideo)?;

        hdp_candidates.push(absolute(video));
    }

    for li in entries.iter().skip(PROVIDER_SKIP) {
        let Some(video) = li
            .select(&anchor)
            .next()
            .and_then(|a| a.value().attr("data-video"))
        else {
            continue;
        };

        if let Some(provider) = Provider::from_label(&text_of(li)) {
            links.set_provider(provider, absolute(video));
        }
    }

    Ok(EpisodeBundle {
        links,
        hdp_candidates,
    })
}

/// Scrapes a mirror player page for the direct link embedded in its third
/// script block. The most brittle rule of the crate, so any deviation is
/// `None` and the caller leaves the `hdp` slot vacant.
pub fn scrape_direct_link(page: &Html) -> Option<String> {
    let script = selector::from("script");

    let body = page.select(&script).nth(PLAYER_SCRIPT)?.inner_html();
    let url = absolute_url_pattern().find(&body)?.as_str();

    // the match runs up to the closing quote of the script literal
    url.split('\'').next().map(str::to_string)
}

/// Protocol-relative `data-video` values get an explicit scheme; values
/// already carrying one pass through unchanged.
fn absolute(url: &str) -> String {
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https:{url}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPISODE_PAGE: &str = r#"
    <div class="cf-download">
        <a href="/dl/abc360">MP4 x360</a>
        <a href="/dl/abc720">MP4 x720</a>
        <a href="/dl/abc4k">MP4 x2160</a>
    </div>
    <div class="anime_muti_link">
        <ul>
            <li class="label">Choose server</li>
            <li class="anime">
                <a data-video="//hdp.example.com/embed/1">HdpChoose this server</a>
            </li>
            <li class="streamsb">
                <a data-video="https://sb.example.com/e/2">StreamsbChoose this server</a>
            </li>
            <li class="streamtape">
                <a data-video="//tape.example.com/e/3">StreamtapeChoose this server</a>
            </li>
            <li class="mixdrop">
                <a data-video="//mix.example.com/e/4">MixdropChoose this server</a>
            </li>
        </ul>
    </div>"#;

    #[test]
    fn test_quality_slots() {
        let page = Html::parse_document(EPISODE_PAGE);
        let bundle = extract_episode_links(&page).unwrap();

        assert_eq!(bundle.links.q360.as_deref(), Some("/dl/abc360"));
        assert_eq!(bundle.links.q720.as_deref(), Some("/dl/abc720"));
        // unknown resolution populates nothing and does not fail
        assert_eq!(bundle.links.q480, None);
        assert_eq!(bundle.links.q1080, None);
    }

    #[test]
    fn test_hdp_candidates_skip_label() {
        let page = Html::parse_document(EPISODE_PAGE);
        let bundle = extract_episode_links(&page).unwrap();

        assert_eq!(
            bundle.hdp_candidates,
            vec![
                "https://hdp.example.com/embed/1",
                "https://sb.example.com/e/2",
                "https://tape.example.com/e/3",
                "https://mix.example.com/e/4",
            ]
        );
    }

    #[test]
    fn test_provider_slots() {
        let page = Html::parse_document(EPISODE_PAGE);
        let bundle = extract_episode_links(&page).unwrap();

        assert_eq!(
            bundle.links.streamsb.as_deref(),
            Some("https://sb.example.com/e/2")
        );
        assert_eq!(
            bundle.links.streamtape.as_deref(),
            Some("https://tape.example.com/e/3")
        );
        assert_eq!(
            bundle.links.mixdrop.as_deref(),
            Some("https://mix.example.com/e/4")
        );
        assert_eq!(bundle.links.mp4upload, None);
        assert_eq!(bundle.links.hdp, None);
    }

    #[test]
    fn test_missing_download_panel() {
        let html = r#"<div class="anime_muti_link"><ul><li>label</li></ul></div>"#;
        let page = Html::parse_document(html);

        assert_eq!(
            extract_episode_links(&page),
            Err(EpisodeError::MissingPanel)
        );
    }

    #[test]
    fn test_missing_video_attribute() {
        let html = r##"
        <div class="cf-download"></div>
        <div class="anime_muti_link">
            <ul>
                <li>label</li>
                <li><a href="#">StreamsbChoose this server</a></li>
            </ul>
        </div>"##;
        let page = Html::parse_document(html);

        assert_eq!(
            extract_episode_links(&page),
            Err(EpisodeError::MissingVideo)
        );
    }

    #[test]
    fn test_absolute_normalization() {
        assert_eq!(absolute("//example.com/x"), "https://example.com/x");
        assert_eq!(absolute("http://example.com/x"), "http://example.com/x");
        assert_eq!(absolute("https://example.com/x"), "https://example.com/x");
    }

    #[test]
    fn test_scrape_direct_link() {
        let html = r#"
        <script src="/js/jquery.js"></script>
        <script>var player = {};</script>
        <script>
            player.setup({ file: 'https://cdn.example.com/hls/master.m3u8', autostart: true });
        </script>"#;
        let page = Html::parse_document(html);

        assert_eq!(
            scrape_direct_link(&page).as_deref(),
            Some("https://cdn.example.com/hls/master.m3u8")
        );
    }

    #[test]
    fn test_scrape_direct_link_missing_script() {
        let page = Html::parse_document("<script>var x = 1;</script>");

        assert_eq!(scrape_direct_link(&page), None);
    }

    #[test]
    fn test_scrape_direct_link_no_url() {
        let html = r#"
        <script></script>
        <script></script>
        <script>var player = "local";</script>"#;
        let page = Html::parse_document(html);

        assert_eq!(scrape_direct_link(&page), None);
    }
}
