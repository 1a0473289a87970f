use reqwest::header::{self, COOKIE, HeaderValue};
use reqwest::Client;
use scraper::Html;
use tracing::debug;

use crate::errors::{Error, Result};
use crate::extract::detail;
use crate::extract::episode::{self, EpisodeError};
use crate::extract::listing::{self, ListingError};
use crate::model::{MediaInfo, MediaLinks, SearchResult};

/// Default catalog host. The site rotates domains from time to time, see
/// [`GogoClient::with_host`].
pub const DEFAULT_HOST: &str = "https://gogoanime.pe";

/// Hard upper bound on airing-list requests, checked before any fetch.
pub const MAX_AIRING_COUNT: u32 = 20;

#[rustfmt::skip]
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml; q=0.9,image/webp,*/*; q=0.8";
const USER_AGENT: &str = "Mozilla/5.0 (Windows; U; Windows NT 5.1; en-GB; rv:1.8.1.6) Gecko/20070725 Firefox/2.0.0.6";

/// Opaque auth cookies attached to the episode-link fetch only. Never
/// validated locally; a rejected pair surfaces as [`Error::InvalidToken`].
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub gogoanime: String,
    pub auth: String,
}

impl Credentials {
    pub fn new(gogoanime: &str, auth: &str) -> Self {
        Self {
            gogoanime: gogoanime.to_string(),
            auth: auth.to_string(),
        }
    }

    fn cookie_header(&self) -> String {
        format!("gogoanime={}; auth={}", self.gogoanime, self.auth)
    }
}

/// Client over the catalog site. Holds no state besides the host, the
/// credentials and the connection pool, so concurrent calls are safe; every
/// operation parses a fresh document.
pub struct GogoClient {
    host: String,
    credentials: Credentials,
    client: Client,
}

impl GogoClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static(ACCEPT));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .build()?;

        Ok(Self {
            host: DEFAULT_HOST.to_string(),
            credentials,
            client,
        })
    }

    /// Overrides the default host, e.g. after a domain rotation.
    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.trim_end_matches('/').to_string();
        self
    }

    /// Free-text search over the catalog, in site order.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>> {
        let url = format!(
            "{}/search.html?keyword={}",
            self.host,
            urlencoding::encode(query)
        );
        let page = self.get_page(&url, None).await?;

        listing::extract_listing(&page, listing::ITEMS).map_err(|_| Error::NoSearchResults)
    }

    /// Metadata of a single title.
    pub async fn details(&self, id: &str) -> Result<MediaInfo> {
        let url = format!("{}/category/{id}", self.host);
        let page = self.get_page(&url, None).await?;

        detail::extract_detail(&page).map_err(|_| Error::InvalidAnimeId)
    }

    /// Playback link bundle for one episode. Performs the episode-page
    /// fetch with both credential cookies attached, then a best-effort
    /// second fetch to resolve the `hdp` slot.
    pub async fn episode_links(&self, id: &str, episode: u32) -> Result<MediaLinks> {
        let url = format!("{}/{id}-episode-{episode}", self.host);
        let cookies = self.credentials.cookie_header();
        let page = self.get_page(&url, Some(&cookies)).await?;

        let bundle = episode::extract_episode_links(&page).map_err(|e| match e {
            EpisodeError::MissingPanel => Error::InvalidAnimeId,
            EpisodeError::MissingVideo => Error::InvalidToken,
        })?;

        let mut links = bundle.links;
        if let Some(candidate) = bundle.hdp_candidates.first() {
            links.hdp = self.resolve_direct_link(candidate).await;
        }

        Ok(links)
    }

    /// One page of a genre listing, in site order.
    pub async fn by_genre(&self, genre: &str, page: u32) -> Result<Vec<SearchResult>> {
        let url = format!(
            "{}/genre/{}?page={page}",
            self.host,
            urlencoding::encode(genre)
        );
        let document = self.get_page(&url, None).await?;

        listing::extract_listing(&document, listing::ITEMS).map_err(|e| match e {
            ListingError::MissingContainer => Error::InvalidGenreName,
            ListingError::Empty => Error::NoSearchResults,
        })
    }

    /// The first `count` currently airing titles from the front page,
    /// `count` < [`MAX_AIRING_COUNT`].
    pub async fn airing(&self, count: u32) -> Result<Vec<SearchResult>> {
        if count >= MAX_AIRING_COUNT {
            return Err(Error::Count(count));
        }

        let url = format!("{}/", self.host);
        let page = self.get_page(&url, None).await?;

        let mut results =
            listing::extract_listing(&page, listing::AIRING).map_err(|_| Error::AiringIndex)?;
        results.truncate(count as usize);

        Ok(results)
    }

    /// Secondary derivation of the `hdp` slot from a mirror player page.
    /// Best effort: any failure leaves the slot vacant instead of failing
    /// the bundle already assembled.
    async fn resolve_direct_link(&self, url: &str) -> Option<String> {
        debug!(url = %url, "resolving hdp mirror");

        let page = self.get_page(url, None).await.ok()?;
        episode::scrape_direct_link(&page)
    }

    async fn get_page(&self, url: &str, cookies: Option<&str>) -> Result<Html> {
        debug!(url = %url, "fetching page");

        let mut request = self.client.get(url);
        if let Some(cookies) = cookies {
            request = request.header(COOKIE, cookies);
        }
        let response = request.send().await?.error_for_status()?;

        Ok(Html::parse_document(&response.text().await?))
    }
}
