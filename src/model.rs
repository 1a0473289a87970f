/// One entry of a listing page (search, genre browse, airing panel), in the
/// order the site renders them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    /// Stable catalog slug, taken from the listing link's path.
    pub id: String,
}

/// Metadata of a single title, decoded from its category page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaInfo {
    pub title: String,
    pub year: u32,
    pub other_names: String,
    pub category: String,
    pub status: String,
    /// Genre names in page order; may be empty.
    pub genres: Vec<String>,
    pub episodes: u32,
    pub image_url: String,
    pub summary: String,
}

/// Sparse bundle of playback links for one episode. Any slot may be vacant
/// when the site does not offer that mirror; absence is a normal outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaLinks {
    /// Direct link resolved from the mirror player page, see
    /// [`crate::extract::episode::scrape_direct_link`].
    pub hdp: Option<String>,
    pub q360: Option<String>,
    pub q480: Option<String>,
    pub q720: Option<String>,
    pub q1080: Option<String>,
    pub streamsb: Option<String>,
    pub xstreamcdn: Option<String>,
    pub streamtape: Option<String>,
    pub mixdrop: Option<String>,
    pub mp4upload: Option<String>,
    pub doodstream: Option<String>,
}

impl MediaLinks {
    /// True when no slot at all could be resolved.
    pub fn is_empty(&self) -> bool {
        self.hdp.is_none()
            && self.q360.is_none()
            && self.q480.is_none()
            && self.q720.is_none()
            && self.q1080.is_none()
            && self.streamsb.is_none()
            && self.xstreamcdn.is_none()
            && self.streamtape.is_none()
            && self.mixdrop.is_none()
            && self.mp4upload.is_none()
            && self.doodstream.is_none()
    }

    pub(crate) fn set_quality(&mut self, quality: Quality, url: String) {
        let slot = match quality {
            Quality::Q360 => &mut self.q360,
            Quality::Q480 => &mut self.q480,
            Quality::Q720 => &mut self.q720,
            Quality::Q1080 => &mut self.q1080,
        };
        *slot = Some(url);
    }

    pub(crate) fn set_provider(&mut self, provider: Provider, url: String) {
        let slot = match provider {
            Provider::Streamsb => &mut self.streamsb,
            Provider::Xstreamcdn => &mut self.xstreamcdn,
            Provider::Streamtape => &mut self.streamtape,
            Provider::Mixdrop => &mut self.mixdrop,
            Provider::Mp4upload => &mut self.mp4upload,
            Provider::Doodstream => &mut self.doodstream,
        };
        *slot = Some(url);
    }
}

/// Resolution tiers the download panel offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quality {
    Q360,
    Q480,
    Q720,
    Q1080,
}

impl Quality {
    /// Parses the token after the literal `x` in a download anchor's text,
    /// e.g. `"360"` from `"MP4 x360"`. Trailing non-digits are dropped, an
    /// unknown resolution yields `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        let digits = token
            .trim()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>();

        match digits.as_str() {
            "360" => Some(Quality::Q360),
            "480" => Some(Quality::Q480),
            "720" => Some(Quality::Q720),
            "1080" => Some(Quality::Q1080),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Q360 => "360p",
            Quality::Q480 => "480p",
            Quality::Q720 => "720p",
            Quality::Q1080 => "1080p",
        }
    }
}

/// Third-party mirror hosts listed on the episode page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    Streamsb,
    Xstreamcdn,
    Streamtape,
    Mixdrop,
    Mp4upload,
    Doodstream,
}

impl Provider {
    const ALL: [Provider; 6] = [
        Provider::Streamsb,
        Provider::Xstreamcdn,
        Provider::Streamtape,
        Provider::Mixdrop,
        Provider::Mp4upload,
        Provider::Doodstream,
    ];

    /// Display name as the site renders it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Streamsb => "Streamsb",
            Provider::Xstreamcdn => "Xstreamcdn",
            Provider::Streamtape => "Streamtape",
            Provider::Mixdrop => "Mixdrop",
            Provider::Mp4upload => "Mp4Upload",
            Provider::Doodstream => "Doodstream",
        }
    }

    /// Matches a provider entry label. The site appends UI noise after the
    /// name ("StreamtapeChoose this server"); the noise always starts with
    /// a capital letter or whitespace, so a name-prefix match is exact.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();

        Self::ALL.into_iter().find(|p| {
            let name = p.as_str();
            label.starts_with(name)
                && label[name.len()..]
                    .chars()
                    .next()
                    .is_none_or(|c| c.is_ascii_uppercase() || c.is_whitespace())
        })
    }
}
