use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Closed failure taxonomy of the client. Nothing at this layer retries;
/// every variant is surfaced to the caller as-is.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Unable to get data from the server\nFrom: {0}")]
    Network(#[from] reqwest::Error),

    #[error("No search results found for the query")]
    NoSearchResults,

    #[error("Invalid anime id or episode number given")]
    InvalidAnimeId,

    #[error("Invalid tokens passed, check your tokens")]
    InvalidToken,

    #[error("Invalid genre name or page number")]
    InvalidGenreName,

    #[error("count parameter cannot exceed 20, got {0}")]
    Count(u32),

    #[error("No content found on the airing page")]
    AiringIndex,
}
