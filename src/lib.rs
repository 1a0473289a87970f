//! Client for turning GogoAnime's HTML pages into structured records:
//! search results, title metadata, and per-episode mirror link bundles.
//!
//! The extraction rules live in [`extract`] as pure functions over parsed
//! documents, so they can be tested against fixtures without a network.
//! [`GogoClient`] wires them to the live site over reqwest.
//!
//! ```no_run
//! use gogoanime_client::{Credentials, GogoClient};
//!
//! # async fn run() -> gogoanime_client::Result<()> {
//! let client = GogoClient::new(Credentials::new("token", "auth"))?;
//!
//! for anime in client.search("clannad").await? {
//!     println!("{} ({})", anime.title, anime.id);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod errors;
pub mod extract;
pub mod model;

pub use client::{Credentials, GogoClient};
pub use errors::{Error, Result};
pub use model::{MediaInfo, MediaLinks, Provider, Quality, SearchResult};
