//! Post sources.
//!
//! A [`PostSource`] returns a user's most recent post texts, newest first.
//! The service holds one source for its whole lifetime; sources build their
//! own clients lazily on first use.

pub mod http;
pub mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use http::HttpPostSource;
pub use memory::StaticPostSource;

/// Number of posts fetched per user unless configured otherwise.
pub const DEFAULT_MAX_POSTS: usize = 50;

/// Errors raised while fetching posts.
#[derive(Debug, Error)]
pub enum PostSourceError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The upstream does not know this user.
    #[error("Unknown user: {0}")]
    UnknownUser(String),

    /// The upstream answered with a non-success status.
    #[error("Post source returned {status}: {body}")]
    Status { status: u16, body: String },

    /// The request URL could not be built.
    #[error("Invalid post source URL: {0}")]
    InvalidUrl(String),

    /// Local post file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Local post file is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Something that can fetch a user's recent posts.
#[async_trait]
pub trait PostSource: Send + Sync {
    /// Fetch up to `max_count` post texts for `username`. May be empty.
    async fn fetch(&self, username: &str, max_count: usize)
        -> Result<Vec<String>, PostSourceError>;
}
