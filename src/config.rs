//! Server configuration.
//!
//! Everything is read from environment variables once at startup:
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `VOCABULARY_PATH` — vocabulary CSV (default: `newfrequency300.csv`)
//! - `MODEL_DIR` — directory holding the four axis models (default: `models`)
//! - `POSTS_FILE` — serve posts from this JSON file instead of over HTTP
//! - `POST_SOURCE_URL` — base URL of the post scraper (default: `http://127.0.0.1:8081`)
//! - `POST_FETCH_TIMEOUT_MS` — scraper request timeout (default: 30000)
//! - `MAX_POSTS` — posts fetched per user (default: 50)
//! - `CACHE_TTL_SECS` — post cache lifetime (default: 300)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::cache::DEFAULT_TTL;
use crate::posts::DEFAULT_MAX_POSTS;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    Invalid { key: String, value: String },
}

/// Where posts come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostSourceConfig {
    /// Remote scraper front-end.
    Http { base_url: String, timeout: Duration },
    /// Local `{ username: [post, ...] }` JSON file.
    File { path: PathBuf },
}

/// Complete server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub vocabulary_path: PathBuf,
    pub model_dir: PathBuf,
    pub post_source: PostSourceConfig,
    pub max_posts: usize,
    pub cache_ttl: Duration,
}

impl AppConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key → value lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let post_source = match get("POSTS_FILE") {
            Some(path) => PostSourceConfig::File {
                path: PathBuf::from(path),
            },
            None => PostSourceConfig::Http {
                base_url: get("POST_SOURCE_URL")
                    .unwrap_or_else(|| "http://127.0.0.1:8081".to_string()),
                timeout: Duration::from_millis(parse_or(&get, "POST_FETCH_TIMEOUT_MS", 30_000)?),
            },
        };

        Ok(Self {
            port: parse_or(&get, "PORT", 8080)?,
            vocabulary_path: get("VOCABULARY_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("newfrequency300.csv")),
            model_dir: get("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("models")),
            post_source,
            max_posts: parse_or(&get, "MAX_POSTS", DEFAULT_MAX_POSTS)?,
            cache_ttl: Duration::from_secs(parse_or(&get, "CACHE_TTL_SECS", DEFAULT_TTL.as_secs())?),
        })
    }

    /// `0.0.0.0:{port}`.
    pub fn bind_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

fn parse_or<T, G>(get: &G, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
