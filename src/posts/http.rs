//! HTTP post source.
//!
//! Fetches posts from a scraper front-end that answers
//!
//! ```text
//! GET {base_url}/users/{username}/posts?number={max_count}
//! ```
//!
//! with `{"tweets": [{"text": "..."}, ...]}`. Any extra fields are ignored.

use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use reqwest::Url;
use serde::Deserialize;

use super::{PostSource, PostSourceError};

#[derive(Debug, Deserialize)]
struct PostsResponse {
    #[serde(default)]
    tweets: Vec<PostItem>,
}

#[derive(Debug, Deserialize)]
struct PostItem {
    text: String,
}

/// Post source backed by a remote HTTP endpoint.
///
/// The underlying client is created on the first fetch and reused after.
#[derive(Debug)]
pub struct HttpPostSource {
    base_url: String,
    timeout: Duration,
    client: OnceCell<reqwest::Client>,
}

impl HttpPostSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            timeout,
            client: OnceCell::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn client(&self) -> Result<&reqwest::Client, PostSourceError> {
        self.client.get_or_try_init(|| {
            log::debug!("Building post source client for {}", self.base_url);
            reqwest::Client::builder()
                .timeout(self.timeout)
                .build()
                .map_err(PostSourceError::from)
        })
    }

    /// Request URL for `username`; the username is encoded as one path
    /// segment.
    pub fn posts_url(&self, username: &str, max_count: usize) -> Result<Url, PostSourceError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| PostSourceError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| PostSourceError::InvalidUrl(format!("{}: cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(["users", username, "posts"]);
        url.query_pairs_mut()
            .append_pair("number", &max_count.to_string());
        Ok(url)
    }
}

#[async_trait]
impl PostSource for HttpPostSource {
    async fn fetch(
        &self,
        username: &str,
        max_count: usize,
    ) -> Result<Vec<String>, PostSourceError> {
        let url = self.posts_url(username, max_count)?;
        let resp = self
            .client()?
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(PostSourceError::UnknownUser(username.to_string()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PostSourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: PostsResponse = resp.json().await?;
        let posts: Vec<String> = body
            .tweets
            .into_iter()
            .take(max_count)
            .map(|item| item.text)
            .collect();
        log::debug!("Fetched {} posts for '{}'", posts.len(), username);
        Ok(posts)
    }
}
