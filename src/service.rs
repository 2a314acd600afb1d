//! Request-scoped prediction pipeline.
//!
//! For each username: look the post list up in the cache, fetch and cache it
//! on a miss, then run the predictor on a blocking worker. Nothing here
//! retries or degrades; every failure is returned to the caller.

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;

use crate::cache::PostCache;
use crate::classifier::ClassifierError;
use crate::personality::{PersonalityPredictor, Prediction};
use crate::posts::{PostSource, PostSourceError, DEFAULT_MAX_POSTS};

/// Errors that abort a prediction request.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Fetching posts failed.
    #[error("Failed to fetch posts: {0}")]
    Fetch(#[from] PostSourceError),

    /// A classifier rejected the feature matrix.
    #[error("Classification failed: {0}")]
    Classifier(#[from] ClassifierError),

    /// The classification worker panicked or was cancelled.
    #[error("Classification worker failed: {0}")]
    Worker(String),
}

/// Prediction for one user.
#[derive(Debug, Clone, Serialize)]
pub struct UserPrediction {
    pub username: String,
    pub mbti: Prediction,
    pub post_count: usize,
    /// Whether the posts came from the cache.
    pub cached: bool,
}

/// Ties the post source, cache and predictor together.
#[derive(Clone)]
pub struct PersonalityService {
    predictor: Arc<PersonalityPredictor>,
    source: Arc<dyn PostSource>,
    cache: PostCache,
    max_posts: usize,
}

impl PersonalityService {
    pub fn new(
        predictor: Arc<PersonalityPredictor>,
        source: Arc<dyn PostSource>,
        cache: PostCache,
    ) -> Self {
        Self {
            predictor,
            source,
            cache,
            max_posts: DEFAULT_MAX_POSTS,
        }
    }

    /// Override how many posts are fetched per user.
    pub fn with_max_posts(mut self, max_posts: usize) -> Self {
        self.max_posts = max_posts;
        self
    }

    pub fn cache(&self) -> &PostCache {
        &self.cache
    }

    /// Cached posts for `username`, fetching them on a miss.
    ///
    /// Empty results are cached too.
    pub async fn posts_for(&self, username: &str) -> Result<(Arc<Vec<String>>, bool), ServiceError> {
        if let Some(posts) = self.cache.get(username) {
            log::debug!("Post cache hit for '{}' ({} posts)", username, posts.len());
            return Ok((posts, true));
        }

        log::debug!("Post cache miss for '{}'", username);
        let posts = Arc::new(self.source.fetch(username, self.max_posts).await?);
        self.cache.set(username, posts.clone());
        Ok((posts, false))
    }

    /// Predict the personality code for `username`.
    pub async fn predict_for_user(&self, username: &str) -> Result<UserPrediction, ServiceError> {
        let (posts, cached) = self.posts_for(username).await?;
        let post_count = posts.len();

        let predictor = self.predictor.clone();
        let mbti = tokio::task::spawn_blocking(move || predictor.predict_personality(posts.as_slice()))
            .await
            .map_err(|e| ServiceError::Worker(e.to_string()))??;

        log::info!("Predicted {} for '{}' from {} posts", mbti, username, post_count);
        Ok(UserPrediction {
            username: username.to_string(),
            mbti,
            post_count,
            cached,
        })
    }
}

impl std::fmt::Debug for PersonalityService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersonalityService")
            .field("max_posts", &self.max_posts)
            .field("cached_users", &self.cache.len())
            .finish_non_exhaustive()
    }
}
