//! Fixed, in-memory post source.
//!
//! Serves posts from a map loaded at startup, e.g. a JSON export:
//!
//! ```json
//! { "alice": ["first post", "second post"], "bob": [] }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;

use super::{PostSource, PostSourceError};

/// Username → posts map. Unknown users have no posts.
#[derive(Debug, Clone, Default)]
pub struct StaticPostSource {
    posts: HashMap<String, Vec<String>>,
}

impl StaticPostSource {
    pub fn new(posts: HashMap<String, Vec<String>>) -> Self {
        Self { posts }
    }

    /// Load a `{ username: [post, ...] }` JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PostSourceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let posts: HashMap<String, Vec<String>> = serde_json::from_str(&json)?;
        log::debug!("Loaded posts for {} users from {}", posts.len(), path.display());
        Ok(Self::new(posts))
    }

    /// Add or replace a user's posts.
    pub fn with_user(mut self, username: impl Into<String>, posts: Vec<String>) -> Self {
        self.posts.insert(username.into(), posts);
        self
    }
}

#[async_trait]
impl PostSource for StaticPostSource {
    async fn fetch(
        &self,
        username: &str,
        max_count: usize,
    ) -> Result<Vec<String>, PostSourceError> {
        Ok(self
            .posts
            .get(username)
            .map(|posts| posts.iter().take(max_count).cloned().collect())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_truncates_to_max_count() {
        let source = StaticPostSource::default().with_user(
            "alice",
            vec!["one".to_string(), "two".to_string(), "three".to_string()],
        );
        let posts = tokio_test::block_on(source.fetch("alice", 2)).unwrap();
        assert_eq!(posts, vec!["one", "two"]);
    }

    #[test]
    fn test_unknown_user_has_no_posts() {
        let source = StaticPostSource::default();
        let posts = tokio_test::block_on(source.fetch("nobody", 50)).unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn test_from_json_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"{"bob": ["hi there", "bye"], "eve": []}"#).unwrap();

        let source = StaticPostSource::from_json_file(file.path()).unwrap();
        assert_eq!(source.fetch("bob", 50).await.unwrap(), vec!["hi there", "bye"]);
        assert!(source.fetch("eve", 50).await.unwrap().is_empty());
    }

    #[test]
    fn test_from_json_file_rejects_wrong_shape() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), r#"["not", "a", "map"]"#).unwrap();
        assert!(matches!(
            StaticPostSource::from_json_file(file.path()),
            Err(PostSourceError::Json(_))
        ));
    }
}
