//! TF-IDF vectorizer over a fixed vocabulary.
//!
//! Term counts are restricted to vocabulary columns. IDF is fitted on the
//! posts being vectorized with add-one smoothing:
//!
//! ```text
//! idf(t) = ln((1 + n) / (1 + df(t))) + 1
//! ```
//!
//! and every row is scaled to unit L2 norm afterwards.

use std::sync::Arc;

use super::matrix::FeatureMatrix;
use super::tokenizer::tokenize;
use super::FeatureError;
use crate::vocabulary::Vocabulary;

/// Vectorizer bound to one shared vocabulary.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: Arc<Vocabulary>,
}

impl TfidfVectorizer {
    pub fn new(vocabulary: Arc<Vocabulary>) -> Self {
        Self { vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Fit IDF weights on `posts` and return their TF-IDF matrix.
    pub fn fit_transform<S: AsRef<str>>(&self, posts: &[S]) -> Result<FeatureMatrix, FeatureError> {
        if posts.is_empty() {
            return Err(FeatureError::EmptyCorpus);
        }

        let width = self.vocabulary.width();
        let mut matrix = self.term_counts(posts);

        let mut doc_freq = vec![0usize; width];
        for row in matrix.iter_rows() {
            for (df, &count) in doc_freq.iter_mut().zip(row) {
                if count > 0.0 {
                    *df += 1;
                }
            }
        }

        let n_docs = posts.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n_docs) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        for i in 0..matrix.rows() {
            let row = matrix.row_mut(i);
            for (value, weight) in row.iter_mut().zip(&idf) {
                *value *= weight;
            }
            let norm = row.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm > 0.0 {
                for value in row.iter_mut() {
                    *value /= norm;
                }
            }
        }

        log::debug!(
            "Vectorized {} posts into {}x{} matrix",
            posts.len(),
            matrix.rows(),
            matrix.cols()
        );
        Ok(matrix)
    }

    /// Raw vocabulary term counts, one row per post.
    fn term_counts<S: AsRef<str>>(&self, posts: &[S]) -> FeatureMatrix {
        let mut matrix = FeatureMatrix::zeros(posts.len(), self.vocabulary.width());
        for (i, post) in posts.iter().enumerate() {
            let row = matrix.row_mut(i);
            for token in tokenize(post.as_ref()) {
                if let Some(col) = self.vocabulary.index_of(&token) {
                    row[col] += 1.0;
                }
            }
        }
        matrix
    }
}
