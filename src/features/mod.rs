//! Feature Builder.
//!
//! Turns a list of posts into a dense TF-IDF matrix whose columns are the
//! fixed [`Vocabulary`](crate::vocabulary::Vocabulary) terms. Document
//! frequencies come from the posts themselves, so every request is its own
//! corpus.

pub mod matrix;
pub mod tfidf;
pub mod tokenizer;

use thiserror::Error;

pub use matrix::FeatureMatrix;
pub use tfidf::TfidfVectorizer;
pub use tokenizer::tokenize;

/// Errors raised by the Feature Builder.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// Vectorization was attempted on an empty post list.
    #[error("Cannot vectorize an empty post list")]
    EmptyCorpus,
}
