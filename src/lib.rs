//! # Personality Predictor
//!
//! Predicts a four-letter personality type (e.g. `INTJ`) for a user from
//! their recent posts.
//!
//! The pipeline per request:
//!
//! 1. Fetch the user's posts through a [`posts::PostSource`], cached for a
//!    fixed TTL in a [`cache::PostCache`].
//! 2. Vectorize the posts into a TF-IDF matrix over a fixed
//!    [`vocabulary::Vocabulary`] ([`features::TfidfVectorizer`]).
//! 3. Run one binary [`classifier::Classifier`] per axis, take each axis'
//!    majority label and map it to a letter
//!    ([`personality::PersonalityPredictor`]).

pub mod cache;
pub mod classifier;
pub mod config;
pub mod features;
pub mod personality;
pub mod posts;
pub mod server;
pub mod service;
pub mod vocabulary;

pub use classifier::{Classifier, ClassifierSet};
pub use config::AppConfig;
pub use personality::{PersonalityCode, PersonalityPredictor, Prediction, NO_DATA_MESSAGE};
pub use service::PersonalityService;
pub use vocabulary::Vocabulary;

/// Crate version reported by the health endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
