//! Post list → personality code.

use std::sync::Arc;

use super::{majority_label, Axis, PersonalityCode, Prediction};
use crate::classifier::{ClassifierError, ClassifierSet};
use crate::features::{FeatureError, TfidfVectorizer};
use crate::vocabulary::Vocabulary;

/// Vectorizer plus the four axis classifiers.
///
/// Holds only read-only state, so one instance is shared by every request.
#[derive(Debug, Clone)]
pub struct PersonalityPredictor {
    vectorizer: TfidfVectorizer,
    classifiers: ClassifierSet,
}

impl PersonalityPredictor {
    pub fn new(vocabulary: Arc<Vocabulary>, classifiers: ClassifierSet) -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(vocabulary),
            classifiers,
        }
    }

    /// Predict a personality code from `posts`.
    ///
    /// An empty post list yields [`Prediction::NoData`] without touching the
    /// vectorizer or any classifier. Classifier failures are returned as-is.
    pub fn predict_personality<S: AsRef<str>>(
        &self,
        posts: &[S],
    ) -> Result<Prediction, ClassifierError> {
        if posts.is_empty() {
            log::debug!("No posts to classify");
            return Ok(Prediction::NoData);
        }

        let features = match self.vectorizer.fit_transform(posts) {
            Ok(features) => features,
            Err(FeatureError::EmptyCorpus) => return Ok(Prediction::NoData),
        };

        let mut majorities = [0.0; 4];
        for axis in Axis::ALL {
            let labels = self.classifiers.get(axis).predict(&features)?;
            if labels.len() != features.rows() {
                return Err(ClassifierError::OutputLength {
                    axis,
                    expected: features.rows(),
                    actual: labels.len(),
                });
            }
            // Non-empty: one label per row and at least one row.
            if let Some(majority) = majority_label(&labels) {
                majorities[axis.position()] = majority;
            }
        }

        let code = PersonalityCode::from_majorities(majorities);
        log::debug!("Classified {} posts as {}", posts.len(), code);
        Ok(Prediction::Code(code))
    }
}
