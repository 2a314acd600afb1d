//! Per-axis binary classifiers.
//!
//! Every axis is served by an independent model behind the [`Classifier`]
//! trait. Models are loaded once at startup and are read-only afterwards,
//! so a [`ClassifierSet`] can be shared across requests behind an `Arc`.

pub mod bernoulli_nb;

use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::features::FeatureMatrix;
use crate::personality::Axis;

pub use bernoulli_nb::BernoulliNb;

/// Errors raised while loading or running a classifier.
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// Model file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Model file is not valid JSON for the expected model type.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Model parameters are inconsistent with each other.
    #[error("Invalid model: {0}")]
    InvalidModel(String),

    /// Feature matrix width differs from what the model was trained on.
    #[error("Feature count mismatch: model expects {expected}, matrix has {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A model was trained on a different feature count than the vocabulary
    /// produces.
    #[error("{axis} model has {actual} features but the vocabulary has {expected} columns")]
    ModelWidth {
        axis: Axis,
        expected: usize,
        actual: usize,
    },

    /// The classifier returned a label count that differs from the row count.
    #[error("{axis} classifier returned {actual} labels for {expected} rows")]
    OutputLength {
        axis: Axis,
        expected: usize,
        actual: usize,
    },
}

/// A trained binary predictor.
///
/// Implementations must be deterministic: the same matrix always yields the
/// same labels.
pub trait Classifier: Send + Sync {
    /// Predict one label per matrix row.
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ClassifierError>;
}

/// The four axis classifiers, in axis order.
#[derive(Clone)]
pub struct ClassifierSet {
    classifiers: [Arc<dyn Classifier>; 4],
}

impl ClassifierSet {
    pub fn new(
        introversion: Arc<dyn Classifier>,
        sensing: Arc<dyn Classifier>,
        thinking: Arc<dyn Classifier>,
        perceiving: Arc<dyn Classifier>,
    ) -> Self {
        Self {
            classifiers: [introversion, sensing, thinking, perceiving],
        }
    }

    /// Load one [`BernoulliNb`] model per axis from `dir`.
    ///
    /// Every model must take exactly `n_features` columns, the width of the
    /// vocabulary that feeds it.
    pub fn load_dir(dir: impl AsRef<Path>, n_features: usize) -> Result<Self, ClassifierError> {
        let dir = dir.as_ref();
        let load = |axis: Axis| -> Result<Arc<dyn Classifier>, ClassifierError> {
            let path = dir.join(axis.model_file());
            let model = BernoulliNb::load(&path)?;
            if model.n_features() != n_features {
                return Err(ClassifierError::ModelWidth {
                    axis,
                    expected: n_features,
                    actual: model.n_features(),
                });
            }
            log::debug!(
                "Loaded {} model from {} ({} features)",
                axis,
                path.display(),
                model.n_features()
            );
            Ok(Arc::new(model))
        };

        Ok(Self::new(
            load(Axis::IntroversionExtraversion)?,
            load(Axis::SensingIntuition)?,
            load(Axis::ThinkingFeeling)?,
            load(Axis::PerceivingJudging)?,
        ))
    }

    /// Classifier responsible for `axis`.
    pub fn get(&self, axis: Axis) -> &dyn Classifier {
        self.classifiers[axis.position()].as_ref()
    }
}

impl std::fmt::Debug for ClassifierSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassifierSet").finish_non_exhaustive()
    }
}
