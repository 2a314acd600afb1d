//! Bernoulli naive Bayes inference.
//!
//! Parameters are exported from a trained model as JSON:
//!
//! ```json
//! {
//!   "classes": [1.0, 2.0],
//!   "class_log_prior": [-0.69, -0.69],
//!   "feature_log_prob": [[...], [...]],
//!   "binarize": 0.0
//! }
//! ```
//!
//! `feature_log_prob[c][j]` is `ln P(x_j = 1 | c)`. Features are binarized
//! with `x > binarize` before scoring; `"binarize": null` uses the values
//! as given.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Classifier, ClassifierError};
use crate::features::FeatureMatrix;

fn default_binarize() -> Option<f64> {
    Some(0.0)
}

/// Serialized model parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BernoulliNbParams {
    pub classes: Vec<f64>,
    pub class_log_prior: Vec<f64>,
    pub feature_log_prob: Vec<Vec<f64>>,
    #[serde(default = "default_binarize")]
    pub binarize: Option<f64>,
}

/// A validated Bernoulli naive Bayes model.
#[derive(Debug, Clone)]
pub struct BernoulliNb {
    classes: Vec<f64>,
    class_log_prior: Vec<f64>,
    /// `ln p - ln(1 - p)` per class and feature.
    log_odds: Vec<Vec<f64>>,
    /// `Σ_j ln(1 - p_j)` per class.
    neg_log_sum: Vec<f64>,
    binarize: Option<f64>,
    n_features: usize,
}

impl BernoulliNb {
    /// Validate parameters and precompute scoring terms.
    pub fn from_params(params: BernoulliNbParams) -> Result<Self, ClassifierError> {
        let n_classes = params.classes.len();
        if n_classes == 0 {
            return Err(ClassifierError::InvalidModel("no classes".to_string()));
        }
        if params.class_log_prior.len() != n_classes {
            return Err(ClassifierError::InvalidModel(format!(
                "{} classes but {} priors",
                n_classes,
                params.class_log_prior.len()
            )));
        }
        if params.feature_log_prob.len() != n_classes {
            return Err(ClassifierError::InvalidModel(format!(
                "{} classes but {} feature_log_prob rows",
                n_classes,
                params.feature_log_prob.len()
            )));
        }
        let n_features = params.feature_log_prob[0].len();
        if params
            .feature_log_prob
            .iter()
            .any(|row| row.len() != n_features)
        {
            return Err(ClassifierError::InvalidModel(
                "feature_log_prob rows differ in length".to_string(),
            ));
        }
        if params
            .feature_log_prob
            .iter()
            .flatten()
            .any(|&lp| !lp.is_finite() || lp >= 0.0)
        {
            return Err(ClassifierError::InvalidModel(
                "feature_log_prob must be finite and negative".to_string(),
            ));
        }

        let mut log_odds = Vec::with_capacity(n_classes);
        let mut neg_log_sum = Vec::with_capacity(n_classes);
        for row in &params.feature_log_prob {
            let neg: Vec<f64> = row.iter().map(|&lp| (-lp.exp()).ln_1p()).collect();
            log_odds.push(row.iter().zip(&neg).map(|(lp, n)| lp - n).collect());
            neg_log_sum.push(neg.iter().sum());
        }

        Ok(Self {
            classes: params.classes,
            class_log_prior: params.class_log_prior,
            log_odds,
            neg_log_sum,
            binarize: params.binarize,
            n_features,
        })
    }

    /// Read and validate a JSON model file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let json = std::fs::read_to_string(path)?;
        let params: BernoulliNbParams = serde_json::from_str(&json)?;
        Self::from_params(params)
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn classes(&self) -> &[f64] {
        &self.classes
    }

    fn predict_row(&self, row: &[f64]) -> f64 {
        let mut best = 0;
        let mut best_score = f64::NEG_INFINITY;
        for (c, odds) in self.log_odds.iter().enumerate() {
            let mut score = self.class_log_prior[c] + self.neg_log_sum[c];
            for (&x, &w) in row.iter().zip(odds) {
                let x = match self.binarize {
                    Some(threshold) => f64::from(u8::from(x > threshold)),
                    None => x,
                };
                score += x * w;
            }
            if score > best_score {
                best = c;
                best_score = score;
            }
        }
        self.classes[best]
    }
}

impl Classifier for BernoulliNb {
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<f64>, ClassifierError> {
        if features.cols() != self.n_features {
            return Err(ClassifierError::DimensionMismatch {
                expected: self.n_features,
                actual: features.cols(),
            });
        }
        Ok(features.iter_rows().map(|row| self.predict_row(row)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Feature 0 points to class 1, feature 1 to class 2.
    fn params() -> BernoulliNbParams {
        BernoulliNbParams {
            classes: vec![1.0, 2.0],
            class_log_prior: vec![0.5f64.ln(), 0.5f64.ln()],
            feature_log_prob: vec![
                vec![0.9f64.ln(), 0.1f64.ln()],
                vec![0.1f64.ln(), 0.9f64.ln()],
            ],
            binarize: Some(0.0),
        }
    }

    #[test]
    fn test_predict_follows_present_features() {
        let model = BernoulliNb::from_params(params()).unwrap();
        let m = FeatureMatrix::from_rows(vec![
            vec![0.8, 0.0],
            vec![0.0, 0.3],
            vec![1.0, 0.0],
        ])
        .unwrap();
        assert_eq!(model.predict(&m).unwrap(), vec![1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_tie_goes_to_first_class() {
        let model = BernoulliNb::from_params(params()).unwrap();
        let m = FeatureMatrix::zeros(2, 2);
        assert_eq!(model.predict(&m).unwrap(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_prior_breaks_empty_rows() {
        let mut p = params();
        p.class_log_prior = vec![0.2f64.ln(), 0.8f64.ln()];
        let model = BernoulliNb::from_params(p).unwrap();
        let m = FeatureMatrix::zeros(1, 2);
        assert_eq!(model.predict(&m).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_binarize_threshold() {
        let mut p = params();
        p.binarize = Some(0.5);
        let model = BernoulliNb::from_params(p).unwrap();
        // Feature 0 falls under the threshold and counts as absent.
        let m = FeatureMatrix::from_rows(vec![vec![0.4, 0.6]]).unwrap();
        assert_eq!(model.predict(&m).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = BernoulliNb::from_params(params()).unwrap();
        let m = FeatureMatrix::zeros(1, 3);
        assert!(matches!(
            model.predict(&m),
            Err(ClassifierError::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }

    #[test]
    fn test_invalid_shapes_rejected() {
        let mut p = params();
        p.class_log_prior.pop();
        assert!(matches!(
            BernoulliNb::from_params(p),
            Err(ClassifierError::InvalidModel(_))
        ));

        let mut p = params();
        p.feature_log_prob[1].push(0.5f64.ln());
        assert!(matches!(
            BernoulliNb::from_params(p),
            Err(ClassifierError::InvalidModel(_))
        ));

        let mut p = params();
        p.feature_log_prob[0][0] = 0.0;
        assert!(matches!(
            BernoulliNb::from_params(p),
            Err(ClassifierError::InvalidModel(_))
        ));
    }

    #[test]
    fn test_non_finite_log_probs_rejected() {
        for bad in [f64::NEG_INFINITY, f64::NAN] {
            let mut p = params();
            p.feature_log_prob[1][0] = bad;
            assert!(matches!(
                BernoulliNb::from_params(p),
                Err(ClassifierError::InvalidModel(_))
            ));
        }
    }

    #[test]
    fn test_load_json_defaults_binarize() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let json = serde_json::json!({
            "classes": [1.0, 2.0],
            "class_log_prior": [0.5f64.ln(), 0.5f64.ln()],
            "feature_log_prob": [[0.9f64.ln(), 0.1f64.ln()], [0.1f64.ln(), 0.9f64.ln()]],
        });
        std::fs::write(file.path(), json.to_string()).unwrap();

        let model = BernoulliNb::load(file.path()).unwrap();
        assert_eq!(model.n_features(), 2);
        assert_eq!(model.classes(), &[1.0, 2.0]);
        let m = FeatureMatrix::from_rows(vec![vec![0.01, 0.0]]).unwrap();
        assert_eq!(model.predict(&m).unwrap(), vec![1.0]);
    }

    #[test]
    fn test_load_rejects_malformed_json() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "{\"classes\": [1.0]").unwrap();
        assert!(matches!(
            BernoulliNb::load(file.path()),
            Err(ClassifierError::Json(_))
        ));
    }
}
