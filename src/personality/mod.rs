//! Vote Aggregator.
//!
//! Runs the four axis classifiers over a post feature matrix, takes the
//! majority label of each, and concatenates the axis letters into a
//! four-letter personality code.

pub mod axis;
pub mod predictor;
pub mod vote;

use std::fmt;

use serde::{Serialize, Serializer};

pub use axis::{Axis, POSITIVE_LABEL};
pub use predictor::PersonalityPredictor;
pub use vote::majority_label;

/// Text returned instead of a code when a user has no posts.
pub const NO_DATA_MESSAGE: &str = "No tweets found. Check your data loading process.";

/// A four-letter code such as `INTJ`, one letter per [`Axis`] in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PersonalityCode([char; 4]);

impl PersonalityCode {
    /// Build a code from the majority label of each axis, in axis order.
    pub fn from_majorities(majorities: [f64; 4]) -> Self {
        let mut letters = ['?'; 4];
        for (axis, majority) in Axis::ALL.into_iter().zip(majorities) {
            letters[axis.position()] = axis.letter_for(majority);
        }
        Self(letters)
    }

    /// Letter chosen for `axis`.
    pub fn letter(&self, axis: Axis) -> char {
        self.0[axis.position()]
    }

    pub fn as_string(&self) -> String {
        self.0.iter().collect()
    }
}

impl fmt::Display for PersonalityCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for letter in self.0 {
            write!(f, "{}", letter)?;
        }
        Ok(())
    }
}

impl Serialize for PersonalityCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Outcome of a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    /// The aggregated personality code.
    Code(PersonalityCode),
    /// The post list was empty; nothing was vectorized.
    NoData,
}

impl Prediction {
    pub fn code(&self) -> Option<PersonalityCode> {
        match self {
            Prediction::Code(code) => Some(*code),
            Prediction::NoData => None,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Prediction::Code(code) => fmt::Display::fmt(code, f),
            Prediction::NoData => f.write_str(NO_DATA_MESSAGE),
        }
    }
}

impl Serialize for Prediction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_from_majorities() {
        let code = PersonalityCode::from_majorities([1.0, 1.0, 1.0, 1.0]);
        assert_eq!(code.to_string(), "ISTP");

        let code = PersonalityCode::from_majorities([2.0, 0.0, 2.0, 0.0]);
        assert_eq!(code.to_string(), "ENFJ");
        assert_eq!(code.letter(Axis::SensingIntuition), 'N');
        assert_eq!(code.as_string(), "ENFJ");
    }

    #[test]
    fn test_prediction_display() {
        let code = PersonalityCode::from_majorities([1.0, 0.0, 0.0, 1.0]);
        assert_eq!(Prediction::Code(code).to_string(), "INFP");
        assert_eq!(Prediction::NoData.to_string(), NO_DATA_MESSAGE);
        assert_eq!(Prediction::NoData.code(), None);
    }

    #[test]
    fn test_prediction_serializes_as_text() {
        let code = PersonalityCode::from_majorities([1.0, 1.0, 0.0, 0.0]);
        assert_eq!(
            serde_json::to_value(Prediction::Code(code)).unwrap(),
            serde_json::json!("ISFJ")
        );
        assert_eq!(
            serde_json::to_value(Prediction::NoData).unwrap(),
            serde_json::json!(NO_DATA_MESSAGE)
        );
    }
}
