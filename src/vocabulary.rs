//! Fixed term vocabulary.
//!
//! The vocabulary maps a token to the column it occupies in the feature
//! matrix. It is loaded once at startup from a header-less CSV file whose
//! rows read `index,token`, and is read-only afterwards.

use std::collections::HashMap;
use std::path::Path;

use csv::ReaderBuilder;
use thiserror::Error;

/// Errors raised while building or loading a [`Vocabulary`].
#[derive(Debug, Error)]
pub enum VocabularyError {
    /// The vocabulary file could not be read or is not valid CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A row is missing a field or carries a non-numeric index.
    #[error("Malformed vocabulary row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    /// Two different tokens claim the same column.
    #[error("Column {index} is assigned to both '{first}' and '{second}'")]
    DuplicateIndex {
        index: usize,
        first: String,
        second: String,
    },

    /// An index too large to address a feature column.
    #[error("Column {index} for '{token}' is out of range")]
    IndexOutOfRange { token: String, index: usize },

    /// No terms at all.
    #[error("Vocabulary is empty")]
    Empty,
}

/// Immutable token → column index mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    terms: HashMap<String, usize>,
    width: usize,
}

impl Vocabulary {
    /// Build a vocabulary from `(token, index)` pairs.
    ///
    /// A repeated token keeps its last index. Indices need not be
    /// contiguous: the width is the highest index plus one and unused
    /// columns stay zero in every feature row.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self, VocabularyError>
    where
        I: IntoIterator<Item = (S, usize)>,
        S: Into<String>,
    {
        let mut terms: HashMap<String, usize> = HashMap::new();
        for (token, index) in pairs {
            let token = token.into();
            if let Some(previous) = terms.insert(token.clone(), index) {
                if previous != index {
                    log::warn!(
                        "Vocabulary token '{}' reassigned from column {} to {}",
                        token,
                        previous,
                        index
                    );
                }
            }
        }

        if terms.is_empty() {
            return Err(VocabularyError::Empty);
        }

        let mut owners: HashMap<usize, &str> = HashMap::with_capacity(terms.len());
        for (token, &index) in &terms {
            if let Some(first) = owners.insert(index, token) {
                let (first, second) = if first < token.as_str() {
                    (first, token.as_str())
                } else {
                    (token.as_str(), first)
                };
                return Err(VocabularyError::DuplicateIndex {
                    index,
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }
        }

        let width = match terms.iter().max_by_key(|(_, index)| **index) {
            Some((token, &index)) => {
                index
                    .checked_add(1)
                    .ok_or_else(|| VocabularyError::IndexOutOfRange {
                        token: token.clone(),
                        index,
                    })?
            }
            None => 0,
        };
        Ok(Self { terms, width })
    }

    /// Load a vocabulary CSV (`index,token` per row, no header).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)?;

        let mut pairs = Vec::new();
        for record in reader.records() {
            let record = record?;
            let line = record.position().map_or(0, |p| p.line());
            let (Some(raw_index), Some(token)) = (record.get(0), record.get(1)) else {
                return Err(VocabularyError::MalformedRow {
                    line,
                    reason: "expected `index,token`".to_string(),
                });
            };
            let index = raw_index.trim().parse::<usize>().map_err(|e| {
                VocabularyError::MalformedRow {
                    line,
                    reason: format!("invalid index '{}': {}", raw_index, e),
                }
            })?;
            pairs.push((token.to_string(), index));
        }

        let vocabulary = Self::from_pairs(pairs)?;
        log::debug!(
            "Loaded vocabulary from {}: {} terms, width {}",
            path.display(),
            vocabulary.len(),
            vocabulary.width()
        );
        Ok(vocabulary)
    }

    /// Column for `token`, if it is part of the vocabulary.
    pub fn index_of(&self, token: &str) -> Option<usize> {
        self.terms.get(token).copied()
    }

    /// Number of feature-matrix columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}
