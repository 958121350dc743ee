//! Blend weights, one per morph target

use std::num::ParseFloatError;
use std::str::FromStr;

/// A token in a weights source could not be parsed as a float.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("weight {index} ('{token}') is not a number: {source}")]
pub struct ParseWeightsError {
    /// Zero-based position of the token in the source
    pub index: usize,
    pub token: String,
    #[source]
    pub source: ParseFloatError,
}

/// Ordered blend weights. Index `i` scales the delta of target mesh `i`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightVector(pub Vec<f64>);

impl WeightVector {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl FromStr for WeightVector {
    type Err = ParseWeightsError;

    /// Parse whitespace or newline separated floats, in order. No header, and
    /// no check against the number of targets.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .enumerate()
            .map(|(index, token)| {
                token.parse::<f64>().map_err(|source| ParseWeightsError {
                    index,
                    token: token.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}
