//! FSRS Parameter Sets
//!
//! A [`ParameterSet`] bundles the 17 model weights with a target retention.
//! Instances only exist through [`ParameterSet::new`], so every value in
//! circulation has exactly 17 weights and a retention in [0.70, 0.97].
//!
//! Storage format (JSON):
//!
//! ```json
//! { "w": [0.4872, 1.4003, ...], "desiredRetention": 0.9 }
//! ```
//!
//! Unknown fields are ignored on input.

use serde::{Deserialize, Serialize};

use crate::types::{
    DEFAULT_DESIRED_RETENTION, DEFAULT_WEIGHTS, MAX_RETENTION, MIN_RETENTION, WEIGHT_COUNT,
};

/// Parameter construction and decoding failures
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParameterError {
    #[error("FSRS-4.5 requires exactly {expected} weights, got {actual}")]
    InvalidWeightCount { expected: usize, actual: usize },
    #[error("weight w{index} must be finite, got {value}")]
    NonFiniteWeight { index: usize, value: f64 },
    #[error("desired retention must be between 0.70 and 0.97, got {0}")]
    RetentionOutOfRange(f64),
    #[error("malformed parameter override: {0}")]
    MalformedOverride(String),
}

/// Validated, immutable FSRS-4.5 parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ParameterSetJson", into = "ParameterSetJson")]
pub struct ParameterSet {
    w: [f64; WEIGHT_COUNT],
    target_retention: f64,
}

/// Serialized shape of a [`ParameterSet`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSetJson {
    pub w: Vec<f64>,
    #[serde(rename = "desiredRetention")]
    pub desired_retention: f64,
}

impl ParameterSet {
    pub fn new(weights: &[f64], target_retention: f64) -> Result<Self, ParameterError> {
        let w: [f64; WEIGHT_COUNT] = weights
            .try_into()
            .map_err(|_| ParameterError::InvalidWeightCount {
                expected: WEIGHT_COUNT,
                actual: weights.len(),
            })?;

        // JSON has no encoding for NaN or infinities
        if let Some((index, &value)) = w.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ParameterError::NonFiniteWeight { index, value });
        }

        // NaN fails the range check as well
        if !(MIN_RETENTION..=MAX_RETENTION).contains(&target_retention) {
            return Err(ParameterError::RetentionOutOfRange(target_retention));
        }

        Ok(Self {
            w,
            target_retention,
        })
    }

    /// Default weights with a custom retention
    pub fn with_retention(target_retention: f64) -> Result<Self, ParameterError> {
        Self::new(&DEFAULT_WEIGHTS, target_retention)
    }

    pub fn weights(&self) -> &[f64; WEIGHT_COUNT] {
        &self.w
    }

    pub fn target_retention(&self) -> f64 {
        self.target_retention
    }

    /// Strict decode: malformed JSON and invariant violations are both errors.
    pub fn from_json(raw: &str) -> Result<Self, ParameterError> {
        let parsed: ParameterSetJson = serde_json::from_str(raw)
            .map_err(|e| ParameterError::MalformedOverride(e.to_string()))?;
        Self::try_from(parsed)
    }

    pub fn to_json(&self) -> String {
        // A struct of plain numbers always serializes
        serde_json::to_string(&ParameterSetJson::from(*self)).unwrap_or_default()
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            w: DEFAULT_WEIGHTS,
            target_retention: DEFAULT_DESIRED_RETENTION,
        }
    }
}

impl TryFrom<ParameterSetJson> for ParameterSet {
    type Error = ParameterError;

    fn try_from(value: ParameterSetJson) -> Result<Self, Self::Error> {
        Self::new(&value.w, value.desired_retention)
    }
}

impl From<ParameterSet> for ParameterSetJson {
    fn from(value: ParameterSet) -> Self {
        Self {
            w: value.w.to_vec(),
            desired_retention: value.target_retention,
        }
    }
}
