//! Common Types and Constants
//!
//! Shared data structures used by the parameter and scheduling modules.

use serde::{Deserialize, Serialize};

// ==================== Constants ====================

/// Number of FSRS-4.5 model weights (w0..w16)
pub const WEIGHT_COUNT: usize = 17;

/// Forgetting curve decay exponent
pub const DECAY: f64 = -0.5;

/// Forgetting curve factor, chosen so that R(S, S) = 0.9
pub const FACTOR: f64 = 19.0 / 81.0;

/// Lowest accepted target retention (inclusive)
pub const MIN_RETENTION: f64 = 0.70;

/// Highest accepted target retention (inclusive)
pub const MAX_RETENTION: f64 = 0.97;

/// Built-in target retention
pub const DEFAULT_DESIRED_RETENTION: f64 = 0.9;

/// Stability floor (days)
pub const MIN_STABILITY: f64 = 0.01;

/// Difficulty lower bound
pub const MIN_DIFFICULTY: f64 = 1.0;

/// Difficulty upper bound
pub const MAX_DIFFICULTY: f64 = 10.0;

/// Published FSRS-4.5 default weights
pub const DEFAULT_WEIGHTS: [f64; WEIGHT_COUNT] = [
    0.4872,  // w0:  initial stability for Again
    1.4003,  // w1:  initial stability for Hard
    3.7145,  // w2:  initial stability for Good
    13.8206, // w3:  initial stability for Easy
    5.1618,  // w4:  initial difficulty base
    1.2298,  // w5:  initial difficulty scaling
    0.8975,  // w6:  difficulty update rate
    0.031,   // w7:  mean reversion weight
    1.6474,  // w8:  stability increase base
    0.1367,  // w9:  stability-dependent factor
    1.0461,  // w10: retrievability-dependent factor
    2.1072,  // w11: post-lapse stability base
    0.0793,  // w12: difficulty factor for lapse
    0.3246,  // w13: stability factor for lapse
    1.587,   // w14: retrievability factor for lapse
    0.2272,  // w15: hard penalty
    2.8755,  // w16: easy bonus
];

// ==================== Rating ====================

/// Learner's self-reported recall outcome, ordinal 1..=4
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Rating {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

/// Unknown rating ordinal
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid rating value {0}, expected 1..=4")]
pub struct RatingError(pub i64);

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Ordinal used directly in the model formulas
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: i64) -> Result<Self, RatingError> {
        match value {
            1 => Ok(Self::Again),
            2 => Ok(Self::Hard),
            3 => Ok(Self::Good),
            4 => Ok(Self::Easy),
            other => Err(RatingError(other)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Again => "again",
            Self::Hard => "hard",
            Self::Good => "good",
            Self::Easy => "easy",
        }
    }

    pub(crate) fn grade(self) -> f64 {
        f64::from(self.value())
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_value(i64::from(value))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==================== Scheduling State ====================

/// Memory state produced by a review
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SchedulingState {
    /// Days until predicted recall drops to 0.9
    pub stability: f64,
    /// Item difficulty in [1, 10]
    pub difficulty: f64,
    /// Days until the next review, at least 1
    pub interval: u32,
}
