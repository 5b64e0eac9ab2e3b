//! FSRS-4.5 Memory Model
//!
//! Core theory:
//! - Each item carries a stability S (days until recall probability drops to 0.9)
//!   and a difficulty D in [1, 10]
//! - Recall probability decays along a power forgetting curve
//! - Each review updates S and D from the learner's rating, and the next
//!   interval is the time at which recall probability reaches the target retention
//!
//! Mathematical formulas:
//! - Retrievability: R(t, S) = (1 + FACTOR * t / S) ^ DECAY
//! - Interval: I(r, S) = (S / FACTOR) * (r ^ (1 / DECAY) - 1)
//! - Initial stability: S0(G) = w[G - 1]
//! - Initial difficulty: D0(G) = w4 - exp(w5 * (G - 1)) + 1
//! - Difficulty update: D'' = w7 * D0(Good) + (1 - w7) * (D + ΔD * (10 - D) / 9),
//!   with ΔD = -w6 * (G - 3)
//! - Recall stability: S' = S * (e^w8 * (11 - D) * S^-w9 * (e^(w10 * (1 - R)) - 1) * penalty * bonus + 1)
//! - Lapse stability: S' = w11 * D^-w12 * ((S + 1)^w13 - 1) * e^(w14 * (1 - R))
//!
//! References:
//! - https://github.com/open-spaced-repetition/fsrs4anki/wiki/The-Algorithm

use rayon::prelude::*;

use crate::params::ParameterSet;
use crate::types::{
    Rating, SchedulingState, DECAY, FACTOR, MAX_DIFFICULTY, MIN_DIFFICULTY, MIN_STABILITY,
};

// ==================== Engine ====================

/// Pure FSRS-4.5 scheduler bound to one parameter set
///
/// Holds no mutable state; share freely across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FsrsEngine {
    params: ParameterSet,
}

impl FsrsEngine {
    pub fn new(params: ParameterSet) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ParameterSet {
        &self.params
    }

    fn w(&self, index: usize) -> f64 {
        self.params.weights()[index]
    }

    // ==================== Forgetting Curve ====================

    /// Predicted recall probability after `elapsed_days` at the given stability
    pub fn retrievability(&self, elapsed_days: f64, stability: f64) -> f64 {
        retrievability(elapsed_days, stability)
    }

    /// Interval at the parameter set's own target retention
    pub fn next_interval(&self, stability: f64) -> u32 {
        next_interval(stability, self.params.target_retention())
    }

    /// Interval at an explicit target retention
    pub fn next_interval_with_retention(&self, stability: f64, retention: f64) -> u32 {
        next_interval(stability, retention)
    }

    // ==================== First Review ====================

    pub fn initial_stability(&self, rating: Rating) -> f64 {
        self.w(usize::from(rating.value()) - 1).max(MIN_STABILITY)
    }

    pub fn initial_difficulty(&self, rating: Rating) -> f64 {
        clamp_difficulty(self.raw_initial_difficulty(rating))
    }

    /// D0 before clamping; the mean-reversion target uses the unclamped value
    fn raw_initial_difficulty(&self, rating: Rating) -> f64 {
        self.w(4) - (self.w(5) * (rating.grade() - 1.0)).exp() + 1.0
    }

    // ==================== Subsequent Reviews ====================

    pub fn next_difficulty(&self, current_difficulty: f64, rating: Rating) -> f64 {
        let delta = -self.w(6) * (rating.grade() - 3.0);
        let damped = current_difficulty + delta * (MAX_DIFFICULTY - current_difficulty) / 9.0;
        let reverted =
            self.w(7) * self.raw_initial_difficulty(Rating::Good) + (1.0 - self.w(7)) * damped;
        clamp_difficulty(reverted)
    }

    /// Stability after a successful recall (Hard, Good or Easy); never below `stability`
    pub fn stability_after_recall(
        &self,
        difficulty: f64,
        stability: f64,
        retrievability: f64,
        rating: Rating,
    ) -> f64 {
        let hard_penalty = if rating == Rating::Hard { self.w(15) } else { 1.0 };
        let easy_bonus = if rating == Rating::Easy { self.w(16) } else { 1.0 };

        let increase = self.w(8).exp()
            * (11.0 - difficulty)
            * stability.powf(-self.w(9))
            * ((self.w(10) * (1.0 - retrievability)).exp() - 1.0)
            * hard_penalty
            * easy_bonus;

        let new_stability = stability * (increase + 1.0);
        // f64::max ignores a NaN operand
        stability.max(new_stability)
    }

    /// Stability after a lapse (Again); in [0.01, stability]
    pub fn stability_after_lapse(
        &self,
        difficulty: f64,
        stability: f64,
        retrievability: f64,
    ) -> f64 {
        let new_stability = self.w(11)
            * difficulty.powf(-self.w(12))
            * ((stability + 1.0).powf(self.w(13)) - 1.0)
            * (self.w(14) * (1.0 - retrievability)).exp();

        new_stability.min(stability).max(MIN_STABILITY)
    }

    pub fn next_stability(
        &self,
        difficulty: f64,
        stability: f64,
        retrievability: f64,
        rating: Rating,
    ) -> f64 {
        match rating {
            Rating::Again => self.stability_after_lapse(difficulty, stability, retrievability),
            _ => self.stability_after_recall(difficulty, stability, retrievability, rating),
        }
    }

    // ==================== Review Transition ====================

    /// Process one review
    ///
    /// `prior` is `None` for an item that was never reviewed. `elapsed_days` is
    /// the time since the prior review and must already be clamped to >= 0.
    pub fn review(
        &self,
        prior: Option<&SchedulingState>,
        elapsed_days: f64,
        rating: Rating,
        retention: f64,
    ) -> SchedulingState {
        let Some(prior) = prior else {
            let stability = self.initial_stability(rating);
            return SchedulingState {
                stability,
                difficulty: self.initial_difficulty(rating),
                interval: next_interval(stability, retention),
            };
        };

        let r = retrievability(elapsed_days, prior.stability);
        let difficulty = self.next_difficulty(prior.difficulty, rating);
        let stability = self.next_stability(prior.difficulty, prior.stability, r, rating);

        SchedulingState {
            stability,
            difficulty,
            interval: next_interval(stability, retention),
        }
    }

    // ==================== Batch Operations ====================

    /// Batch retrievability for `(elapsed_days, stability)` pairs using Rayon
    pub fn batch_retrievability(&self, inputs: &[(f64, f64)]) -> Vec<f64> {
        inputs
            .par_iter()
            .map(|&(elapsed_days, stability)| retrievability(elapsed_days, stability))
            .collect()
    }

    /// Batch intervals for many stabilities at one retention using Rayon
    pub fn batch_next_intervals(&self, stabilities: &[f64], retention: f64) -> Vec<u32> {
        stabilities
            .par_iter()
            .map(|&stability| next_interval(stability, retention))
            .collect()
    }
}

// ==================== Free Functions ====================

/// R(t, S); 0 for non-positive stability, 1 for non-positive elapsed time
pub fn retrievability(elapsed_days: f64, stability: f64) -> f64 {
    if stability <= 0.0 {
        return 0.0;
    }
    if elapsed_days <= 0.0 {
        return 1.0;
    }
    (1.0 + FACTOR * elapsed_days / stability).powf(DECAY)
}

/// Whole days until recall probability reaches `retention`, at least 1
pub fn next_interval(stability: f64, retention: f64) -> u32 {
    if stability <= 0.0 {
        return 1;
    }
    let interval = (stability / FACTOR) * (retention.powf(1.0 / DECAY) - 1.0);
    // float-to-int casts saturate and map NaN to 0
    (interval.round() as u32).max(1)
}

fn clamp_difficulty(difficulty: f64) -> f64 {
    difficulty.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}
