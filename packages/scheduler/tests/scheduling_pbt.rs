//! Property-Based Tests for the FSRS engine and urgency classification
//!
//! Invariants:
//! - Retrievability: R(S, S) = 0.9, R(0, S) = 1, strict decay over time
//! - Intervals: >= 1, non-decreasing in stability, non-increasing in retention
//! - Difficulty: always within [1, 10]
//! - Stability: recall never decreases it, lapse keeps it in [0.01, S]
//! - Urgency: thresholds follow whole elapsed days against the interval

use chrono::{Duration, TimeZone, Utc};
use proptest::prelude::*;

use dory_algo::{FsrsEngine, ParameterSet, Rating, MIN_STABILITY};
use dory_scheduler::services::urgency::{classify, ReviewUrgency};
use dory_scheduler::store::{ItemId, Review, ReviewId};

// ============================================================================
// Arbitrary Generators
// ============================================================================

fn arb_stability() -> impl Strategy<Value = f64> {
    0.01f64..=3650.0f64
}

fn arb_difficulty() -> impl Strategy<Value = f64> {
    1.0f64..=10.0f64
}

fn arb_retrievability() -> impl Strategy<Value = f64> {
    0.0f64..=1.0f64
}

fn arb_retention() -> impl Strategy<Value = f64> {
    0.70f64..=0.97f64
}

fn arb_rating() -> impl Strategy<Value = Rating> {
    prop_oneof![
        Just(Rating::Again),
        Just(Rating::Hard),
        Just(Rating::Good),
        Just(Rating::Easy),
    ]
}

fn arb_recall_rating() -> impl Strategy<Value = Rating> {
    prop_oneof![Just(Rating::Hard), Just(Rating::Good), Just(Rating::Easy)]
}

proptest! {
    /// PBT-1: R(S, S) is the 0.9 reference point
    #[test]
    fn retrievability_at_stability_is_reference(s in arb_stability()) {
        let r = FsrsEngine::default().retrievability(s, s);
        prop_assert!((r - 0.9).abs() < 1e-6);
    }

    /// PBT-2: boundary values of the forgetting curve
    #[test]
    fn retrievability_boundaries(s in arb_stability(), t in 0.0f64..1000.0) {
        let engine = FsrsEngine::default();
        prop_assert_eq!(engine.retrievability(0.0, s), 1.0);
        prop_assert_eq!(engine.retrievability(t, 0.0), 0.0);
    }

    /// PBT-3: strict decay over time
    #[test]
    fn retrievability_decays(s in arb_stability(), t1 in 0.01f64..500.0, gap in 0.01f64..500.0) {
        let engine = FsrsEngine::default();
        prop_assert!(engine.retrievability(t1, s) > engine.retrievability(t1 + gap, s));
    }

    /// PBT-4: interval monotonic in stability
    #[test]
    fn interval_monotonic_in_stability(
        s in arb_stability(),
        extra in 0.0f64..1000.0,
        retention in arb_retention(),
    ) {
        let engine = FsrsEngine::default();
        let shorter = engine.next_interval_with_retention(s, retention);
        let longer = engine.next_interval_with_retention(s + extra, retention);
        prop_assert!(shorter >= 1);
        prop_assert!(longer >= shorter);
    }

    /// PBT-5: interval monotonic (decreasing) in retention
    #[test]
    fn interval_monotonic_in_retention(
        s in -10.0f64..3650.0,
        low in arb_retention(),
        high in arb_retention(),
    ) {
        let (low, high) = if low <= high { (low, high) } else { (high, low) };
        let engine = FsrsEngine::default();
        let at_low = engine.next_interval_with_retention(s, low);
        let at_high = engine.next_interval_with_retention(s, high);
        prop_assert!(at_high >= 1);
        prop_assert!(at_high <= at_low);
    }

    /// PBT-6: difficulty stays within bounds
    #[test]
    fn difficulty_bounded(d in arb_difficulty(), rating in arb_rating()) {
        let next = FsrsEngine::default().next_difficulty(d, rating);
        prop_assert!((1.0..=10.0).contains(&next));
    }

    /// PBT-7: recall never lowers stability, and Easy >= Good >= Hard
    #[test]
    fn recall_stability_bounds(
        d in arb_difficulty(),
        s in arb_stability(),
        r in arb_retrievability(),
        rating in arb_recall_rating(),
    ) {
        let engine = FsrsEngine::default();
        prop_assert!(engine.stability_after_recall(d, s, r, rating) >= s);

        let hard = engine.stability_after_recall(d, s, r, Rating::Hard);
        let good = engine.stability_after_recall(d, s, r, Rating::Good);
        let easy = engine.stability_after_recall(d, s, r, Rating::Easy);
        prop_assert!(easy >= good);
        prop_assert!(good >= hard);
    }

    /// PBT-8: lapse stability in [0.01, S]
    #[test]
    fn lapse_stability_bounds(d in arb_difficulty(), s in arb_stability(), r in arb_retrievability()) {
        let next = FsrsEngine::default().stability_after_lapse(d, s, r);
        prop_assert!(next <= s.max(MIN_STABILITY));
        prop_assert!(next >= MIN_STABILITY);
    }

    /// PBT-9: first review yields the closed-form initial state
    #[test]
    fn first_review_initial_state(rating in arb_rating(), retention in arb_retention()) {
        let engine = FsrsEngine::new(ParameterSet::with_retention(retention).unwrap());
        let state = engine.review(None, 0.0, rating, retention);
        prop_assert_eq!(state.stability, engine.initial_stability(rating));
        prop_assert_eq!(state.difficulty, engine.initial_difficulty(rating));
        prop_assert_eq!(state.interval, engine.next_interval(state.stability));
    }

    /// PBT-10: urgency follows whole elapsed days against the interval
    #[test]
    fn urgency_thresholds(
        s in arb_stability(),
        retention in arb_retention(),
        elapsed_minutes in 0i64..(400 * 24 * 60),
    ) {
        let reviewed_at = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        let review = Review {
            id: ReviewId(1),
            item_id: ItemId(1),
            rating: Rating::Good,
            notes: None,
            reviewed_at,
            stability_after: s,
            difficulty_after: 5.0,
        };
        let params = ParameterSet::default();
        let now = reviewed_at + Duration::minutes(elapsed_minutes);

        let interval = i64::from(FsrsEngine::default().next_interval_with_retention(s, retention));
        let days = elapsed_minutes / (24 * 60);
        let expected = if days > interval {
            ReviewUrgency::Overdue
        } else if days == interval {
            ReviewUrgency::DueToday
        } else {
            ReviewUrgency::NotDue
        };
        prop_assert_eq!(classify(Some(&review), &params, retention, now), expected);
    }
}

#[test]
fn repeated_again_converges_below_ceiling() {
    let engine = FsrsEngine::default();
    let mut d = 5.0;
    for _ in 0..100 {
        d = engine.next_difficulty(d, Rating::Again);
    }
    assert!(d < 10.0);
    assert!((engine.next_difficulty(d, Rating::Again) - d).abs() < 1e-3);
}
