//! # dory-algo - spaced-repetition core algorithms
//!
//! Pure Rust implementation of the scheduling model used by Dory:
//!
//! - **FSRS-4.5 Memory Model** - retrievability, stability, difficulty, intervals
//! - **Parameter Sets** - validated weight bundles with a target retention
//!
//! ## Design
//!
//! - **Pure** - no I/O, no logging, no shared mutable state
//! - **Validated** - parameter invariants are enforced at construction
//! - **Parallel** - batch evaluation via Rayon
//!
//! ## Modules
//!
//! - [`fsrs`] - FSRS-4.5 engine (review transitions, forgetting curve)
//! - [`params`] - parameter sets and their storage format
//! - [`types`] - ratings, scheduling state and model constants
//!
//! ## Example
//!
//! ```rust
//! use dory_algo::{FsrsEngine, ParameterSet, Rating};
//!
//! let engine = FsrsEngine::new(ParameterSet::default());
//! let first = engine.review(None, 0.0, Rating::Good, 0.9);
//! let second = engine.review(Some(&first), f64::from(first.interval), Rating::Good, 0.9);
//! assert!(second.stability > first.stability);
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod fsrs;
pub mod params;
pub mod types;

// ============================================================================
// Re-exports
// ============================================================================

pub use types::*;

pub use fsrs::FsrsEngine;

pub use params::{ParameterError, ParameterSet, ParameterSetJson};
