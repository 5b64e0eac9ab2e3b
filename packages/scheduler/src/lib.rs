//! Review scheduling services for Dory.
//!
//! Wires the FSRS engine from `dory-algo` to the outside world: parameter
//! resolution per category, due/overdue classification, and review submission
//! against pluggable stores.

pub mod config;
pub mod logging;
pub mod services;
pub mod store;

pub use dory_algo::{FsrsEngine, ParameterError, ParameterSet, Rating, SchedulingState};
