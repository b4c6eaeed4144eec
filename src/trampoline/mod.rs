//! Trampoline-based Iterative Matching
//!
//! This module provides the continuation types and the driver loop that
//! evaluate an expression without native recursion. Stack usage stays
//! constant however deeply expressions nest or however often a repetition
//! loops; the pending work lives in a heap-allocated continuation chain.

mod engine;
mod types;

pub use engine::{eval_trampoline, DriveStats, Trampoline};
pub use types::{ContId, Continuation, ContinuationStore, WorkItem};
