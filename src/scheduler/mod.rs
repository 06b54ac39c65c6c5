//! Randomized greedy scheduling and timetable metrics.
//!
//! # Algorithm
//!
//! `RandomScheduler` flattens assignments into session instances, shuffles
//! them, and drops each one into the first feasible slot of a freshly
//! shuffled slot list. It is fast and incomplete: a pass may leave sessions
//! unplaced even when a full timetable exists, so callers typically run
//! several passes and keep the best.
//!
//! # Summary
//!
//! `ScheduleSummary` reports placed vs. required sessions, per-teacher load,
//! and remaining quota per assignment.

mod random;
mod summary;

pub use random::{distribute_randomly, DistributionResult, RandomScheduler};
pub use summary::{ScheduleSummary, TeacherLoad};
