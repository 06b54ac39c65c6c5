//! Weekly school timetable engine.
//!
//! Places recurring teaching sessions (teachers teaching a subject to one
//! or more classes, N times a week) into `(day, period)` slots, honoring
//! per-teacher availability and the rule that a class or a teacher holds
//! at most one session per slot.
//!
//! # Modules
//!
//! - **`models`**: Domain types — `Settings`, `Teacher`, `Availability`,
//!   `SchoolClass`, `Subject`, `Assignment`, `Schedule`, `ScheduleEntry`
//! - **`feasibility`**: Slot predicates shared by every placement path
//! - **`scheduler`**: Randomized greedy distribution and summary metrics
//! - **`gate`**: Single-placement checks for interactive editors
//! - **`store`**: `Timetable`, an owned entity store with cascading deletes
//! - **`validation`**: Input integrity checks (duplicate IDs, dangling refs)
//! - **`error`**: `ConflictReason` and `TimetableError`
//!
//! # Architecture
//!
//! Entity lists and the schedule are plain data handed to pure functions.
//! Rendering, persistence and export are left to the host, which supplies
//! the records and consumes the resulting schedule. The library emits
//! `tracing` events and never installs a subscriber.

pub mod error;
pub mod feasibility;
pub mod gate;
pub mod models;
pub mod scheduler;
pub mod store;
pub mod validation;

pub use error::{ConflictReason, TimetableError};
pub use store::Timetable;
