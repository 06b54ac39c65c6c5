//! Timetable domain models.
//!
//! Plain data plus the invariants that hold between runs. No scheduling
//! logic lives here.
//!
//! # Entities
//!
//! | Type | Meaning |
//! |------|---------|
//! | `Settings` | Days of the week and periods per day |
//! | `Teacher` | Teacher with an availability matrix |
//! | `SchoolClass` | Group of students |
//! | `Subject` | Taught subject (display only) |
//! | `Assignment` | Classes × subject × teachers, N sessions a week |
//! | `Schedule` | Placed `ScheduleEntry` values |

mod assignment;
mod availability;
mod class;
mod schedule;
mod settings;
mod teacher;

pub use assignment::Assignment;
pub use availability::Availability;
pub use class::{SchoolClass, Subject};
pub use schedule::{Schedule, ScheduleEntry};
pub use settings::{Settings, Slot};
pub use teacher::Teacher;
