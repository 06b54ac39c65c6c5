//! Manual placement gate.
//!
//! Validates a single placement proposed by an interactive editor. The gate
//! decides; it never mutates. Committing the returned entry (and persisting
//! it) is the caller's job.
//!
//! # States
//! A session is either absent or placed. `try_place` gates absent → placed
//! on feasibility; `remove` takes placed → absent unconditionally. Moving a
//! session is remove followed by place.
//!
//! # Quota
//! The gate does not compare the assignment's placed count against its
//! weekly count. Callers that want a hard cap check
//! [`Schedule::count_for`] themselves.

use crate::error::ConflictReason;
use crate::feasibility::{first_conflict, resolve, Blocker};
use crate::models::{Assignment, SchoolClass, Schedule, ScheduleEntry, Teacher};

/// Checks whether `assignment_id` may be placed at `(day, period)`.
///
/// Teachers are checked first, then classes. On success returns the entry
/// to append.
///
/// # Errors
/// - [`ConflictReason::UnknownAssignment`] if the id is not in `assignments`
/// - [`ConflictReason::Unresolvable`] if no known class or teacher remains
/// - [`ConflictReason::TeacherUnavailable`] naming the first blocked teacher
/// - [`ConflictReason::ClassBusy`] naming the first busy class
pub fn try_place(
    assignment_id: &str,
    day: usize,
    period: usize,
    schedule: &[ScheduleEntry],
    teachers: &[Teacher],
    assignments: &[Assignment],
    classes: &[SchoolClass],
) -> Result<ScheduleEntry, ConflictReason> {
    let assignment = assignments
        .iter()
        .find(|a| a.id == assignment_id)
        .ok_or_else(|| ConflictReason::UnknownAssignment(assignment_id.to_string()))?;

    let resolved = resolve(assignment, classes, teachers);
    if !resolved.is_placeable() {
        return Err(ConflictReason::Unresolvable(assignment.id.clone()));
    }

    match first_conflict(assignment, day, period, schedule, teachers, assignments) {
        Some(Blocker::Teacher(id)) => Err(ConflictReason::TeacherUnavailable(id.to_string())),
        Some(Blocker::Class(id)) => Err(ConflictReason::ClassBusy(id.to_string())),
        None => Ok(ScheduleEntry::new(&assignment.id, day, period)),
    }
}

/// Returns a copy of `schedule` without the first entry equal to `entry`.
///
/// Removing an entry that is not present returns an unchanged copy.
pub fn remove(schedule: &Schedule, entry: &ScheduleEntry) -> Schedule {
    let mut next = schedule.clone();
    next.remove_entry(entry);
    next
}
