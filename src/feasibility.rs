//! Feasibility predicates.
//!
//! Decides whether a session may occupy a `(day, period)` slot given the
//! entries already placed. The randomized scheduler and the manual gate
//! call the same functions; neither has a private variant.
//!
//! A slot is feasible for an assignment iff:
//! - every class of the assignment is free there, and
//! - every teacher of the assignment is available there (matrix allows
//!   it and no other placed entry at the slot involves the teacher).
//!
//! # Dangling references
//! An unknown teacher id has no matrix, so only occupancy applies to it.
//! Two assignments naming the same unknown id still exclude each other.
//! Entries whose assignment is unknown occupy nobody. [`resolve`] decides
//! whether an assignment can be placed at all; the slot checks always run
//! over the assignment's full id lists.

use crate::models::{Assignment, SchoolClass, ScheduleEntry, Teacher};

/// Whether `teacher_id` can teach at `(day, period)`.
///
/// Returns `false` if the teacher's matrix blocks the slot, or if any
/// entry at the slot belongs to an assignment that includes the teacher.
pub fn is_teacher_available(
    teacher_id: &str,
    day: usize,
    period: usize,
    schedule: &[ScheduleEntry],
    teachers: &[Teacher],
    assignments: &[Assignment],
) -> bool {
    if let Some(teacher) = teachers.iter().find(|t| t.id == teacher_id) {
        if !teacher.is_available_at(day, period) {
            return false;
        }
    }

    !schedule.iter().any(|entry| {
        entry.is_at(day, period)
            && find_assignment(assignments, &entry.assignment_id)
                .is_some_and(|a| a.involves_teacher(teacher_id))
    })
}

/// Whether `class_id` has no session at `(day, period)`.
pub fn is_class_free(
    class_id: &str,
    day: usize,
    period: usize,
    schedule: &[ScheduleEntry],
    assignments: &[Assignment],
) -> bool {
    !schedule.iter().any(|entry| {
        entry.is_at(day, period)
            && find_assignment(assignments, &entry.assignment_id)
                .is_some_and(|a| a.involves_class(class_id))
    })
}

/// The first reason the slot is infeasible for `assignment`, if any.
///
/// Teachers are checked before classes. Every listed id is checked,
/// known or not.
pub fn first_conflict<'a>(
    assignment: &'a Assignment,
    day: usize,
    period: usize,
    schedule: &[ScheduleEntry],
    teachers: &[Teacher],
    assignments: &[Assignment],
) -> Option<Blocker<'a>> {
    if let Some(t) = assignment
        .teacher_ids
        .iter()
        .find(|t| !is_teacher_available(t, day, period, schedule, teachers, assignments))
    {
        return Some(Blocker::Teacher(t));
    }
    assignment
        .class_ids
        .iter()
        .find(|c| !is_class_free(c, day, period, schedule, assignments))
        .map(|c| Blocker::Class(c))
}

/// Whether every class is free and every teacher available at the slot.
pub fn is_slot_feasible(
    assignment: &Assignment,
    day: usize,
    period: usize,
    schedule: &[ScheduleEntry],
    teachers: &[Teacher],
    assignments: &[Assignment],
) -> bool {
    first_conflict(assignment, day, period, schedule, teachers, assignments).is_none()
}

/// What blocks a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blocker<'a> {
    /// A teacher is blocked or busy.
    Teacher(&'a str),
    /// A class is busy.
    Class(&'a str),
}

/// An assignment with dangling class and teacher ids filtered out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAssignment<'a> {
    /// Assignment id.
    pub id: &'a str,
    /// Class ids that exist in the class list.
    pub class_ids: Vec<&'a str>,
    /// Teacher ids that exist in the teacher list.
    pub teacher_ids: Vec<&'a str>,
}

impl ResolvedAssignment<'_> {
    /// Whether at least one class and one teacher survived resolution.
    pub fn is_placeable(&self) -> bool {
        !self.class_ids.is_empty() && !self.teacher_ids.is_empty()
    }
}

/// Filters an assignment's class and teacher ids against the entity lists.
pub fn resolve<'a>(
    assignment: &'a Assignment,
    classes: &[SchoolClass],
    teachers: &[Teacher],
) -> ResolvedAssignment<'a> {
    ResolvedAssignment {
        id: &assignment.id,
        class_ids: assignment
            .class_ids
            .iter()
            .filter(|c| classes.iter().any(|k| &k.id == *c))
            .map(String::as_str)
            .collect(),
        teacher_ids: assignment
            .teacher_ids
            .iter()
            .filter(|t| teachers.iter().any(|k| &k.id == *t))
            .map(String::as_str)
            .collect(),
    }
}

#[inline]
fn find_assignment<'a>(assignments: &'a [Assignment], id: &str) -> Option<&'a Assignment> {
    assignments.iter().find(|a| a.id == id)
}
