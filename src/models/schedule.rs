//! Schedule (solution) model.
//!
//! A schedule is a set of placed session occurrences. Each entry ties one
//! assignment to one `(day, period)` slot.
//!
//! # Invariant
//! For any two entries sharing a slot, their assignments' class sets are
//! disjoint and their teacher sets are disjoint. Nothing bounds the number
//! of entries per assignment against its weekly count.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{Assignment, Slot};

/// One placed session of an assignment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    /// Placed assignment.
    pub assignment_id: String,
    /// Zero-based day index.
    pub day_index: usize,
    /// Zero-based period index.
    pub period_index: usize,
}

impl ScheduleEntry {
    /// Creates an entry.
    pub fn new(assignment_id: impl Into<String>, day_index: usize, period_index: usize) -> Self {
        Self {
            assignment_id: assignment_id.into(),
            day_index,
            period_index,
        }
    }

    /// The slot this entry occupies.
    #[inline]
    pub fn slot(&self) -> Slot {
        Slot::new(self.day_index, self.period_index)
    }

    /// Whether the entry sits at `(day, period)`.
    #[inline]
    pub fn is_at(&self, day: usize, period: usize) -> bool {
        self.day_index == day && self.period_index == period
    }
}

/// A timetable: the list of placed entries.
///
/// Serializes as a bare array of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    /// Placed entries, in placement order.
    pub entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps existing entries.
    pub fn from_entries(entries: Vec<ScheduleEntry>) -> Self {
        Self { entries }
    }

    /// Appends an entry.
    pub fn add_entry(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Removes the first entry equal to `entry`.
    ///
    /// Returns `true` if one was removed.
    pub fn remove_entry(&mut self, entry: &ScheduleEntry) -> bool {
        match self.entries.iter().position(|e| e == entry) {
            Some(idx) => {
                self.entries.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Whether an equal entry is present.
    pub fn contains(&self, entry: &ScheduleEntry) -> bool {
        self.entries.contains(entry)
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries placed at `(day, period)`.
    pub fn entries_at(&self, day: usize, period: usize) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries.iter().filter(move |e| e.is_at(day, period))
    }

    /// The entry occupying `class_id` at `(day, period)`, if any.
    ///
    /// This is the lookup a grid editor performs on a class cell.
    pub fn entry_for_class<'a>(
        &'a self,
        day: usize,
        period: usize,
        class_id: &str,
        assignments: &[Assignment],
    ) -> Option<&'a ScheduleEntry> {
        self.entries_at(day, period).find(|e| {
            assignments
                .iter()
                .find(|a| a.id == e.assignment_id)
                .is_some_and(|a| a.involves_class(class_id))
        })
    }

    /// Number of placed sessions of an assignment.
    pub fn count_for(&self, assignment_id: &str) -> usize {
        self.entries
            .iter()
            .filter(|e| e.assignment_id == assignment_id)
            .count()
    }

    /// Drops entries whose assignment is not in `assignments`.
    ///
    /// Returns the number of entries removed.
    pub fn retain_known(&mut self, assignments: &[Assignment]) -> usize {
        let known: HashSet<&str> = assignments.iter().map(|a| a.id.as_str()).collect();
        let before = self.entries.len();
        self.entries.retain(|e| known.contains(e.assignment_id.as_str()));
        before - self.entries.len()
    }

    /// Drops entries whose slot fails `keep`.
    ///
    /// Returns the number of entries removed.
    pub fn retain_slots(&mut self, mut keep: impl FnMut(Slot) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| keep(e.slot()));
        before - self.entries.len()
    }

    /// Whether both schedules hold the same entries, ignoring order.
    pub fn set_eq(&self, other: &Self) -> bool {
        let mut a = self.entries.clone();
        let mut b = other.entries.clone();
        a.sort_by(|x, y| (&x.assignment_id, x.slot()).cmp(&(&y.assignment_id, y.slot())));
        b.sort_by(|x, y| (&x.assignment_id, x.slot()).cmp(&(&y.assignment_id, y.slot())));
        a == b
    }
}
