//! Timetable entity store.
//!
//! Owns settings, entities and the schedule, and keeps them consistent:
//! teacher matrices always match the settings, and deleting an entity
//! cascades to the assignments and entries that depend on it. Scheduling
//! itself stays in [`crate::scheduler`] and [`crate::gate`]; the store only
//! feeds them its lists and commits what they return.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Result, TimetableError};
use crate::gate;
use crate::models::{Assignment, SchoolClass, Schedule, ScheduleEntry, Settings, Subject, Teacher};
use crate::scheduler::{DistributionResult, RandomScheduler, ScheduleSummary};

/// Settings, entities and the current schedule.
///
/// Deserializing goes through [`Timetable::from_parts`], so loaded data is
/// cleaned the same way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "TimetableParts")]
pub struct Timetable {
    settings: Settings,
    teachers: Vec<Teacher>,
    classes: Vec<SchoolClass>,
    subjects: Vec<Subject>,
    assignments: Vec<Assignment>,
    schedule: Schedule,
}

/// Raw wire shape of a [`Timetable`], before cleanup.
#[derive(Default, Deserialize)]
#[serde(default)]
struct TimetableParts {
    settings: Settings,
    teachers: Vec<Teacher>,
    classes: Vec<SchoolClass>,
    subjects: Vec<Subject>,
    assignments: Vec<Assignment>,
    schedule: Schedule,
}

impl From<TimetableParts> for Timetable {
    fn from(parts: TimetableParts) -> Self {
        Self::from_parts(
            parts.settings,
            parts.teachers,
            parts.classes,
            parts.subjects,
            parts.assignments,
            parts.schedule,
        )
    }
}

impl Timetable {
    /// Creates an empty timetable with the given settings.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Assembles a timetable from loaded records.
    ///
    /// Teacher matrices are resized to the settings, assignments with an
    /// empty class or teacher set are dropped, and entries pointing at
    /// unknown assignments or outside the grid are purged.
    pub fn from_parts(
        settings: Settings,
        teachers: Vec<Teacher>,
        classes: Vec<SchoolClass>,
        subjects: Vec<Subject>,
        assignments: Vec<Assignment>,
        schedule: Schedule,
    ) -> Self {
        let mut tt = Self {
            settings,
            teachers,
            classes,
            subjects,
            assignments,
            schedule,
        };
        tt.migrate_matrices();
        tt.assignments.retain(Assignment::is_well_formed);
        tt.purge_dangling_entries();
        tt
    }

    /// Current grid settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// All teachers, in insertion order.
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// All classes.
    pub fn classes(&self) -> &[SchoolClass] {
        &self.classes
    }

    /// All subjects.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// All assignments.
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    /// The committed schedule.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Looks up a teacher by id.
    pub fn teacher(&self, id: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.id == id)
    }

    /// Looks up an assignment by id.
    pub fn assignment(&self, id: &str) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.id == id)
    }

    /// Replaces the settings and migrates every teacher's matrix.
    ///
    /// Entries that fall outside the new grid are removed.
    pub fn update_settings(&mut self, settings: Settings) {
        let reshaped = !self.settings.same_shape(&settings);
        self.settings = settings;
        if reshaped {
            self.migrate_matrices();
            let dropped = self.purge_dangling_entries();
            info!(
                days = self.settings.day_count(),
                periods = self.settings.periods,
                dropped_entries = dropped,
                "timetable grid resized"
            );
        }
    }

    fn migrate_matrices(&mut self) {
        let (days, periods) = (self.settings.day_count(), self.settings.periods);
        for teacher in &mut self.teachers {
            if !teacher.constraints.is_shape(days, periods) {
                teacher.constraints = teacher.constraints.resized(days, periods);
            }
        }
    }

    /// Adds a teacher, sizing its matrix to the current settings.
    pub fn add_teacher(&mut self, mut teacher: Teacher) -> Result<()> {
        if self.teacher(&teacher.id).is_some() {
            return Err(TimetableError::DuplicateId(teacher.id));
        }
        teacher.constraints = teacher
            .constraints
            .resized(self.settings.day_count(), self.settings.periods);
        self.teachers.push(teacher);
        Ok(())
    }

    /// Adds a class.
    pub fn add_class(&mut self, class: SchoolClass) -> Result<()> {
        if self.classes.iter().any(|c| c.id == class.id) {
            return Err(TimetableError::DuplicateId(class.id));
        }
        self.classes.push(class);
        Ok(())
    }

    /// Adds a subject.
    pub fn add_subject(&mut self, subject: Subject) -> Result<()> {
        if self.subjects.iter().any(|s| s.id == subject.id) {
            return Err(TimetableError::DuplicateId(subject.id));
        }
        self.subjects.push(subject);
        Ok(())
    }

    /// Adds an assignment after checking its references.
    pub fn add_assignment(&mut self, assignment: Assignment) -> Result<()> {
        if self.assignment(&assignment.id).is_some() {
            return Err(TimetableError::DuplicateId(assignment.id));
        }
        if assignment.class_ids.is_empty() {
            return Err(TimetableError::EmptyClassSet(assignment.id));
        }
        if assignment.teacher_ids.is_empty() {
            return Err(TimetableError::EmptyTeacherSet(assignment.id));
        }
        if let Some(c) = assignment
            .class_ids
            .iter()
            .find(|c| !self.classes.iter().any(|k| &k.id == *c))
        {
            return Err(TimetableError::UnknownClass(c.clone()));
        }
        if let Some(t) = assignment
            .teacher_ids
            .iter()
            .find(|t| self.teacher(t).is_none())
        {
            return Err(TimetableError::UnknownTeacher(t.clone()));
        }
        if !self.subjects.iter().any(|s| s.id == assignment.subject_id) {
            return Err(TimetableError::UnknownSubject(assignment.subject_id));
        }
        self.assignments.push(assignment);
        Ok(())
    }

    /// Sets one availability cell of a teacher.
    pub fn set_teacher_availability(
        &mut self,
        teacher_id: &str,
        day: usize,
        period: usize,
        available: bool,
    ) -> Result<()> {
        self.check_slot(day, period)?;
        let teacher = self.teacher_mut(teacher_id)?;
        teacher.constraints.set(day, period, available);
        Ok(())
    }

    /// Sets every period of one day for a teacher.
    pub fn set_teacher_day(&mut self, teacher_id: &str, day: usize, available: bool) -> Result<()> {
        if day >= self.settings.day_count() {
            return Err(TimetableError::SlotOutOfRange { day, period: 0 });
        }
        let teacher = self.teacher_mut(teacher_id)?;
        teacher.constraints.set_day(day, available);
        Ok(())
    }

    fn teacher_mut(&mut self, teacher_id: &str) -> Result<&mut Teacher> {
        self.teachers
            .iter_mut()
            .find(|t| t.id == teacher_id)
            .ok_or_else(|| TimetableError::UnknownTeacher(teacher_id.to_string()))
    }

    /// Deletes a teacher together with every assignment it takes part in.
    pub fn remove_teacher(&mut self, teacher_id: &str) -> Result<()> {
        let before = self.teachers.len();
        self.teachers.retain(|t| t.id != teacher_id);
        if self.teachers.len() == before {
            return Err(TimetableError::UnknownTeacher(teacher_id.to_string()));
        }
        self.drop_assignments(|a| a.involves_teacher(teacher_id));
        info!(teacher_id, "teacher removed");
        Ok(())
    }

    /// Deletes a class, detaching it from co-taught assignments.
    ///
    /// Assignments left without any class are deleted.
    pub fn remove_class(&mut self, class_id: &str) -> Result<()> {
        let before = self.classes.len();
        self.classes.retain(|c| c.id != class_id);
        if self.classes.len() == before {
            return Err(TimetableError::UnknownClass(class_id.to_string()));
        }
        for a in &mut self.assignments {
            a.class_ids.retain(|c| c != class_id);
        }
        self.drop_assignments(|a| a.class_ids.is_empty());
        info!(class_id, "class removed");
        Ok(())
    }

    /// Deletes a subject together with its assignments.
    pub fn remove_subject(&mut self, subject_id: &str) -> Result<()> {
        let before = self.subjects.len();
        self.subjects.retain(|s| s.id != subject_id);
        if self.subjects.len() == before {
            return Err(TimetableError::UnknownSubject(subject_id.to_string()));
        }
        self.drop_assignments(|a| a.subject_id == subject_id);
        info!(subject_id, "subject removed");
        Ok(())
    }

    /// Deletes an assignment and its entries.
    pub fn remove_assignment(&mut self, assignment_id: &str) -> Result<()> {
        if self.assignment(assignment_id).is_none() {
            return Err(TimetableError::UnknownAssignment(assignment_id.to_string()));
        }
        self.drop_assignments(|a| a.id == assignment_id);
        Ok(())
    }

    fn drop_assignments(&mut self, mut doomed: impl FnMut(&Assignment) -> bool) {
        let before = self.assignments.len();
        self.assignments.retain(|a| !doomed(a));
        let dropped_entries = self.purge_dangling_entries();
        debug!(
            dropped_assignments = before - self.assignments.len(),
            dropped_entries,
            "cascading delete"
        );
    }

    /// Removes entries whose assignment is unknown or whose slot is off
    /// the grid. Returns the number of entries removed.
    pub fn purge_dangling_entries(&mut self) -> usize {
        let mut removed = self.schedule.retain_known(&self.assignments);
        let settings = &self.settings;
        removed += self
            .schedule
            .retain_slots(|slot| settings.contains(slot.day, slot.period));
        if removed > 0 {
            debug!(removed, "purged dangling schedule entries");
        }
        removed
    }

    /// Places one session after checking the grid and the feasibility gate.
    ///
    /// Returns the committed entry.
    pub fn place_session(&mut self, assignment_id: &str, day: usize, period: usize) -> Result<ScheduleEntry> {
        self.check_slot(day, period)?;
        let entry = gate::try_place(
            assignment_id,
            day,
            period,
            &self.schedule.entries,
            &self.teachers,
            &self.assignments,
            &self.classes,
        )?;
        self.schedule.add_entry(entry.clone());
        Ok(entry)
    }

    /// Removes one placed session.
    pub fn remove_session(&mut self, entry: &ScheduleEntry) -> Result<()> {
        if !self.schedule.contains(entry) {
            return Err(TimetableError::EntryNotFound);
        }
        self.schedule = gate::remove(&self.schedule, entry);
        Ok(())
    }

    /// Moves a placed session to another slot.
    ///
    /// If the new slot is rejected, the session stays where it was.
    pub fn move_session(&mut self, entry: &ScheduleEntry, day: usize, period: usize) -> Result<ScheduleEntry> {
        self.remove_session(entry)?;
        self.place_session(&entry.assignment_id, day, period)
            .inspect_err(|_| self.schedule.add_entry(entry.clone()))
    }

    /// Removes every entry.
    pub fn clear_schedule(&mut self) {
        self.schedule = Schedule::new();
    }

    /// Replaces the schedule with a fresh randomized distribution.
    pub fn distribute(&mut self, scheduler: &RandomScheduler) -> DistributionResult {
        let result = scheduler.distribute(
            &self.assignments,
            &Schedule::new(),
            &self.settings,
            &self.classes,
            &self.teachers,
        );
        self.schedule = result.schedule.clone();
        result
    }

    fn check_slot(&self, day: usize, period: usize) -> Result<()> {
        if self.settings.contains(day, period) {
            Ok(())
        } else {
            Err(TimetableError::SlotOutOfRange { day, period })
        }
    }

    /// `weekly_count` minus placed sessions. Negative when over quota.
    pub fn remaining_quota(&self, assignment_id: &str) -> Option<i64> {
        self.assignment(assignment_id)
            .map(|a| i64::from(a.weekly_count) - self.schedule.count_for(&a.id) as i64)
    }

    /// Assignments that still have sessions to place.
    pub fn pending_assignments(&self) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| self.remaining_quota(&a.id).is_some_and(|r| r > 0))
            .collect()
    }

    /// The entry occupying a class cell.
    pub fn session_at(&self, day: usize, period: usize, class_id: &str) -> Option<&ScheduleEntry> {
        self.schedule
            .entry_for_class(day, period, class_id, &self.assignments)
    }

    /// Summary metrics for the current schedule.
    pub fn summary(&self) -> ScheduleSummary {
        ScheduleSummary::calculate(&self.schedule, &self.assignments, &self.teachers)
    }

    /// Ids referenced by assignments that no longer exist.
    pub fn dangling_references(&self) -> Vec<String> {
        let known: HashSet<&str> = self
            .teachers
            .iter()
            .map(|t| t.id.as_str())
            .chain(self.classes.iter().map(|c| c.id.as_str()))
            .collect();
        let mut missing: Vec<String> = self
            .assignments
            .iter()
            .flat_map(|a| a.teacher_ids.iter().chain(a.class_ids.iter()))
            .filter(|id| !known.contains(id.as_str()))
            .cloned()
            .collect();
        missing.sort();
        missing.dedup();
        missing
    }
}
