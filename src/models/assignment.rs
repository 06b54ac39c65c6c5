//! Assignment model.
//!
//! An assignment is a recurring teaching requirement: a set of teachers
//! teaches one subject to a set of classes, `weekly_count` times a week.
//! Every session of the assignment occupies all of its classes and all of
//! its teachers at once.
//!
//! # Invariant
//! Neither `class_ids` nor `teacher_ids` may be empty. An assignment whose
//! sets become empty through entity deletion is removed by the store
//! together with its schedule entries.

use serde::{Deserialize, Serialize};

/// A recurring teaching requirement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Unique assignment identifier.
    pub id: String,
    /// Co-taught classes.
    pub class_ids: Vec<String>,
    /// Taught subject.
    pub subject_id: String,
    /// Co-teachers.
    pub teacher_ids: Vec<String>,
    /// Required sessions per week. Zero or negative means no sessions.
    pub weekly_count: i32,
}

impl Assignment {
    /// Creates an assignment with no classes, no teachers and one session.
    pub fn new(id: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class_ids: Vec::new(),
            subject_id: subject_id.into(),
            teacher_ids: Vec::new(),
            weekly_count: 1,
        }
    }

    /// Adds a class. Duplicates are ignored.
    pub fn with_class(mut self, class_id: impl Into<String>) -> Self {
        let class_id = class_id.into();
        if !self.class_ids.contains(&class_id) {
            self.class_ids.push(class_id);
        }
        self
    }

    /// Adds a teacher. Duplicates are ignored.
    pub fn with_teacher(mut self, teacher_id: impl Into<String>) -> Self {
        let teacher_id = teacher_id.into();
        if !self.teacher_ids.contains(&teacher_id) {
            self.teacher_ids.push(teacher_id);
        }
        self
    }

    /// Sets the weekly session count.
    pub fn with_weekly_count(mut self, weekly_count: i32) -> Self {
        self.weekly_count = weekly_count;
        self
    }

    /// Number of session instances this assignment contributes to a run.
    #[inline]
    pub fn session_count(&self) -> usize {
        usize::try_from(self.weekly_count).unwrap_or(0)
    }

    /// Whether the given teacher takes part.
    pub fn involves_teacher(&self, teacher_id: &str) -> bool {
        self.teacher_ids.iter().any(|t| t == teacher_id)
    }

    /// Whether the given class attends.
    pub fn involves_class(&self, class_id: &str) -> bool {
        self.class_ids.iter().any(|c| c == class_id)
    }

    /// Whether the two assignments have a class in common.
    pub fn shares_class_with(&self, other: &Self) -> bool {
        self.class_ids.iter().any(|c| other.involves_class(c))
    }

    /// Whether the two assignments have a teacher in common.
    pub fn shares_teacher_with(&self, other: &Self) -> bool {
        self.teacher_ids.iter().any(|t| other.involves_teacher(t))
    }

    /// Whether both sets are non-empty.
    pub fn is_well_formed(&self) -> bool {
        !self.class_ids.is_empty() && !self.teacher_ids.is_empty()
    }
}
