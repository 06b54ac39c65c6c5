//! Teacher model.

use serde::{Deserialize, Serialize};

use super::{Availability, Settings};

/// A teacher with a per-slot availability matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teacher {
    /// Unique teacher identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Subject the teacher mainly teaches (display hint only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_subject_id: Option<String>,
    /// Availability matrix, `constraints[day][period]`.
    #[serde(default)]
    pub constraints: Availability,
}

impl Teacher {
    /// Creates a teacher with an empty matrix (every slot reads available).
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            primary_subject_id: None,
            constraints: Availability::default(),
        }
    }

    /// Creates a teacher whose matrix matches `settings`, all available.
    pub fn for_settings(
        id: impl Into<String>,
        name: impl Into<String>,
        settings: &Settings,
    ) -> Self {
        Self::new(id, name).with_constraints(Availability::new(settings.day_count(), settings.periods))
    }

    /// Sets the primary subject.
    pub fn with_primary_subject(mut self, subject_id: impl Into<String>) -> Self {
        self.primary_subject_id = Some(subject_id.into());
        self
    }

    /// Sets the availability matrix.
    pub fn with_constraints(mut self, constraints: Availability) -> Self {
        self.constraints = constraints;
        self
    }

    /// Blocks a single slot.
    pub fn with_blocked(mut self, day: usize, period: usize) -> Self {
        self.constraints.set(day, period, false);
        self
    }

    /// Blocks a whole day.
    pub fn with_blocked_day(mut self, day: usize) -> Self {
        self.constraints.set_day(day, false);
        self
    }

    /// Whether the matrix allows teaching at `(day, period)`.
    ///
    /// Ignores occupancy; see [`crate::feasibility::is_teacher_available`].
    #[inline]
    pub fn is_available_at(&self, day: usize, period: usize) -> bool {
        self.constraints.is_available(day, period)
    }
}
