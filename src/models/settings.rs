//! Global timetable settings.
//!
//! The week is a grid of `days.len()` days by `periods` periods per day.
//! Day order in `days` is meaningful: it defines both display order and
//! the iteration order of the slot universe.
//!
//! Changing the day list or the period count is a structural event:
//! every teacher's availability matrix must be migrated
//! (see [`Availability::resized`](super::Availability::resized)).

use serde::{Deserialize, Serialize};

/// A `(day index, period index)` pair, both zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Slot {
    /// Zero-based day index into [`Settings::days`].
    pub day: usize,
    /// Zero-based period index within the day.
    pub period: usize,
}

impl Slot {
    /// Creates a slot.
    #[inline]
    pub fn new(day: usize, period: usize) -> Self {
        Self { day, period }
    }
}

/// Week layout and display metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Ordered day labels.
    pub days: Vec<String>,
    /// Periods per day.
    pub periods: usize,
    /// School name shown on exported tables.
    #[serde(default)]
    pub school_name: String,
    /// Timetable author shown on exported tables.
    #[serde(default)]
    pub designer_name: String,
}

impl Settings {
    /// Creates settings from day labels and a period count.
    pub fn new<S: Into<String>>(days: impl IntoIterator<Item = S>, periods: usize) -> Self {
        Self {
            days: days.into_iter().map(Into::into).collect(),
            periods,
            school_name: String::new(),
            designer_name: String::new(),
        }
    }

    /// Sets the school name.
    pub fn with_school_name(mut self, name: impl Into<String>) -> Self {
        self.school_name = name.into();
        self
    }

    /// Sets the designer name.
    pub fn with_designer_name(mut self, name: impl Into<String>) -> Self {
        self.designer_name = name.into();
        self
    }

    /// Number of days in the week.
    #[inline]
    pub fn day_count(&self) -> usize {
        self.days.len()
    }

    /// Total number of slots (`days × periods`).
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.days.len() * self.periods
    }

    /// Whether `(day, period)` lies inside the grid.
    #[inline]
    pub fn contains(&self, day: usize, period: usize) -> bool {
        day < self.days.len() && period < self.periods
    }

    /// The full slot universe in row-major (day, then period) order.
    ///
    /// Empty when there are no days or no periods.
    pub fn slots(&self) -> Vec<Slot> {
        (0..self.days.len())
            .flat_map(|day| (0..self.periods).map(move |period| Slot::new(day, period)))
            .collect()
    }

    /// Whether the grid has the same shape as `other`.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.days.len() == other.days.len() && self.periods == other.periods
    }
}

impl Default for Settings {
    /// Sunday through Thursday, seven periods a day.
    fn default() -> Self {
        Self::new(["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday"], 7)
    }
}
