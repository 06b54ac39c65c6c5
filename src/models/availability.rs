//! Teacher availability matrix.
//!
//! One boolean per `(day, period)` cell: `true` = available,
//! `false` = explicitly blocked. The matrix is kept at the dimensions of the
//! current [`Settings`](super::Settings); when those change, the matrix is
//! rebuilt with [`Availability::resized`].
//!
//! # Reading outside the matrix
//! A cell that does not exist reads as available. Blocking is always an
//! explicit act; a missing row never blocks anyone.

use serde::{Deserialize, Serialize};

/// Per-slot availability table (`cells[day][period]`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Availability {
    cells: Vec<Vec<bool>>,
}

impl Availability {
    /// Creates an all-available matrix of `days × periods`.
    pub fn new(days: usize, periods: usize) -> Self {
        Self {
            cells: vec![vec![true; periods]; days],
        }
    }

    /// Wraps raw rows as received from an external editor.
    pub fn from_rows(cells: Vec<Vec<bool>>) -> Self {
        Self { cells }
    }

    /// Raw rows.
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }

    /// `(days, periods)` of the matrix.
    ///
    /// The period count is taken from the first row; ragged matrices are
    /// reported by [`Availability::is_shape`].
    pub fn dimensions(&self) -> (usize, usize) {
        let periods = self.cells.first().map_or(0, Vec::len);
        (self.cells.len(), periods)
    }

    /// Whether every row exists and has exactly `periods` cells.
    pub fn is_shape(&self, days: usize, periods: usize) -> bool {
        self.cells.len() == days && self.cells.iter().all(|row| row.len() == periods)
    }

    /// Whether the teacher may teach at `(day, period)`.
    #[inline]
    pub fn is_available(&self, day: usize, period: usize) -> bool {
        self.cells
            .get(day)
            .and_then(|row| row.get(period))
            .copied()
            .unwrap_or(true)
    }

    /// Sets one cell. Writes outside the matrix are ignored.
    ///
    /// Returns `true` if a cell changed.
    pub fn set(&mut self, day: usize, period: usize, available: bool) -> bool {
        match self.cells.get_mut(day).and_then(|row| row.get_mut(period)) {
            Some(cell) if *cell != available => {
                *cell = available;
                true
            }
            _ => false,
        }
    }

    /// Sets every period of one day.
    pub fn set_day(&mut self, day: usize, available: bool) {
        if let Some(row) = self.cells.get_mut(day) {
            row.iter_mut().for_each(|cell| *cell = available);
        }
    }

    /// Sets every cell.
    pub fn set_all(&mut self, available: bool) {
        for row in &mut self.cells {
            row.iter_mut().for_each(|cell| *cell = available);
        }
    }

    /// Number of blocked cells.
    pub fn blocked_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|&&c| !c).count())
            .sum()
    }

    /// Rebuilds the matrix at new dimensions.
    ///
    /// Cells present in both the old and the new bounds are copied; new
    /// cells default to available; cells outside the new bounds are dropped.
    pub fn resized(&self, days: usize, periods: usize) -> Self {
        let mut next = Self::new(days, periods);
        for (day, row) in self.cells.iter().enumerate().take(days) {
            for (period, &cell) in row.iter().enumerate().take(periods) {
                next.cells[day][period] = cell;
            }
        }
        next
    }
}
