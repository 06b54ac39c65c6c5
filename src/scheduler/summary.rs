//! Timetable summary metrics.
//!
//! Computes the figures an editor shows next to the grid.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Placed sessions | Entries whose assignment is known |
//! | Required sessions | Sum of `session_count()` over assignments |
//! | Fill rate | placed / required (1.0 when nothing is required) |
//! | Teacher load | Placed sessions each teacher takes part in |
//! | Remaining quota | `weekly_count - placed` per assignment, may be negative |

use std::collections::HashMap;

use serde::Serialize;

use crate::models::{Assignment, Schedule, Teacher};

/// Sessions taught by one teacher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherLoad {
    /// Teacher id.
    pub teacher_id: String,
    /// Placed sessions the teacher takes part in.
    pub sessions: usize,
}

/// Schedule summary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSummary {
    /// Entries that reference a known assignment.
    pub placed_sessions: usize,
    /// Sessions the assignments ask for.
    pub required_sessions: usize,
    /// `placed / required`.
    pub fill_rate: f64,
    /// One row per teacher, in teacher-list order.
    pub teacher_load: Vec<TeacherLoad>,
    /// Remaining quota per assignment id.
    pub remaining_by_assignment: HashMap<String, i64>,
}

impl ScheduleSummary {
    /// Computes the summary.
    ///
    /// Entries pointing at unknown assignments are ignored.
    pub fn calculate(schedule: &Schedule, assignments: &[Assignment], teachers: &[Teacher]) -> Self {
        let by_id: HashMap<&str, &Assignment> =
            assignments.iter().map(|a| (a.id.as_str(), a)).collect();

        let mut placed_by_assignment: HashMap<&str, usize> = HashMap::new();
        let mut load: HashMap<&str, usize> = HashMap::new();
        let mut placed_sessions = 0;

        for entry in &schedule.entries {
            let Some(assignment) = by_id.get(entry.assignment_id.as_str()) else {
                continue;
            };
            placed_sessions += 1;
            *placed_by_assignment.entry(&assignment.id).or_insert(0) += 1;
            for tid in &assignment.teacher_ids {
                *load.entry(tid.as_str()).or_insert(0) += 1;
            }
        }

        let required_sessions: usize = assignments.iter().map(Assignment::session_count).sum();

        let fill_rate = if required_sessions == 0 {
            1.0
        } else {
            placed_sessions as f64 / required_sessions as f64
        };

        let teacher_load = teachers
            .iter()
            .map(|t| TeacherLoad {
                teacher_id: t.id.clone(),
                sessions: load.get(t.id.as_str()).copied().unwrap_or(0),
            })
            .collect();

        let remaining_by_assignment = assignments
            .iter()
            .map(|a| {
                let placed = placed_by_assignment.get(a.id.as_str()).copied().unwrap_or(0);
                (a.id.clone(), i64::from(a.weekly_count) - placed as i64)
            })
            .collect();

        Self {
            placed_sessions,
            required_sessions,
            fill_rate,
            teacher_load,
            remaining_by_assignment,
        }
    }

    /// Whether every required session is placed.
    pub fn is_complete(&self) -> bool {
        self.placed_sessions >= self.required_sessions
    }

    /// Sessions of one teacher (0 for unknown teachers).
    pub fn load_of(&self, teacher_id: &str) -> usize {
        self.teacher_load
            .iter()
            .find(|l| l.teacher_id == teacher_id)
            .map(|l| l.sessions)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleEntry;

    fn assignments() -> Vec<Assignment> {
        vec![
            Assignment::new("A1", "S").with_class("C1").with_teacher("T1").with_weekly_count(3),
            Assignment::new("A2", "S")
                .with_class("C2")
                .with_teacher("T1")
                .with_teacher("T2")
                .with_weekly_count(1),
        ]
    }

    fn teachers() -> Vec<Teacher> {
        vec![
            Teacher::new("T1", "Ada"),
            Teacher::new("T2", "Bo"),
            Teacher::new("T3", "Cy"),
        ]
    }

    #[test]
    fn test_summary_basic() {
        let schedule = Schedule::from_entries(vec![
            ScheduleEntry::new("A1", 0, 0),
            ScheduleEntry::new("A2", 0, 1),
        ]);
        let s = ScheduleSummary::calculate(&schedule, &assignments(), &teachers());
        assert_eq!(s.placed_sessions, 2);
        assert_eq!(s.required_sessions, 4);
        assert!((s.fill_rate - 0.5).abs() < 1e-10);
        assert_eq!(s.load_of("T1"), 2);
        assert_eq!(s.load_of("T2"), 1);
        assert_eq!(s.load_of("T3"), 0);
        assert_eq!(s.teacher_load.len(), 3);
        assert_eq!(s.remaining_by_assignment["A1"], 2);
        assert_eq!(s.remaining_by_assignment["A2"], 0);
        assert!(!s.is_complete());
    }

    #[test]
    fn test_summary_over_quota_goes_negative() {
        let schedule = Schedule::from_entries(vec![
            ScheduleEntry::new("A2", 0, 0),
            ScheduleEntry::new("A2", 0, 1),
        ]);
        let s = ScheduleSummary::calculate(&schedule, &assignments(), &teachers());
        assert_eq!(s.remaining_by_assignment["A2"], -1);
    }

    #[test]
    fn test_summary_ignores_dangling_entries() {
        let schedule = Schedule::from_entries(vec![ScheduleEntry::new("GONE", 0, 0)]);
        let s = ScheduleSummary::calculate(&schedule, &assignments(), &teachers());
        assert_eq!(s.placed_sessions, 0);
        assert_eq!(s.load_of("T1"), 0);
    }

    #[test]
    fn test_summary_empty() {
        let s = ScheduleSummary::calculate(&Schedule::new(), &[], &[]);
        assert_eq!(s.required_sessions, 0);
        assert!((s.fill_rate - 1.0).abs() < 1e-10);
        assert!(s.is_complete());
    }
}
