//! Randomized greedy timetable scheduler.
//!
//! # Algorithm
//!
//! 1. Flatten every assignment into `weekly_count` session instances.
//! 2. Shuffle the instances; this is the placement order.
//! 3. Build the slot universe: every `(day, period)` of the settings.
//! 4. Start from a copy of the caller's schedule (usually empty).
//! 5. For each instance, reshuffle the slots and place it in the first slot
//!    where every class is free and every teacher is available. If no slot
//!    qualifies, the instance is recorded as unplaced. There is no
//!    backtracking and no retry inside a pass.
//!
//! A single pass may leave instances unplaced even when a complete
//! placement exists. Running several independent passes
//! ([`RandomScheduler::with_attempts`]) and keeping the best one is the
//! intended remedy.
//!
//! # Complexity
//! O(i * s * e) per pass where i=instances, s=slots, e=placed entries.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::feasibility::{is_slot_feasible, resolve, ResolvedAssignment};
use crate::models::{Assignment, SchoolClass, Schedule, ScheduleEntry, Settings, Teacher};

/// Outcome of a scheduling run.
///
/// Unplaced instances are a normal outcome, reported here rather than as
/// an error. The schedule is usable either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionResult {
    /// Resulting schedule, seed entries included.
    pub schedule: Schedule,
    /// Instances placed during this run.
    pub placed_count: usize,
    /// Instances that found no feasible slot.
    pub unplaced_count: usize,
    /// Assignment id of every unplaced instance. An assignment appears once
    /// per failed instance.
    pub unplaced_assignments: Vec<String>,
}

impl DistributionResult {
    /// Whether every instance was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced_count == 0
    }

    /// Total instances considered (`placed + unplaced`).
    pub fn instance_count(&self) -> usize {
        self.placed_count + self.unplaced_count
    }
}

/// Randomized greedy scheduler.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Assignment, SchoolClass, Schedule, Settings, Teacher};
/// use u_timetable::scheduler::RandomScheduler;
///
/// let settings = Settings::new(["Mon"], 2);
/// let classes = vec![SchoolClass::new("C1", "1A")];
/// let teachers = vec![Teacher::for_settings("T1", "Ada", &settings)];
/// let assignments = vec![
///     Assignment::new("A1", "MATH").with_class("C1").with_teacher("T1").with_weekly_count(2),
/// ];
///
/// let result = RandomScheduler::new().with_seed(7).distribute(
///     &assignments,
///     &Schedule::new(),
///     &settings,
///     &classes,
///     &teachers,
/// );
/// assert_eq!(result.placed_count, 2);
/// assert!(result.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct RandomScheduler {
    seed: Option<u64>,
    attempts: usize,
}

impl RandomScheduler {
    /// Creates a single-attempt scheduler with a fresh random source per run.
    pub fn new() -> Self {
        Self {
            seed: None,
            attempts: 1,
        }
    }

    /// Fixes the random source, making runs reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Runs up to `attempts` independent passes and keeps the one that
    /// placed the most instances. Stops early on a complete placement.
    ///
    /// Values below 1 are treated as 1.
    pub fn with_attempts(mut self, attempts: usize) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Schedules using the configured random source.
    pub fn distribute(
        &self,
        assignments: &[Assignment],
        existing: &Schedule,
        settings: &Settings,
        classes: &[SchoolClass],
        teachers: &[Teacher],
    ) -> DistributionResult {
        match self.seed {
            Some(seed) => {
                let mut rng = StdRng::seed_from_u64(seed);
                self.distribute_with_rng(assignments, existing, settings, classes, teachers, &mut rng)
            }
            None => {
                let mut rng = rand::rng();
                self.distribute_with_rng(assignments, existing, settings, classes, teachers, &mut rng)
            }
        }
    }

    /// Schedules using a caller-supplied random source.
    ///
    /// The configured seed is ignored.
    pub fn distribute_with_rng<R: Rng + ?Sized>(
        &self,
        assignments: &[Assignment],
        existing: &Schedule,
        settings: &Settings,
        classes: &[SchoolClass],
        teachers: &[Teacher],
        rng: &mut R,
    ) -> DistributionResult {
        let resolved: Vec<ResolvedAssignment<'_>> = assignments
            .iter()
            .map(|a| resolve(a, classes, teachers))
            .collect();

        for r in resolved.iter().filter(|r| !r.is_placeable()) {
            warn!(
                assignment_id = r.id,
                "assignment has no existing class or teacher; its sessions cannot be placed"
            );
        }

        info!(
            assignments = assignments.len(),
            slots = settings.slot_count(),
            seeded_entries = existing.len(),
            attempts = self.attempts,
            "starting random distribution"
        );

        let mut best = greedy_pass(assignments, &resolved, existing, settings, teachers, rng);
        debug!(attempt = 1, placed = best.placed_count, unplaced = best.unplaced_count, "pass finished");

        for attempt in 2..=self.attempts {
            if best.is_complete() {
                break;
            }
            let candidate = greedy_pass(assignments, &resolved, existing, settings, teachers, rng);
            debug!(
                attempt,
                placed = candidate.placed_count,
                unplaced = candidate.unplaced_count,
                "pass finished"
            );
            if candidate.placed_count > best.placed_count {
                best = candidate;
            }
        }

        info!(
            placed = best.placed_count,
            unplaced = best.unplaced_count,
            "random distribution finished"
        );
        best
    }
}

impl Default for RandomScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Schedules once with a fresh, unseeded random source.
pub fn distribute_randomly(
    assignments: &[Assignment],
    existing: &Schedule,
    settings: &Settings,
    classes: &[SchoolClass],
    teachers: &[Teacher],
) -> DistributionResult {
    RandomScheduler::new().distribute(assignments, existing, settings, classes, teachers)
}

/// One greedy, non-backtracking pass over a shuffled instance list.
///
/// `resolved[i]` must be the resolution of `assignments[i]`.
fn greedy_pass<R: Rng + ?Sized>(
    assignments: &[Assignment],
    resolved: &[ResolvedAssignment<'_>],
    existing: &Schedule,
    settings: &Settings,
    teachers: &[Teacher],
    rng: &mut R,
) -> DistributionResult {
    let mut instances: Vec<usize> = assignments
        .iter()
        .enumerate()
        .flat_map(|(idx, a)| std::iter::repeat(idx).take(a.session_count()))
        .collect();
    instances.shuffle(rng);

    let mut slots = settings.slots();
    let mut schedule = existing.clone();
    let mut placed_count = 0;
    let mut unplaced_assignments = Vec::new();

    for idx in instances {
        let target = &assignments[idx];
        slots.shuffle(rng);

        let found = if resolved[idx].is_placeable() {
            slots.iter().copied().find(|slot| {
                is_slot_feasible(
                    target,
                    slot.day,
                    slot.period,
                    &schedule.entries,
                    teachers,
                    assignments,
                )
            })
        } else {
            None
        };

        match found {
            Some(slot) => {
                schedule.add_entry(ScheduleEntry::new(&target.id, slot.day, slot.period));
                placed_count += 1;
            }
            None => unplaced_assignments.push(target.id.clone()),
        }
    }

    DistributionResult {
        schedule,
        placed_count,
        unplaced_count: unplaced_assignments.len(),
        unplaced_assignments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;

    fn one_day(periods: usize) -> Settings {
        Settings::new(["Mon"], periods)
    }

    fn run(
        scheduler: &RandomScheduler,
        assignments: &[Assignment],
        settings: &Settings,
        classes: &[SchoolClass],
        teachers: &[Teacher],
    ) -> DistributionResult {
        scheduler.distribute(assignments, &Schedule::new(), settings, classes, teachers)
    }

    /// Checks mutual exclusion, availability and conservation.
    fn assert_invariants(
        result: &DistributionResult,
        assignments: &[Assignment],
        teachers: &[Teacher],
        seeded: usize,
    ) {
        let find = |id: &str| assignments.iter().find(|a| a.id == id).unwrap();
        let entries = &result.schedule.entries;

        for (i, x) in entries.iter().enumerate() {
            let ax = find(&x.assignment_id);
            for tid in &ax.teacher_ids {
                if let Some(t) = teachers.iter().find(|t| &t.id == tid) {
                    assert!(t.is_available_at(x.day_index, x.period_index));
                }
            }
            for y in &entries[i + 1..] {
                if x.slot() == y.slot() {
                    let ay = find(&y.assignment_id);
                    assert!(!ax.shares_class_with(ay), "class clash at {:?}", x.slot());
                    assert!(!ax.shares_teacher_with(ay), "teacher clash at {:?}", x.slot());
                }
            }
        }

        let total: usize = assignments.iter().map(Assignment::session_count).sum();
        assert_eq!(result.placed_count + result.unplaced_count, total);
        assert_eq!(result.unplaced_assignments.len(), result.unplaced_count);
        assert_eq!(entries.len(), seeded + result.placed_count);
    }

    #[test]
    fn test_more_sessions_than_slots() {
        let settings = one_day(2);
        let classes = vec![SchoolClass::new("C1", "1A")];
        let teachers = vec![Teacher::for_settings("T1", "Ada", &settings)];
        let assignments = vec![Assignment::new("A1", "S")
            .with_class("C1")
            .with_teacher("T1")
            .with_weekly_count(3)];

        for seed in 0..10 {
            let result = run(
                &RandomScheduler::new().with_seed(seed),
                &assignments,
                &settings,
                &classes,
                &teachers,
            );
            assert_eq!(result.placed_count, 2);
            assert_eq!(result.unplaced_count, 1);
            assert_eq!(result.unplaced_assignments, vec!["A1"]);

            let mut slots: Vec<Slot> = result.schedule.entries.iter().map(|e| e.slot()).collect();
            slots.sort();
            assert_eq!(slots, vec![Slot::new(0, 0), Slot::new(0, 1)]);
        }
    }

    #[test]
    fn test_blocked_teacher_places_nothing() {
        let settings = one_day(2);
        let classes = vec![SchoolClass::new("C1", "1A")];
        let teachers = vec![Teacher::for_settings("T1", "Ada", &settings).with_blocked_day(0)];
        let assignments = vec![Assignment::new("A1", "S")
            .with_class("C1")
            .with_teacher("T1")
            .with_weekly_count(3)];

        let result = run(&RandomScheduler::new().with_seed(3), &assignments, &settings, &classes, &teachers);
        assert_eq!(result.placed_count, 0);
        assert_eq!(result.unplaced_count, 3);
        assert!(result.schedule.is_empty());
    }

    #[test]
    fn test_class_contention() {
        let settings = one_day(1);
        let classes = vec![SchoolClass::new("C1", "1A")];
        let teachers = vec![
            Teacher::for_settings("T1", "Ada", &settings),
            Teacher::for_settings("T2", "Bo", &settings),
        ];
        let assignments = vec![
            Assignment::new("A1", "MATH").with_class("C1").with_teacher("T1"),
            Assignment::new("A2", "ART").with_class("C1").with_teacher("T2"),
        ];

        for seed in 0..10 {
            let result = run(
                &RandomScheduler::new().with_seed(seed),
                &assignments,
                &settings,
                &classes,
                &teachers,
            );
            assert_eq!(result.placed_count, 1);
            assert_eq!(result.unplaced_count, 1);
            let placed = &result.schedule.entries[0].assignment_id;
            assert_ne!(placed, &result.unplaced_assignments[0]);
        }
    }

    #[test]
    fn test_no_assignments() {
        let settings = Settings::default();
        let mut existing = Schedule::new();
        existing.add_entry(ScheduleEntry::new("X", 0, 0));

        let result = RandomScheduler::new().distribute(&[], &existing, &settings, &[], &[]);
        assert_eq!(result.placed_count, 0);
        assert_eq!(result.unplaced_count, 0);
        assert_eq!(result.schedule, existing);
    }

    #[test]
    fn test_empty_grid_places_nothing() {
        let classes = vec![SchoolClass::new("C1", "1A")];
        let teachers = vec![Teacher::new("T1", "Ada")];
        let assignments = vec![Assignment::new("A1", "S")
            .with_class("C1")
            .with_teacher("T1")
            .with_weekly_count(2)];

        for settings in [Settings::new(["Mon"], 0), Settings::new(Vec::<String>::new(), 4)] {
            let result = run(&RandomScheduler::new(), &assignments, &settings, &classes, &teachers);
            assert_eq!(result.placed_count, 0);
            assert_eq!(result.unplaced_count, 2);
        }
    }

    #[test]
    fn test_non_positive_weekly_count_contributes_nothing() {
        let settings = one_day(3);
        let classes = vec![SchoolClass::new("C1", "1A")];
        let teachers = vec![Teacher::for_settings("T1", "Ada", &settings)];
        let assignments = vec![
            Assignment::new("A0", "S").with_class("C1").with_teacher("T1").with_weekly_count(0),
            Assignment::new("AN", "S").with_class("C1").with_teacher("T1").with_weekly_count(-4),
            Assignment::new("A1", "S").with_class("C1").with_teacher("T1").with_weekly_count(1),
        ];

        let result = run(&RandomScheduler::new().with_seed(1), &assignments, &settings, &classes, &teachers);
        assert_eq!(result.placed_count, 1);
        assert_eq!(result.unplaced_count, 0);
        assert_eq!(result.schedule.entries[0].assignment_id, "A1");
    }

    #[test]
    fn test_co_taught_sessions_hold_every_class_and_teacher() {
        let settings = one_day(2);
        let classes = vec![SchoolClass::new("C1", "1A"), SchoolClass::new("C2", "1B")];
        let teachers = vec![
            Teacher::for_settings("T1", "Ada", &settings),
            Teacher::for_settings("T2", "Bo", &settings),
        ];
        let assignments = vec![
            Assignment::new("JOINT", "PE")
                .with_class("C1")
                .with_class("C2")
                .with_teacher("T1")
                .with_teacher("T2")
                .with_weekly_count(1),
            Assignment::new("C1_ONLY", "MATH").with_class("C1").with_teacher("T1").with_weekly_count(1),
            Assignment::new("C2_ONLY", "ART").with_class("C2").with_teacher("T2").with_weekly_count(1),
        ];

        for seed in 0..20 {
            let result = run(
                &RandomScheduler::new().with_seed(seed),
                &assignments,
                &settings,
                &classes,
                &teachers,
            );
            assert_invariants(&result, &assignments, &teachers, 0);
        }
    }

    #[test]
    fn test_invariants_on_realistic_week() {
        let settings = Settings::default();
        let classes: Vec<SchoolClass> = (0..6)
            .map(|i| SchoolClass::new(format!("C{i}"), format!("Class {i}")))
            .collect();
        let teachers: Vec<Teacher> = (0..5)
            .map(|i| {
                let mut t = Teacher::for_settings(format!("T{i}"), format!("Teacher {i}"), &settings);
                t.constraints.set_day(i % 5, false);
                t
            })
            .collect();
        let mut assignments = Vec::new();
        for c in 0..6 {
            for s in 0..4 {
                assignments.push(
                    Assignment::new(format!("A{c}_{s}"), format!("S{s}"))
                        .with_class(format!("C{c}"))
                        .with_teacher(format!("T{}", (c + s) % 5))
                        .with_weekly_count(2),
                );
            }
        }

        for seed in 0..5 {
            let result = run(
                &RandomScheduler::new().with_seed(seed),
                &assignments,
                &settings,
                &classes,
                &teachers,
            );
            assert_invariants(&result, &assignments, &teachers, 0);
        }
    }

    #[test]
    fn test_same_seed_same_result() {
        let settings = Settings::new(["Mon", "Tue"], 4);
        let classes = vec![SchoolClass::new("C1", "1A"), SchoolClass::new("C2", "1B")];
        let teachers = vec![
            Teacher::for_settings("T1", "Ada", &settings).with_blocked(0, 0),
            Teacher::for_settings("T2", "Bo", &settings),
        ];
        let assignments = vec![
            Assignment::new("A1", "S").with_class("C1").with_teacher("T1").with_weekly_count(3),
            Assignment::new("A2", "S").with_class("C2").with_teacher("T1").with_weekly_count(3),
            Assignment::new("A3", "S").with_class("C1").with_teacher("T2").with_weekly_count(4),
        ];

        let scheduler = RandomScheduler::new().with_seed(42);
        let a = run(&scheduler, &assignments, &settings, &classes, &teachers);
        let b = run(&scheduler, &assignments, &settings, &classes, &teachers);
        assert_eq!(a, b);
    }

    #[test]
    fn test_seeded_schedule_is_respected() {
        let settings = one_day(2);
        let classes = vec![SchoolClass::new("C1", "1A")];
        let teachers = vec![Teacher::for_settings("T1", "Ada", &settings)];
        let assignments = vec![Assignment::new("A1", "S")
            .with_class("C1")
            .with_teacher("T1")
            .with_weekly_count(2)];
        let existing = Schedule::from_entries(vec![ScheduleEntry::new("A1", 0, 1)]);

        let result = RandomScheduler::new()
            .with_seed(5)
            .distribute(&assignments, &existing, &settings, &classes, &teachers);
        assert_eq!(result.placed_count, 1);
        assert_eq!(result.unplaced_count, 1);
        assert!(result.schedule.contains(&ScheduleEntry::new("A1", 0, 0)));
        assert_invariants(&result, &assignments, &teachers, 1);
    }

    #[test]
    fn test_dangling_references_are_filtered() {
        let settings = one_day(2);
        let classes = vec![SchoolClass::new("C1", "1A")];
        let teachers = vec![Teacher::for_settings("T1", "Ada", &settings)];
        let assignments = vec![
            Assignment::new("OK", "S")
                .with_class("C1")
                .with_teacher("T1")
                .with_teacher("GHOST")
                .with_weekly_count(1),
            Assignment::new("ORPHAN", "S").with_class("GONE").with_teacher("T1"),
        ];

        let result = run(&RandomScheduler::new().with_seed(9), &assignments, &settings, &classes, &teachers);
        assert_eq!(result.placed_count, 1);
        assert_eq!(result.unplaced_assignments, vec!["ORPHAN"]);
        assert_eq!(result.schedule.entries[0].assignment_id, "OK");
    }

    #[test]
    fn test_shared_unknown_teacher_is_exclusive() {
        let settings = one_day(1);
        let classes = vec![SchoolClass::new("C1", "1A"), SchoolClass::new("C2", "1B")];
        let teachers = vec![
            Teacher::for_settings("T1", "Ada", &settings),
            Teacher::for_settings("T2", "Bo", &settings),
        ];
        let assignments = vec![
            Assignment::new("A", "S").with_class("C1").with_teacher("T1").with_teacher("GHOST"),
            Assignment::new("B", "S").with_class("C2").with_teacher("T2").with_teacher("GHOST"),
        ];

        for seed in 0..10 {
            let scheduler = RandomScheduler::new().with_seed(seed);
            let result = run(&scheduler, &assignments, &settings, &classes, &teachers);
            assert_eq!(result.placed_count, 1);
            assert_eq!(result.unplaced_count, 1);
            assert_invariants(&result, &assignments, &teachers, 0);
        }
    }

    #[test]
    fn test_attempts_keep_invariants() {
        let settings = Settings::new(["Mon", "Tue"], 2);
        let classes = vec![SchoolClass::new("C1", "1A"), SchoolClass::new("C2", "1B")];
        let teachers = vec![
            Teacher::for_settings("T1", "Ada", &settings),
            Teacher::for_settings("T2", "Bo", &settings).with_blocked_day(1),
        ];
        let assignments = vec![
            Assignment::new("A1", "S").with_class("C1").with_teacher("T1").with_weekly_count(2),
            Assignment::new("A2", "S").with_class("C2").with_teacher("T2").with_weekly_count(2),
            Assignment::new("A3", "S").with_class("C2").with_teacher("T1").with_weekly_count(2),
        ];

        let result = run(
            &RandomScheduler::new().with_seed(11).with_attempts(25),
            &assignments,
            &settings,
            &classes,
            &teachers,
        );
        assert_invariants(&result, &assignments, &teachers, 0);
        assert_eq!(RandomScheduler::new().with_attempts(0).attempts, 1);
    }

    #[test]
    fn test_injected_rng() {
        let settings = one_day(3);
        let classes = vec![SchoolClass::new("C1", "1A")];
        let teachers = vec![Teacher::for_settings("T1", "Ada", &settings)];
        let assignments = vec![Assignment::new("A1", "S")
            .with_class("C1")
            .with_teacher("T1")
            .with_weekly_count(3)];

        let mut rng = StdRng::seed_from_u64(0);
        let result = RandomScheduler::new().distribute_with_rng(
            &assignments,
            &Schedule::new(),
            &settings,
            &classes,
            &teachers,
            &mut rng,
        );
        assert!(result.is_complete());
        assert_eq!(result.instance_count(), 3);
    }

    #[test]
    fn test_unseeded_free_function() {
        let settings = one_day(1);
        let classes = vec![SchoolClass::new("C1", "1A")];
        let teachers = vec![Teacher::for_settings("T1", "Ada", &settings)];
        let assignments = vec![Assignment::new("A1", "S").with_class("C1").with_teacher("T1")];

        let result = distribute_randomly(&assignments, &Schedule::new(), &settings, &classes, &teachers);
        assert_eq!(result.placed_count, 1);
    }
}
