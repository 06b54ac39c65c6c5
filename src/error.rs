//! Error types.
//!
//! Two failure families exist:
//! - [`ConflictReason`]: a proposed placement collides with a teacher's
//!   availability or a class's occupancy. Expected and recoverable; the
//!   caller shows the reason to the user.
//! - [`TimetableError`]: a store operation was given input that does not
//!   fit the current entities (unknown id, empty set, slot off the grid).
//!
//! A scheduling run that cannot place every session is not an error; see
//! [`crate::scheduler::DistributionResult`].

use thiserror::Error;

/// Why a manual placement was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictReason {
    /// The teacher is blocked at the slot or already teaching there.
    #[error("teacher '{0}' is not available at this slot")]
    TeacherUnavailable(String),
    /// The class already has a session at the slot.
    #[error("class '{0}' is already busy at this slot")]
    ClassBusy(String),
    /// The assignment id is not known.
    #[error("unknown assignment '{0}'")]
    UnknownAssignment(String),
    /// After dropping dangling references the assignment has no class or
    /// no teacher left.
    #[error("assignment '{0}' has no existing class or teacher")]
    Unresolvable(String),
}

/// Errors raised by [`crate::store::Timetable`] operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimetableError {
    #[error(transparent)]
    Conflict(#[from] ConflictReason),

    #[error("slot (day {day}, period {period}) is outside the timetable grid")]
    SlotOutOfRange { day: usize, period: usize },

    #[error("unknown teacher '{0}'")]
    UnknownTeacher(String),

    #[error("unknown class '{0}'")]
    UnknownClass(String),

    #[error("unknown subject '{0}'")]
    UnknownSubject(String),

    #[error("unknown assignment '{0}'")]
    UnknownAssignment(String),

    #[error("duplicate id '{0}'")]
    DuplicateId(String),

    #[error("assignment '{0}' has no classes")]
    EmptyClassSet(String),

    #[error("assignment '{0}' has no teachers")]
    EmptyTeacherSet(String),

    #[error("schedule entry not found")]
    EntryNotFound,
}

/// Result alias for store operations.
pub type Result<T, E = TimetableError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_converts_transparently() {
        let err: TimetableError = ConflictReason::ClassBusy("C1".into()).into();
        assert_eq!(err.to_string(), "class 'C1' is already busy at this slot");
        assert!(matches!(err, TimetableError::Conflict(ConflictReason::ClassBusy(_))));
    }
}
