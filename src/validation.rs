//! Input validation for timetable data.
//!
//! Checks structural integrity of loaded records before scheduling.
//! Detects:
//! - Duplicate IDs (per entity kind)
//! - Assignments with no classes or no teachers
//! - References to unknown classes, teachers or subjects
//! - Assignments that ask for no sessions
//! - Availability matrices that do not match the settings
//! - A grid with no slots

use crate::models::{Assignment, SchoolClass, Settings, Subject, Teacher};
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// An assignment has no classes or no teachers.
    EmptyAssignment,
    /// An assignment references an entity that doesn't exist.
    InvalidReference,
    /// An assignment's weekly count is zero or negative.
    NonPositiveWeeklyCount,
    /// A teacher's availability matrix has the wrong dimensions.
    MatrixShapeMismatch,
    /// The settings produce no slots.
    EmptyGrid,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data for a scheduling run.
///
/// Checks:
/// 1. The grid has at least one day and one period
/// 2. No duplicate teacher, class, subject or assignment IDs
/// 3. Every teacher matrix is `days × periods`
/// 4. Every assignment has at least one class and one teacher
/// 5. All class, teacher and subject references exist
/// 6. Every weekly count is positive
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    settings: &Settings,
    teachers: &[Teacher],
    classes: &[SchoolClass],
    subjects: &[Subject],
    assignments: &[Assignment],
) -> ValidationResult {
    let mut errors = Vec::new();

    if settings.days.is_empty() || settings.periods == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyGrid,
            format!(
                "Timetable grid is empty ({} days, {} periods)",
                settings.day_count(),
                settings.periods
            ),
        ));
    }

    let teacher_ids = collect_ids("teacher", teachers.iter().map(|t| t.id.as_str()), &mut errors);
    let class_ids = collect_ids("class", classes.iter().map(|c| c.id.as_str()), &mut errors);
    let subject_ids = collect_ids("subject", subjects.iter().map(|s| s.id.as_str()), &mut errors);
    collect_ids("assignment", assignments.iter().map(|a| a.id.as_str()), &mut errors);

    for t in teachers {
        if !t.constraints.is_shape(settings.day_count(), settings.periods) {
            let (days, periods) = t.constraints.dimensions();
            errors.push(ValidationError::new(
                ValidationErrorKind::MatrixShapeMismatch,
                format!(
                    "Teacher '{}' availability is {}x{}, expected {}x{}",
                    t.id,
                    days,
                    periods,
                    settings.day_count(),
                    settings.periods
                ),
            ));
        }
    }

    for a in assignments {
        if a.class_ids.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyAssignment,
                format!("Assignment '{}' has no classes", a.id),
            ));
        }
        if a.teacher_ids.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyAssignment,
                format!("Assignment '{}' has no teachers", a.id),
            ));
        }
        for c in &a.class_ids {
            if !class_ids.contains(c.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Assignment '{}' references unknown class '{}'", a.id, c),
                ));
            }
        }
        for t in &a.teacher_ids {
            if !teacher_ids.contains(t.as_str()) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidReference,
                    format!("Assignment '{}' references unknown teacher '{}'", a.id, t),
                ));
            }
        }
        if !subject_ids.contains(a.subject_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!(
                    "Assignment '{}' references unknown subject '{}'",
                    a.id, a.subject_id
                ),
            ));
        }
        if a.weekly_count <= 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveWeeklyCount,
                format!(
                    "Assignment '{}' has weekly count {}",
                    a.id, a.weekly_count
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {kind} ID: {id}"),
            ));
        }
    }
    seen
}
