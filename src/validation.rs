//! Input validation for timetable requests.
//!
//! Checks structural integrity of the requested courses before any
//! encoding work. Detects:
//! - Empty course list
//! - Duplicate course or offering IDs
//! - Courses or components without offerings
//! - Offerings filed under a different component kind
//! - Malformed time slots
//!
//! All problems are reported together rather than stopping at the first.

use std::collections::HashSet;
use thiserror::Error;

use crate::models::{CourseRecord, TimeSlot, MINUTES_PER_DAY};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// No courses were requested.
    EmptyCourseList,
    /// Two entities share the same ID.
    DuplicateId,
    /// A course has no components.
    EmptyCourse,
    /// A component has no offerings.
    EmptyComponent,
    /// An offering's own kind differs from the component it is filed under.
    ComponentMismatch,
    /// A time slot has no weekdays, ends before it starts, or leaves the day.
    InvalidTimeSlot,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the requested courses.
///
/// Checks:
/// 1. At least one course is requested
/// 2. No duplicate course IDs
/// 3. No duplicate offering IDs (across all courses)
/// 4. Every course has a component and every component an offering
/// 5. Offerings match the component kind they are filed under
/// 6. Timed slots have weekdays and satisfy `0 <= start < end <= 1440`
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_courses(courses: &[CourseRecord]) -> ValidationResult {
    let mut errors = Vec::new();

    if courses.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyCourseList,
            "Course list is empty",
        ));
    }

    let mut course_ids = HashSet::new();
    let mut offering_ids = HashSet::new();

    for course in courses {
        if !course_ids.insert(course.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }

        if course.components.is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCourse,
                format!("Course '{}' has no components", course.id),
            ));
        }

        for group in &course.components {
            if group.offerings.is_empty() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::EmptyComponent,
                    format!("Component '{} {}' has no offerings", course.id, group.kind),
                ));
            }

            for offering in &group.offerings {
                if !offering_ids.insert(offering.id.as_str()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateId,
                        format!("Duplicate offering ID: {}", offering.id),
                    ));
                }

                if offering.component != group.kind {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::ComponentMismatch,
                        format!(
                            "Offering '{}' is a {} but listed under '{} {}'",
                            offering.id, offering.component, course.id, group.kind
                        ),
                    ));
                }

                for slot in &offering.slots {
                    if let Some(problem) = slot_problem(slot) {
                        errors.push(ValidationError::new(
                            ValidationErrorKind::InvalidTimeSlot,
                            format!("Offering '{}': {problem}", offering.id),
                        ));
                    }
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn slot_problem(slot: &TimeSlot) -> Option<String> {
    if slot.is_tbd() {
        return None;
    }
    if slot.days.is_empty() {
        return Some("time slot has no weekdays".to_string());
    }
    if slot.start < 0 || slot.end > MINUTES_PER_DAY {
        return Some(format!(
            "time slot {}-{} is outside the day",
            slot.start, slot.end
        ));
    }
    if slot.end <= slot.start {
        return Some(format!(
            "time slot ends at {} before it starts at {}",
            slot.end, slot.start
        ));
    }
    None
}
