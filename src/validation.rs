//! Input validation for rostering problems.
//!
//! Checks structural integrity of nurses, calendar, requirements, and
//! requests before any trial runs. Detects:
//! - Duplicate nurse IDs
//! - An empty calendar
//! - Requests and capacity overrides naming unknown nurses
//! - Requirements dated outside the calendar
//! - Two requirement rows for the same (date, shift)
//!
//! Every issue is collected; the caller gets the full list at once.
//!
//! A SHIFT_AVOID request without a usable shift is not an error, it simply
//! has no effect.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::models::{Calendar, Nurse, Request, ShiftCode, ShiftRequirement};

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
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two nurses share the same ID.
    DuplicateId,
    /// The calendar has no days.
    EmptyCalendar,
    /// A request references a nurse that doesn't exist.
    UnknownNurse,
    /// A capacity override references a nurse that doesn't exist.
    UnknownOverrideNurse,
    /// A requirement is dated outside the calendar.
    RequirementOutsideCalendar,
    /// Two requirement rows for the same (date, shift).
    DuplicateRequirement,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Validates the input tables of a rostering problem.
///
/// Checks:
/// 1. No duplicate nurse IDs
/// 2. The calendar is not empty
/// 3. Every request names a known nurse
/// 4. Every requirement date is a calendar date
/// 5. At most one requirement row per (date, shift)
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(
    nurses: &[Nurse],
    calendar: &Calendar,
    requirements: &[ShiftRequirement],
    requests: &[Request],
) -> ValidationResult {
    let mut errors = Vec::new();

    let mut nurse_ids = HashSet::new();
    for n in nurses {
        if !nurse_ids.insert(n.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate nurse ID: {}", n.id),
            ));
        }
    }

    if calendar.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyCalendar,
            "Calendar has no days",
        ));
    }

    // Report each unknown nurse once, in first-seen order
    let mut reported = HashSet::new();
    for r in requests {
        if !nurse_ids.contains(r.nurse_id.as_str()) && reported.insert(r.nurse_id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownNurse,
                format!("Request references unknown nurse '{}'", r.nurse_id),
            ));
        }
    }

    let dates = calendar.date_set();
    let mut seen: HashSet<(NaiveDate, ShiftCode)> = HashSet::new();
    for req in requirements {
        if !dates.contains(&req.date) {
            errors.push(ValidationError::new(
                ValidationErrorKind::RequirementOutsideCalendar,
                format!("Requirement {} {} is outside the calendar", req.date, req.shift),
            ));
        }
        if !seen.insert((req.date, req.shift)) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateRequirement,
                format!("Duplicate requirement for {} {}", req.date, req.shift),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates that every capacity override names a known nurse.
///
/// Errors are ordered by nurse ID.
pub fn validate_capacity_overrides(
    nurses: &[Nurse],
    overrides: &HashMap<String, u32>,
) -> ValidationResult {
    let nurse_ids: HashSet<&str> = nurses.iter().map(|n| n.id.as_str()).collect();

    let mut unknown: Vec<&str> = overrides
        .keys()
        .map(String::as_str)
        .filter(|id| !nurse_ids.contains(id))
        .collect();
    unknown.sort_unstable();

    if unknown.is_empty() {
        return Ok(());
    }
    Err(unknown
        .into_iter()
        .map(|id| {
            ValidationError::new(
                ValidationErrorKind::UnknownOverrideNurse,
                format!("Capacity override references unknown nurse '{id}'"),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn nurses() -> Vec<Nurse> {
        vec![Nurse::new("A"), Nurse::new("B")]
    }

    fn calendar() -> Calendar {
        Calendar::from_range(d(1), d(7))
    }

    #[test]
    fn test_valid_input() {
        let reqs = vec![
            ShiftRequirement::new(d(1), ShiftCode::Day, 2),
            ShiftRequirement::new(d(1), ShiftCode::Night, 1),
        ];
        let requests = vec![Request::off("A", d(2)), Request::avoid("B", d(3), "")];
        assert!(validate_input(&nurses(), &calendar(), &reqs, &requests).is_ok());
    }

    #[test]
    fn test_duplicate_nurse_id() {
        let mut ns = nurses();
        ns.push(Nurse::new("A"));
        let errs = validate_input(&ns, &calendar(), &[], &[]).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ValidationErrorKind::DuplicateId);
    }

    #[test]
    fn test_empty_calendar() {
        let errs = validate_input(&nurses(), &Calendar::default(), &[], &[]).unwrap_err();
        assert_eq!(errs[0].kind, ValidationErrorKind::EmptyCalendar);
    }

    #[test]
    fn test_unknown_nurse_reported_once() {
        let requests = vec![Request::off("Z", d(1)), Request::off("Z", d(2))];
        let errs = validate_input(&nurses(), &calendar(), &[], &requests).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ValidationErrorKind::UnknownNurse);
        assert!(errs[0].message.contains("'Z'"));
    }

    #[test]
    fn test_requirement_outside_calendar() {
        let reqs = vec![ShiftRequirement::new(d(20), ShiftCode::Day, 1)];
        let errs = validate_input(&nurses(), &calendar(), &reqs, &[]).unwrap_err();
        assert_eq!(errs[0].kind, ValidationErrorKind::RequirementOutsideCalendar);
    }

    #[test]
    fn test_duplicate_requirement() {
        let reqs = vec![
            ShiftRequirement::new(d(2), ShiftCode::Evening, 1),
            ShiftRequirement::new(d(2), ShiftCode::Evening, 3),
        ];
        let errs = validate_input(&nurses(), &calendar(), &reqs, &[]).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert_eq!(errs[0].kind, ValidationErrorKind::DuplicateRequirement);
    }

    #[test]
    fn test_multiple_errors() {
        let mut ns = nurses();
        ns.push(Nurse::new("B"));
        let reqs = vec![ShiftRequirement::new(d(30), ShiftCode::Night, 1)];
        let requests = vec![Request::off("X", d(1))];
        let errs = validate_input(&ns, &calendar(), &reqs, &requests).unwrap_err();
        assert_eq!(errs.len(), 3);
    }

    #[test]
    fn test_capacity_overrides() {
        let mut overrides = HashMap::new();
        overrides.insert("A".to_string(), 3);
        assert!(validate_capacity_overrides(&nurses(), &overrides).is_ok());

        overrides.insert("Y".to_string(), 1);
        overrides.insert("X".to_string(), 1);
        let errs = validate_capacity_overrides(&nurses(), &overrides).unwrap_err();
        assert_eq!(errs.len(), 2);
        assert!(errs[0].message.contains("'X'"));
        assert_eq!(errs[1].kind, ValidationErrorKind::UnknownOverrideNurse);
    }
}
