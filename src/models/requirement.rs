//! Staffing requirements.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::ShiftCode;

/// Required headcount for one (date, shift).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRequirement {
    /// Date of the shift.
    pub date: NaiveDate,
    /// Shift code.
    pub shift: ShiftCode,
    /// Number of nurses required.
    pub required: u32,
}

impl ShiftRequirement {
    /// Creates a requirement.
    pub fn new(date: NaiveDate, shift: ShiftCode, required: u32) -> Self {
        Self {
            date,
            shift,
            required,
        }
    }
}

/// Builds a (date, shift) → headcount lookup.
///
/// Later rows for the same key replace earlier ones; duplicates are
/// reported by [`crate::validation::validate_input`] before this is used.
pub fn requirement_map(requirements: &[ShiftRequirement]) -> HashMap<(NaiveDate, ShiftCode), u32> {
    requirements
        .iter()
        .map(|r| ((r.date, r.shift), r.required))
        .collect()
}
