//! Assignment context for cost-rule evaluation.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::models::ShiftCode;
use crate::requests::RequestIndex;

/// A single slot being filled: one (date, shift) headcount unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    /// Slot date.
    pub date: NaiveDate,
    /// Slot shift.
    pub shift: ShiftCode,
}

impl Slot {
    /// Creates a slot.
    pub fn new(date: NaiveDate, shift: ShiftCode) -> Self {
        Self { date, shift }
    }
}

/// Running roster state of one trial, passed to cost rules and
/// eligibility checks.
///
/// Owned by exactly one trial; nothing here is shared between seeds.
#[derive(Debug, Clone)]
pub struct AssignmentContext<'a> {
    /// Request lookups for the whole problem.
    pub requests: &'a RequestIndex,
    /// Assigned slots so far, per nurse.
    month_count: HashMap<String, u32>,
    /// Nurses already working on a date.
    assigned_on: HashMap<NaiveDate, HashSet<String>>,
    /// Shift each nurse works on a date.
    shift_on: HashMap<String, HashMap<NaiveDate, ShiftCode>>,
}

impl<'a> AssignmentContext<'a> {
    /// Creates an empty context.
    pub fn new(requests: &'a RequestIndex) -> Self {
        Self {
            requests,
            month_count: HashMap::new(),
            assigned_on: HashMap::new(),
            shift_on: HashMap::new(),
        }
    }

    /// Slots assigned to the nurse so far.
    #[inline]
    pub fn assigned_count(&self, nurse_id: &str) -> u32 {
        self.month_count.get(nurse_id).copied().unwrap_or(0)
    }

    /// Whether the nurse already works any shift on `date`.
    #[inline]
    pub fn is_assigned_on(&self, nurse_id: &str, date: NaiveDate) -> bool {
        self.assigned_on
            .get(&date)
            .is_some_and(|nurses| nurses.contains(nurse_id))
    }

    /// Shift the nurse works on `date`, if any.
    #[inline]
    pub fn shift_on(&self, nurse_id: &str, date: NaiveDate) -> Option<ShiftCode> {
        self.shift_on.get(nurse_id)?.get(&date).copied()
    }

    /// Records an assignment.
    pub fn record(&mut self, nurse_id: &str, slot: Slot) {
        *self.month_count.entry(nurse_id.to_string()).or_insert(0) += 1;
        self.assigned_on
            .entry(slot.date)
            .or_default()
            .insert(nurse_id.to_string());
        self.shift_on
            .entry(nurse_id.to_string())
            .or_default()
            .insert(slot.date, slot.shift);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_updates_all_views() {
        let idx = RequestIndex::default();
        let mut ctx = AssignmentContext::new(&idx);
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();

        assert_eq!(ctx.assigned_count("A"), 0);
        assert!(!ctx.is_assigned_on("A", date));

        ctx.record("A", Slot::new(date, ShiftCode::Night));

        assert_eq!(ctx.assigned_count("A"), 1);
        assert!(ctx.is_assigned_on("A", date));
        assert_eq!(ctx.shift_on("A", date), Some(ShiftCode::Night));
        assert_eq!(ctx.shift_on("B", date), None);
    }
}
