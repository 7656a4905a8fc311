//! Schedule (roster) model.
//!
//! A schedule is the ordered list of slot entries produced by one greedy
//! trial: one entry per required (date, shift, unit), either assigned to a
//! nurse or left unfilled.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

use super::ShiftCode;

/// Outcome of a single slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    /// A nurse fills the slot.
    Assigned,
    /// No eligible nurse was found.
    Unfilled,
}

impl fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotStatus::Assigned => f.write_str("ASSIGNED"),
            SlotStatus::Unfilled => f.write_str("UNFILLED"),
        }
    }
}

/// One filled or attempted headcount unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    /// Slot date.
    pub date: NaiveDate,
    /// Slot shift.
    pub shift: ShiftCode,
    /// Assigned nurse, `None` when unfilled.
    pub nurse_id: Option<String>,
    /// Slot outcome.
    pub status: SlotStatus,
}

impl ScheduleEntry {
    /// Creates an assigned entry.
    pub fn assigned(date: NaiveDate, shift: ShiftCode, nurse_id: impl Into<String>) -> Self {
        Self {
            date,
            shift,
            nurse_id: Some(nurse_id.into()),
            status: SlotStatus::Assigned,
        }
    }

    /// Creates an unfilled entry.
    pub fn unfilled(date: NaiveDate, shift: ShiftCode) -> Self {
        Self {
            date,
            shift,
            nurse_id: None,
            status: SlotStatus::Unfilled,
        }
    }

    /// Assigned nurse, if the entry is assigned.
    #[inline]
    pub fn assigned_nurse(&self) -> Option<&str> {
        match self.status {
            SlotStatus::Assigned => self.nurse_id.as_deref(),
            SlotStatus::Unfilled => None,
        }
    }
}

/// A complete roster for one trial.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Entries in generation order (date, shift order, unit).
    pub entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    pub fn push(&mut self, entry: ScheduleEntry) {
        self.entries.push(entry);
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the schedule has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Assigned entries only, with the nurse id unwrapped.
    pub fn assigned(&self) -> impl Iterator<Item = (&ScheduleEntry, &str)> {
        self.entries
            .iter()
            .filter_map(|e| e.assigned_nurse().map(|n| (e, n)))
    }

    /// Unfilled entries only.
    pub fn unfilled(&self) -> impl Iterator<Item = &ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.status == SlotStatus::Unfilled)
    }

    /// Number of unfilled slots.
    pub fn unfilled_count(&self) -> usize {
        self.unfilled().count()
    }

    /// Whether every slot is assigned.
    pub fn is_feasible(&self) -> bool {
        self.unfilled_count() == 0
    }

    /// Entries for one (date, shift).
    pub fn entries_for_slot(&self, date: NaiveDate, shift: ShiftCode) -> Vec<&ScheduleEntry> {
        self.entries
            .iter()
            .filter(|e| e.date == date && e.shift == shift)
            .collect()
    }

    /// Assigned entries for one nurse.
    pub fn entries_for_nurse(&self, nurse_id: &str) -> Vec<&ScheduleEntry> {
        self.assigned()
            .filter(|(_, n)| *n == nurse_id)
            .map(|(e, _)| e)
            .collect()
    }

    /// Assigned slot count per nurse.
    pub fn assigned_count_by_nurse(&self) -> HashMap<&str, usize> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for (_, nurse) in self.assigned() {
            *counts.entry(nurse).or_insert(0) += 1;
        }
        counts
    }

    /// Assigned nurse ids grouped by (date, shift), in entry order.
    pub fn nurses_by_slot(&self) -> BTreeMap<(NaiveDate, ShiftCode), Vec<&str>> {
        let mut slots: BTreeMap<(NaiveDate, ShiftCode), Vec<&str>> = BTreeMap::new();
        for (e, nurse) in self.assigned() {
            slots.entry((e.date, e.shift)).or_default().push(nurse);
        }
        slots
    }

    /// Earliest and latest entry dates.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.entries.iter().map(|e| e.date).min()?;
        let max = self.entries.iter().map(|e| e.date).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn sample_schedule() -> Schedule {
        let mut s = Schedule::new();
        s.push(ScheduleEntry::assigned(d(1), ShiftCode::Day, "A"));
        s.push(ScheduleEntry::assigned(d(1), ShiftCode::Day, "B"));
        s.push(ScheduleEntry::unfilled(d(1), ShiftCode::Night));
        s.push(ScheduleEntry::assigned(d(2), ShiftCode::Evening, "A"));
        s
    }

    #[test]
    fn test_unfilled_count() {
        let s = sample_schedule();
        assert_eq!(s.unfilled_count(), 1);
        assert!(!s.is_feasible());
        assert_eq!(s.len(), 4);
    }

    #[test]
    fn test_entries_for_slot() {
        let s = sample_schedule();
        assert_eq!(s.entries_for_slot(d(1), ShiftCode::Day).len(), 2);
        assert_eq!(s.entries_for_slot(d(1), ShiftCode::Night).len(), 1);
        assert!(s.entries_for_slot(d(2), ShiftCode::Day).is_empty());
    }

    #[test]
    fn test_assigned_counts() {
        let s = sample_schedule();
        let counts = s.assigned_count_by_nurse();
        assert_eq!(counts["A"], 2);
        assert_eq!(counts["B"], 1);
        assert_eq!(s.entries_for_nurse("A").len(), 2);
    }

    #[test]
    fn test_nurses_by_slot() {
        let s = sample_schedule();
        let slots = s.nurses_by_slot();
        assert_eq!(slots[&(d(1), ShiftCode::Day)], vec!["A", "B"]);
        assert!(!slots.contains_key(&(d(1), ShiftCode::Night)));
    }

    #[test]
    fn test_unfilled_entry_has_no_nurse() {
        let e = ScheduleEntry::unfilled(d(1), ShiftCode::Night);
        assert_eq!(e.assigned_nurse(), None);
        assert_eq!(e.status.to_string(), "UNFILLED");
    }

    #[test]
    fn test_empty_schedule() {
        let s = Schedule::new();
        assert!(s.is_empty());
        assert!(s.is_feasible());
        assert_eq!(s.date_range(), None);
    }
}
