//! Per-nurse calendar view.
//!
//! Lays one nurse's assignments out as ISO-week rows with Monday to
//! Sunday columns. The grid runs from the first day of the schedule's
//! earliest month to the schedule's last date; each day shows the shift
//! code or [`OFF_LABEL`], and weekdays outside that range are blank.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::HashMap;

use crate::models::{Schedule, ShiftCode};

/// Cell text for a day without an assignment.
pub const OFF_LABEL: &str = "OFF";

/// Column headers, Monday first.
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// One ISO week of a nurse calendar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekRow {
    /// ISO week-numbering year.
    pub iso_year: i32,
    /// ISO week number.
    pub week: u32,
    /// Cells Monday..Sunday; `None` outside the calendar range.
    pub days: [Option<String>; 7],
}

impl WeekRow {
    /// Cell text, blank for days outside the range.
    pub fn cell(&self, weekday: usize) -> &str {
        self.days
            .get(weekday)
            .and_then(|c| c.as_deref())
            .unwrap_or("")
    }
}

/// Calendar grid for one nurse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NurseCalendar {
    pub nurse_id: String,
    pub weeks: Vec<WeekRow>,
}

impl NurseCalendar {
    /// Builds the grid; `None` when the schedule has no entries.
    pub fn build(schedule: &Schedule, nurse_id: &str) -> Option<Self> {
        let (first, last) = schedule.date_range()?;
        let month_start = first.with_day(1)?;

        // first assignment of the day wins
        let mut worked: HashMap<NaiveDate, ShiftCode> = HashMap::new();
        for e in schedule.entries_for_nurse(nurse_id) {
            worked.entry(e.date).or_insert(e.shift);
        }

        let mut weeks: Vec<WeekRow> = Vec::new();
        for date in month_start.iter_days().take_while(|d| *d <= last) {
            let iso = date.iso_week();
            let key = (iso.year(), iso.week());
            let needs_row = weeks
                .last()
                .map_or(true, |w| (w.iso_year, w.week) != key);
            if needs_row {
                weeks.push(WeekRow {
                    iso_year: key.0,
                    week: key.1,
                    days: Default::default(),
                });
            }

            let text = worked
                .get(&date)
                .map_or_else(|| OFF_LABEL.to_string(), |s| s.code().to_string());
            if let Some(row) = weeks.last_mut() {
                row.days[date.weekday().num_days_from_monday() as usize] = Some(text);
            }
        }

        Some(Self {
            nurse_id: nurse_id.to_string(),
            weeks,
        })
    }

    /// Shifts worked in the grid range.
    pub fn worked_days(&self) -> usize {
        self.weeks
            .iter()
            .flat_map(|w| w.days.iter())
            .filter(|c| matches!(c.as_deref(), Some(t) if t != OFF_LABEL))
            .count()
    }
}
