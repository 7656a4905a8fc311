//! Scheduling calendar.
//!
//! One [`CalendarDay`] per day of the scheduling period. The calendar
//! supplies the set of dates the roster covers and the weekend/holiday
//! flags the capacity derivation counts as days off.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// The date.
    pub date: NaiveDate,
    /// Whether the date falls on a weekend.
    pub is_weekend: bool,
    /// Whether the date is a public holiday.
    pub is_holiday: bool,
}

impl CalendarDay {
    /// Creates a regular working day.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            is_weekend: false,
            is_holiday: false,
        }
    }

    /// Marks the day as a weekend day.
    pub fn weekend(mut self) -> Self {
        self.is_weekend = true;
        self
    }

    /// Marks the day as a holiday.
    pub fn holiday(mut self) -> Self {
        self.is_holiday = true;
        self
    }

    /// Whether the day counts as a base day off.
    #[inline]
    pub fn is_off(&self) -> bool {
        self.is_weekend || self.is_holiday
    }
}

/// Calendar for one scheduling period.
///
/// Duplicate rows for the same date are tolerated; every date-level query
/// works on distinct dates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Calendar {
    /// Calendar rows, in input order.
    pub days: Vec<CalendarDay>,
}

impl Calendar {
    /// Creates a calendar from rows.
    pub fn new(days: Vec<CalendarDay>) -> Self {
        Self { days }
    }

    /// Creates a calendar covering `start..=end`, flagging Saturdays and
    /// Sundays as weekend days.
    pub fn from_range(start: NaiveDate, end: NaiveDate) -> Self {
        use chrono::{Datelike, Weekday};

        let days = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| {
                let day = CalendarDay::new(d);
                match d.weekday() {
                    Weekday::Sat | Weekday::Sun => day.weekend(),
                    _ => day,
                }
            })
            .collect();
        Self { days }
    }

    /// Marks `date` as a holiday, if present.
    pub fn with_holiday(mut self, date: NaiveDate) -> Self {
        for day in self.days.iter_mut().filter(|d| d.date == date) {
            day.is_holiday = true;
        }
        self
    }

    /// Distinct dates in chronological order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.date_set().into_iter().collect()
    }

    /// Distinct dates as a set.
    pub fn date_set(&self) -> BTreeSet<NaiveDate> {
        self.days.iter().map(|d| d.date).collect()
    }

    /// Distinct dates flagged as weekend or holiday.
    pub fn off_dates(&self) -> BTreeSet<NaiveDate> {
        self.days
            .iter()
            .filter(|d| d.is_off())
            .map(|d| d.date)
            .collect()
    }

    /// Whether the calendar has no rows.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
