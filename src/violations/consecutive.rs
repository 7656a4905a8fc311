//! Consecutive-work detection.

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{ConsecutiveWork, Schedule};

/// Longest allowed run of working days.
pub const DEFAULT_MAX_CONSECUTIVE_DAYS: u32 = 6;

/// Finds every day on which a nurse's working streak exceeds `max_consecutive`.
///
/// Streaks are counted over the nurse's distinct ASSIGNED dates; any gap
/// other than exactly one day restarts the count at 1. A streak of
/// `max_consecutive + k` yields `k` records, one per day past the limit.
///
/// Output is ordered by nurse id, then date.
pub fn consecutive_work(schedule: &Schedule, max_consecutive: u32) -> Vec<ConsecutiveWork> {
    let mut dates_by_nurse: BTreeMap<&str, Vec<NaiveDate>> = BTreeMap::new();
    for (entry, nurse) in schedule.assigned() {
        dates_by_nurse.entry(nurse).or_default().push(entry.date);
    }

    let mut violations = Vec::new();
    for (nurse, mut dates) in dates_by_nurse {
        dates.sort_unstable();
        dates.dedup();

        let mut streak: u32 = 1;
        for pair in dates.windows(2) {
            if (pair[1] - pair[0]).num_days() == 1 {
                streak += 1;
                if streak > max_consecutive {
                    violations.push(ConsecutiveWork {
                        nurse_id: nurse.to_string(),
                        date: pair[1],
                        streak_length: streak,
                    });
                }
            } else {
                streak = 1;
            }
        }
    }
    violations
}
