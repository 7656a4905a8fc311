//! Ranked summaries and schedule tables.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Schedule, ShiftCode, ViolationKind};
use crate::scheduler::TrialResult;

/// One line of the top-N ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TopNRow {
    /// 1-based rank.
    pub rank: usize,
    /// Trial seed.
    pub seed: u64,
    /// Total penalty.
    pub total_penalty: u64,
}

/// One line of the violation comparison across top candidates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViolationOverviewRow {
    pub rank: usize,
    pub seed: u64,
    pub total_penalty: u64,
    #[serde(rename = "OFF_REQUEST_VIOLATION_count")]
    pub off_request_count: usize,
    #[serde(rename = "CONSECUTIVE_WORK_count")]
    pub consecutive_work_count: usize,
    #[serde(rename = "NIGHT_IMBALANCE_count")]
    pub night_imbalance_count: usize,
}

/// Unfilled headcount for one (date, shift).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnfilledRow {
    pub date: NaiveDate,
    pub shift: ShiftCode,
    pub count: usize,
}

/// Assigned nurses of one (date, shift), comma-joined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftRosterRow {
    pub date: NaiveDate,
    pub shift: ShiftCode,
    pub nurse_id: String,
}

/// Rank, seed and total for the first `n` ranked trials.
pub fn top_n_summary(trials: &[TrialResult], n: usize) -> Vec<TopNRow> {
    trials
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, t)| TopNRow {
            rank: i + 1,
            seed: t.seed,
            total_penalty: t.total_penalty(),
        })
        .collect()
}

/// Per-category violation counts for the first `n` ranked trials.
pub fn violation_overview(trials: &[TrialResult], n: usize) -> Vec<ViolationOverviewRow> {
    trials
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, t)| ViolationOverviewRow {
            rank: i + 1,
            seed: t.seed,
            total_penalty: t.total_penalty(),
            off_request_count: t.violations.count(ViolationKind::OffRequest),
            consecutive_work_count: t.violations.count(ViolationKind::ConsecutiveWork),
            night_imbalance_count: t.violations.count(ViolationKind::NightImbalance),
        })
        .collect()
}

/// UNFILLED entries grouped by (date, shift), sorted.
pub fn unfilled_summary(schedule: &Schedule) -> Vec<UnfilledRow> {
    let mut counts: BTreeMap<(NaiveDate, ShiftCode), usize> = BTreeMap::new();
    for e in schedule.unfilled() {
        *counts.entry((e.date, e.shift)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((date, shift), count)| UnfilledRow { date, shift, count })
        .collect()
}

/// One row per (date, shift) with at least one assigned nurse.
pub fn schedule_by_shift(schedule: &Schedule) -> Vec<ShiftRosterRow> {
    schedule
        .nurses_by_slot()
        .into_iter()
        .map(|((date, shift), nurses)| ShiftRosterRow {
            date,
            shift,
            nurse_id: nurses.join(", "),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsecutiveWork, ScheduleEntry, ViolationSet};
    use crate::penalty::PenaltyBreakdown;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn trial(seed: u64, total: u64, consecutive: usize) -> TrialResult {
        TrialResult {
            seed,
            schedule: Schedule::new(),
            violations: ViolationSet {
                consecutive_work: (0..consecutive)
                    .map(|i| ConsecutiveWork {
                        nurse_id: "A".into(),
                        date: d(7 + i as u32),
                        streak_length: 7 + i as u32,
                    })
                    .collect(),
                ..Default::default()
            },
            penalty: PenaltyBreakdown {
                off_request: total,
                ..Default::default()
            },
            unfilled_count: 0,
        }
    }

    #[test]
    fn test_top_n_truncates_and_ranks() {
        let trials = vec![trial(4, 10, 0), trial(1, 20, 0), trial(9, 30, 0)];
        let rows = top_n_summary(&trials, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], TopNRow { rank: 1, seed: 4, total_penalty: 10 });
        assert_eq!(rows[1].rank, 2);
        assert_eq!(top_n_summary(&trials, 10).len(), 3);
    }

    #[test]
    fn test_violation_overview_counts() {
        let trials = vec![trial(2, 60, 2)];
        let rows = violation_overview(&trials, 5);
        assert_eq!(rows[0].consecutive_work_count, 2);
        assert_eq!(rows[0].off_request_count, 0);
        assert_eq!(rows[0].total_penalty, 60);
    }

    #[test]
    fn test_unfilled_summary_groups_and_sorts() {
        let mut s = Schedule::new();
        s.push(ScheduleEntry::unfilled(d(2), ShiftCode::Night));
        s.push(ScheduleEntry::unfilled(d(1), ShiftCode::Night));
        s.push(ScheduleEntry::unfilled(d(1), ShiftCode::Night));
        s.push(ScheduleEntry::unfilled(d(1), ShiftCode::Day));
        s.push(ScheduleEntry::assigned(d(1), ShiftCode::Day, "A"));

        let rows = unfilled_summary(&s);
        assert_eq!(
            rows,
            vec![
                UnfilledRow { date: d(1), shift: ShiftCode::Day, count: 1 },
                UnfilledRow { date: d(1), shift: ShiftCode::Night, count: 2 },
                UnfilledRow { date: d(2), shift: ShiftCode::Night, count: 1 },
            ]
        );
    }

    #[test]
    fn test_schedule_by_shift_joins_nurses() {
        let mut s = Schedule::new();
        s.push(ScheduleEntry::assigned(d(1), ShiftCode::Day, "B"));
        s.push(ScheduleEntry::assigned(d(1), ShiftCode::Day, "A"));
        s.push(ScheduleEntry::unfilled(d(1), ShiftCode::Night));
        s.push(ScheduleEntry::assigned(d(1), ShiftCode::Evening, "C"));

        let rows = schedule_by_shift(&s);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].nurse_id, "B, A");
        assert_eq!(rows[1].shift, ShiftCode::Evening);
    }
}
