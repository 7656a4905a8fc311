//! Soft-rule violation records.
//!
//! Violations are data, not errors: a schedule with violations is still a
//! valid candidate, it just scores worse.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ShiftCode;

/// A nurse worked more consecutive days than allowed.
///
/// One record is emitted for every day past the threshold within a streak.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsecutiveWork {
    /// Nurse on the streak.
    pub nurse_id: String,
    /// Date at which the streak had `streak_length` days.
    pub date: NaiveDate,
    /// Streak length on `date`.
    pub streak_length: u32,
}

/// A nurse worked more night shifts than the night-worker average.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NightImbalance {
    /// Over-loaded nurse.
    pub nurse_id: String,
    /// Night shifts worked.
    pub night_count: u32,
    /// Mean night count over nurses with at least one night.
    pub average: f64,
    /// `night_count - average`, always positive.
    pub excess: f64,
}

/// A nurse was assigned on a date they asked to have off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffRequestViolation {
    /// Nurse whose request was ignored.
    pub nurse_id: String,
    /// Requested day off.
    pub date: NaiveDate,
    /// Shift the nurse was assigned instead.
    pub shift: ShiftCode,
}

/// Violation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ViolationKind {
    /// See [`ConsecutiveWork`].
    ConsecutiveWork,
    /// See [`NightImbalance`].
    NightImbalance,
    /// See [`OffRequestViolation`].
    OffRequest,
}

impl ViolationKind {
    /// All kinds, in report order.
    pub const ALL: [ViolationKind; 3] = [
        ViolationKind::ConsecutiveWork,
        ViolationKind::NightImbalance,
        ViolationKind::OffRequest,
    ];

    /// Snake-case key used for export file names.
    pub fn key(&self) -> &'static str {
        match self {
            ViolationKind::ConsecutiveWork => "consecutive_work",
            ViolationKind::NightImbalance => "night_imbalance",
            ViolationKind::OffRequest => "off_request",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViolationKind::ConsecutiveWork => f.write_str("CONSECUTIVE_WORK"),
            ViolationKind::NightImbalance => f.write_str("NIGHT_IMBALANCE"),
            ViolationKind::OffRequest => f.write_str("OFF_REQUEST_VIOLATION"),
        }
    }
}

/// A single violation of any kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ViolationRecord {
    /// Consecutive-work breach.
    ConsecutiveWork(ConsecutiveWork),
    /// Night-load imbalance.
    NightImbalance(NightImbalance),
    /// Ignored day-off request.
    OffRequest(OffRequestViolation),
}

impl ViolationRecord {
    /// Category of this record.
    pub fn kind(&self) -> ViolationKind {
        match self {
            ViolationRecord::ConsecutiveWork(_) => ViolationKind::ConsecutiveWork,
            ViolationRecord::NightImbalance(_) => ViolationKind::NightImbalance,
            ViolationRecord::OffRequest(_) => ViolationKind::OffRequest,
        }
    }

    /// Nurse the record is about.
    pub fn nurse_id(&self) -> &str {
        match self {
            ViolationRecord::ConsecutiveWork(v) => &v.nurse_id,
            ViolationRecord::NightImbalance(v) => &v.nurse_id,
            ViolationRecord::OffRequest(v) => &v.nurse_id,
        }
    }

    /// Human-readable detail line.
    pub fn detail(&self) -> String {
        match self {
            ViolationRecord::ConsecutiveWork(v) => {
                format!("{} consecutive days", v.streak_length)
            }
            ViolationRecord::NightImbalance(v) => format!(
                "{} nights vs average {:.2} (excess {:.2})",
                v.night_count, v.average, v.excess
            ),
            ViolationRecord::OffRequest(_) => "OFF request ignored".to_string(),
        }
    }
}

/// Violations found in one schedule, grouped by category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViolationSet {
    /// Consecutive-work records.
    pub consecutive_work: Vec<ConsecutiveWork>,
    /// Night-imbalance records.
    pub night_imbalance: Vec<NightImbalance>,
    /// Off-request records.
    pub off_request: Vec<OffRequestViolation>,
}

impl ViolationSet {
    /// Record count for one category.
    pub fn count(&self, kind: ViolationKind) -> usize {
        match kind {
            ViolationKind::ConsecutiveWork => self.consecutive_work.len(),
            ViolationKind::NightImbalance => self.night_imbalance.len(),
            ViolationKind::OffRequest => self.off_request.len(),
        }
    }

    /// Total record count.
    pub fn total(&self) -> usize {
        ViolationKind::ALL.iter().map(|k| self.count(*k)).sum()
    }

    /// Whether no violations were found.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Records of one category as tagged values.
    pub fn records(&self, kind: ViolationKind) -> Vec<ViolationRecord> {
        match kind {
            ViolationKind::ConsecutiveWork => self
                .consecutive_work
                .iter()
                .cloned()
                .map(ViolationRecord::ConsecutiveWork)
                .collect(),
            ViolationKind::NightImbalance => self
                .night_imbalance
                .iter()
                .cloned()
                .map(ViolationRecord::NightImbalance)
                .collect(),
            ViolationKind::OffRequest => self
                .off_request
                .iter()
                .cloned()
                .map(ViolationRecord::OffRequest)
                .collect(),
        }
    }

    /// All records as tagged values, grouped in [`ViolationKind::ALL`] order.
    pub fn all_records(&self) -> Vec<ViolationRecord> {
        ViolationKind::ALL
            .iter()
            .flat_map(|k| self.records(*k))
            .collect()
    }
}
