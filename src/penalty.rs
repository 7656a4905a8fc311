//! Penalty scoring.
//!
//! Converts a [`ViolationSet`] and an unfilled-slot count into a weighted
//! total plus a per-category breakdown.
//!
//! # Categories
//!
//! | Category | Contribution |
//! |----------|--------------|
//! | OFF_REQUEST | records × `OFF_REQUEST_VIOLATION` |
//! | CONSECUTIVE_WORK | Σ max(0, streak − threshold) × `CONSECUTIVE_WORK_PER_DAY` |
//! | NIGHT_IMBALANCE | ⌊Σ excess × `NIGHT_EXCESS_PER_SHIFT`⌋ |
//! | UNFILLED | unfilled × `UNFILLED_SLOT` |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::config::PenaltyWeights;
use crate::models::ViolationSet;
use crate::violations::DEFAULT_MAX_CONSECUTIVE_DAYS;

/// Slack used when truncating the night sum, absorbing float noise such as
/// 2.9999999999 for an exact 3.
const NIGHT_TRUNCATION_EPSILON: f64 = 1e-9;

/// Penalty category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PenaltyCategory {
    /// Ignored day-off requests.
    OffRequest,
    /// Days worked past the streak threshold.
    ConsecutiveWork,
    /// Night shifts above the night-worker mean.
    NightImbalance,
    /// Slots left without a nurse.
    Unfilled,
}

impl PenaltyCategory {
    /// All categories in display order.
    pub const ALL: [PenaltyCategory; 4] = [
        PenaltyCategory::OffRequest,
        PenaltyCategory::ConsecutiveWork,
        PenaltyCategory::NightImbalance,
        PenaltyCategory::Unfilled,
    ];

    /// Stable key.
    pub fn key(&self) -> &'static str {
        match self {
            PenaltyCategory::OffRequest => "OFF_REQUEST",
            PenaltyCategory::ConsecutiveWork => "CONSECUTIVE_WORK",
            PenaltyCategory::NightImbalance => "NIGHT_IMBALANCE",
            PenaltyCategory::Unfilled => "UNFILLED",
        }
    }
}

impl fmt::Display for PenaltyCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Penalty of one trial, per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PenaltyBreakdown {
    /// Off-request contribution.
    pub off_request: u64,
    /// Consecutive-work contribution.
    pub consecutive_work: u64,
    /// Night-imbalance contribution.
    pub night_imbalance: u64,
    /// Unfilled-slot contribution.
    pub unfilled: u64,
}

impl PenaltyBreakdown {
    /// Sum of all categories.
    pub fn total(&self) -> u64 {
        self.off_request
            .saturating_add(self.consecutive_work)
            .saturating_add(self.night_imbalance)
            .saturating_add(self.unfilled)
    }

    /// Contribution of one category.
    pub fn get(&self, category: PenaltyCategory) -> u64 {
        match category {
            PenaltyCategory::OffRequest => self.off_request,
            PenaltyCategory::ConsecutiveWork => self.consecutive_work,
            PenaltyCategory::NightImbalance => self.night_imbalance,
            PenaltyCategory::Unfilled => self.unfilled,
        }
    }

    /// Category key → contribution.
    pub fn as_map(&self) -> BTreeMap<&'static str, u64> {
        PenaltyCategory::ALL
            .iter()
            .map(|c| (c.key(), self.get(*c)))
            .collect()
    }
}

/// Weighted penalty scorer.
///
/// # Example
/// ```
/// use nurse_roster::config::PenaltyWeights;
/// use nurse_roster::models::ViolationSet;
/// use nurse_roster::penalty::PenaltyScorer;
///
/// let scorer = PenaltyScorer::new(PenaltyWeights::default());
/// let breakdown = scorer.score(&ViolationSet::default(), 2);
/// assert_eq!(breakdown.unfilled, 400);
/// assert_eq!(breakdown.total(), 400);
/// ```
#[derive(Debug, Clone)]
pub struct PenaltyScorer {
    weights: PenaltyWeights,
    max_consecutive: u32,
}

impl PenaltyScorer {
    /// Creates a scorer with the default streak threshold.
    pub fn new(weights: PenaltyWeights) -> Self {
        Self {
            weights,
            max_consecutive: DEFAULT_MAX_CONSECUTIVE_DAYS,
        }
    }

    /// Sets the streak threshold subtracted from each consecutive-work record.
    pub fn with_max_consecutive(mut self, max_consecutive: u32) -> Self {
        self.max_consecutive = max_consecutive;
        self
    }

    /// Weights in use.
    pub fn weights(&self) -> &PenaltyWeights {
        &self.weights
    }

    /// Scores one trial.
    ///
    /// The night term tolerates float error just below an integer before
    /// truncating, unlike a plain cast: 1.9999999999999996 scores 2.
    pub fn score(&self, violations: &ViolationSet, unfilled: usize) -> PenaltyBreakdown {
        let w = &self.weights;

        let off_request = (violations.off_request.len() as u64)
            .saturating_mul(u64::from(w.off_request_violation));

        let consecutive_work = violations
            .consecutive_work
            .iter()
            .map(|v| {
                u64::from(v.streak_length.saturating_sub(self.max_consecutive))
                    .saturating_mul(u64::from(w.consecutive_work_per_day))
            })
            .fold(0, u64::saturating_add);

        let night_sum: f64 = violations
            .night_imbalance
            .iter()
            .map(|v| v.excess * f64::from(w.night_excess_per_shift))
            .sum();
        let night_imbalance = truncate_penalty(night_sum);

        let unfilled = (unfilled as u64).saturating_mul(u64::from(w.unfilled_slot));

        PenaltyBreakdown {
            off_request,
            consecutive_work,
            night_imbalance,
            unfilled,
        }
    }
}

/// Truncates toward zero, treating values within epsilon below an integer as
/// that integer.
fn truncate_penalty(value: f64) -> u64 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    (value + NIGHT_TRUNCATION_EPSILON).trunc() as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ConsecutiveWork, NightImbalance, OffRequestViolation, ShiftCode};
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn sample() -> ViolationSet {
        ViolationSet {
            consecutive_work: vec![
                ConsecutiveWork { nurse_id: "A".into(), date: d(7), streak_length: 7 },
                ConsecutiveWork { nurse_id: "A".into(), date: d(8), streak_length: 8 },
            ],
            night_imbalance: vec![
                NightImbalance { nurse_id: "B".into(), night_count: 2, average: 1.33, excess: 2.0 - 4.0 / 3.0 },
                NightImbalance { nurse_id: "C".into(), night_count: 2, average: 1.33, excess: 2.0 - 4.0 / 3.0 },
            ],
            off_request: vec![OffRequestViolation { nurse_id: "A".into(), date: d(1), shift: ShiftCode::Day }],
        }
    }

    #[test]
    fn test_default_weights_breakdown() {
        let b = PenaltyScorer::new(PenaltyWeights::default()).score(&sample(), 1);
        assert_eq!(b.off_request, 100);
        assert_eq!(b.consecutive_work, (1 + 2) * 30);
        // 2 × (2/3) × 20 = 26.67 → 26
        assert_eq!(b.night_imbalance, 26);
        assert_eq!(b.unfilled, 200);
        assert_eq!(b.total(), 100 + 90 + 26 + 200);
    }

    #[test]
    fn test_night_sum_rounded_once() {
        // three records of 1/3 excess at weight 3 sum to exactly 3, each alone would truncate to 0
        let third = NightImbalance { nurse_id: "X".into(), night_count: 1, average: 0.67, excess: 1.0 / 3.0 };
        let set = ViolationSet {
            night_imbalance: vec![third.clone(), third.clone(), third],
            ..Default::default()
        };
        let weights = PenaltyWeights { night_excess_per_shift: 3, ..Default::default() };
        assert_eq!(PenaltyScorer::new(weights).score(&set, 0).night_imbalance, 3);
    }

    #[test]
    fn test_night_sum_just_below_integer_not_lost() {
        // counts (1, 2, 2): each of the two records carries 1/3 excess
        let excess = 2.0 - 5.0 / 3.0;
        let raw = excess * 3.0 + excess * 3.0;
        assert!(raw < 2.0);

        let over = NightImbalance { nurse_id: "B".into(), night_count: 2, average: 1.67, excess };
        let set = ViolationSet {
            night_imbalance: vec![over.clone(), NightImbalance { nurse_id: "C".into(), ..over }],
            ..Default::default()
        };
        let weights = PenaltyWeights { night_excess_per_shift: 3, ..Default::default() };
        assert_eq!(PenaltyScorer::new(weights).score(&set, 0).night_imbalance, 2);
    }

    #[test]
    fn test_consecutive_clipped_at_threshold() {
        let set = ViolationSet {
            consecutive_work: vec![ConsecutiveWork { nurse_id: "A".into(), date: d(5), streak_length: 5 }],
            ..Default::default()
        };
        let scorer = PenaltyScorer::new(PenaltyWeights::default());
        assert_eq!(scorer.score(&set, 0).consecutive_work, 0);
        assert_eq!(scorer.with_max_consecutive(3).score(&set, 0).consecutive_work, 60);
    }

    #[test]
    fn test_single_unfilled_slot() {
        let b = PenaltyScorer::new(PenaltyWeights::default()).score(&ViolationSet::default(), 1);
        assert_eq!(b.total(), PenaltyWeights::default().unfilled_slot as u64);
    }

    #[test]
    fn test_total_monotone_in_each_weight() {
        let set = sample();
        let base = PenaltyWeights::default();
        let base_total = PenaltyScorer::new(base).score(&set, 2).total();

        let bumped = [
            PenaltyWeights { off_request_violation: base.off_request_violation + 7, ..base },
            PenaltyWeights { consecutive_work_per_day: base.consecutive_work_per_day + 7, ..base },
            PenaltyWeights { night_excess_per_shift: base.night_excess_per_shift + 7, ..base },
            PenaltyWeights { unfilled_slot: base.unfilled_slot + 7, ..base },
        ];
        for w in bumped {
            assert!(PenaltyScorer::new(w).score(&set, 2).total() >= base_total);
        }
    }

    #[test]
    fn test_zero_weights_zero_total() {
        let w = PenaltyWeights {
            off_request_violation: 0,
            consecutive_work_per_day: 0,
            night_excess_per_shift: 0,
            unfilled_slot: 0,
        };
        assert_eq!(PenaltyScorer::new(w).score(&sample(), 5).total(), 0);
    }

    #[test]
    fn test_as_map_keys() {
        let map = PenaltyBreakdown { off_request: 1, consecutive_work: 2, night_imbalance: 3, unfilled: 4 }.as_map();
        assert_eq!(map.len(), 4);
        assert_eq!(map["UNFILLED"], 4);
        assert_eq!(map["OFF_REQUEST"], 1);
    }
}
