//! Run configuration.
//!
//! Loaded from JSON; every field is optional and falls back to the
//! defaults below.
//!
//! ```json
//! {
//!   "runs": 200,
//!   "weights": { "OFF_REQUEST_VIOLATION": 150, "UNFILLED_SLOT": 300 },
//!   "worker_threads": 4,
//!   "capacity_overrides": { "N07": 12 }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use crate::error::RosterResult;

/// Penalty weights per violation category.
///
/// Exactly the four keys below are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PenaltyWeights {
    /// Per ignored day-off request.
    #[serde(rename = "OFF_REQUEST_VIOLATION")]
    pub off_request_violation: u32,
    /// Per day beyond the consecutive-work threshold.
    #[serde(rename = "CONSECUTIVE_WORK_PER_DAY")]
    pub consecutive_work_per_day: u32,
    /// Per night shift above the night-worker average.
    #[serde(rename = "NIGHT_EXCESS_PER_SHIFT")]
    pub night_excess_per_shift: u32,
    /// Per unfilled slot (relaxed mode only).
    #[serde(rename = "UNFILLED_SLOT")]
    pub unfilled_slot: u32,
}

impl Default for PenaltyWeights {
    fn default() -> Self {
        Self {
            off_request_violation: 100,
            consecutive_work_per_day: 30,
            night_excess_per_shift: 20,
            unfilled_slot: 200,
        }
    }
}

/// Weights of the greedy assignment cost terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentCosts {
    /// Added when the nurse asked for the date off.
    pub off_request: u64,
    /// Added when the nurse asked to avoid the shift.
    pub shift_avoid: u64,
    /// Multiplies the nurse's running assignment count.
    pub load: u64,
}

impl Default for AssignmentCosts {
    fn default() -> Self {
        Self {
            off_request: 1000,
            shift_avoid: 50,
            load: 1,
        }
    }
}

/// Top-level run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Number of seeded trials per orchestration run.
    pub runs: u64,
    /// Penalty weights.
    pub weights: PenaltyWeights,
    /// Longest allowed streak of consecutive working days.
    pub max_consecutive_days: u32,
    /// Greedy cost weights.
    pub assignment_costs: AssignmentCosts,
    /// Worker threads for trials. `None` = rayon default.
    pub worker_threads: Option<usize>,
    /// Wall-clock budget in seconds, checked between trials.
    pub time_limit_secs: Option<u64>,
    /// Per-nurse monthly quota replacing the derived value.
    pub capacity_overrides: HashMap<String, u32>,
    /// Number of candidates shown in summaries.
    pub top_n: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            runs: 100,
            weights: PenaltyWeights::default(),
            max_consecutive_days: crate::violations::DEFAULT_MAX_CONSECUTIVE_DAYS,
            assignment_costs: AssignmentCosts::default(),
            worker_threads: None,
            time_limit_secs: None,
            capacity_overrides: HashMap::new(),
            top_n: 5,
        }
    }
}

impl RunConfig {
    /// Parses a configuration from JSON text.
    pub fn from_json_str(json: &str) -> RosterResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> RosterResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Wall-clock budget, if configured.
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs.map(Duration::from_secs)
    }

    /// Sets the number of trials.
    pub fn with_runs(mut self, runs: u64) -> Self {
        self.runs = runs;
        self
    }

    /// Sets the penalty weights.
    pub fn with_weights(mut self, weights: PenaltyWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Sets the worker thread count.
    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }
}
