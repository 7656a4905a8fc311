//! Multi-seed run orchestration.
//!
//! Runs one greedy trial per seed `0..runs` on a bounded rayon pool, filters
//! and scores the results, and ranks them by total penalty.
//!
//! # Modes
//!
//! - **Strict**: a trial with any UNFILLED slot is discarded before
//!   violation detection.
//! - **Relaxed**: every trial is kept; unfilled slots are penalized.
//!
//! [`Orchestrator::run_with_fallback`] runs strict first and switches to
//! relaxed when nothing survives.
//!
//! # Stopping
//!
//! A cancel flag and an optional wall-clock budget are checked before each
//! trial starts. A trial in progress always runs to completion, so every
//! returned result is exactly what its seed produces.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use super::greedy::{GreedyAssigner, RosterProblem};
use crate::config::RunConfig;
use crate::error::RosterResult;
use crate::models::{Schedule, ViolationSet};
use crate::penalty::{PenaltyBreakdown, PenaltyScorer};
use crate::violations::detect_all;

/// Acceptance mode for trials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RunMode {
    /// Only fully staffed schedules are kept.
    Strict,
    /// Unfilled slots are allowed and penalized.
    Relaxed,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunMode::Strict => f.write_str("STRICT"),
            RunMode::Relaxed => f.write_str("RELAXED"),
        }
    }
}

/// One kept trial.
#[derive(Debug, Clone)]
pub struct TrialResult {
    /// Seed that produced the schedule.
    pub seed: u64,
    /// The schedule itself.
    pub schedule: Schedule,
    /// Soft-rule violations found in it.
    pub violations: ViolationSet,
    /// Penalty per category.
    pub penalty: PenaltyBreakdown,
    /// UNFILLED entries (always 0 in strict mode).
    pub unfilled_count: usize,
}

impl TrialResult {
    /// Total penalty.
    #[inline]
    pub fn total_penalty(&self) -> u64 {
        self.penalty.total()
    }
}

/// Result of one orchestration run.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Mode the trials were run in.
    pub mode: RunMode,
    /// Kept trials, ascending by total penalty.
    pub trials: Vec<TrialResult>,
    /// Trials actually executed.
    pub attempted: u64,
    /// Executed trials rejected by strict mode.
    pub discarded: u64,
    /// Whether cancellation or the time budget cut the run short.
    pub stopped_early: bool,
}

impl RunOutcome {
    /// Lowest-penalty trial.
    pub fn best(&self) -> Option<&TrialResult> {
        self.trials.first()
    }

    /// Trial at 1-based `rank`.
    pub fn rank(&self, rank: usize) -> Option<&TrialResult> {
        rank.checked_sub(1).and_then(|i| self.trials.get(i))
    }

    /// Whether no trial was kept.
    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }
}

enum TrialOutcome {
    Kept(Box<TrialResult>),
    Discarded,
    Skipped,
}

/// Multi-seed orchestrator.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use nurse_roster::config::RunConfig;
/// use nurse_roster::models::{Calendar, Nurse, ShiftCode, ShiftRequirement};
/// use nurse_roster::scheduler::{Orchestrator, RosterProblem, RunMode};
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let nurses = vec![Nurse::new("A").with_monthly_max(5), Nurse::new("B").with_monthly_max(5)];
/// let calendar = Calendar::from_range(day, day);
/// let reqs = vec![ShiftRequirement::new(day, ShiftCode::Day, 1)];
/// let problem = RosterProblem::new(nurses, &calendar, &reqs, vec![]);
///
/// let outcome = Orchestrator::new(&RunConfig::default().with_runs(10))
///     .run(&problem, RunMode::Strict)
///     .unwrap();
/// assert_eq!(outcome.trials.len(), 10);
/// ```
#[derive(Debug, Clone)]
pub struct Orchestrator {
    runs: u64,
    max_consecutive: u32,
    worker_threads: Option<usize>,
    time_limit: Option<Duration>,
    assigner: GreedyAssigner,
    scorer: PenaltyScorer,
    cancel: Option<Arc<AtomicBool>>,
}

impl Orchestrator {
    /// Creates an orchestrator from a run configuration.
    pub fn new(config: &RunConfig) -> Self {
        Self {
            runs: config.runs,
            max_consecutive: config.max_consecutive_days,
            worker_threads: config.worker_threads,
            time_limit: config.time_limit(),
            assigner: GreedyAssigner::with_costs(&config.assignment_costs),
            scorer: PenaltyScorer::new(config.weights).with_max_consecutive(config.max_consecutive_days),
            cancel: None,
        }
    }

    /// Attaches a flag that stops the run before the next trial once set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Replaces the greedy assigner.
    pub fn with_assigner(mut self, assigner: GreedyAssigner) -> Self {
        self.assigner = assigner;
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }

    /// Runs and scores a single seed.
    ///
    /// Returns `None` when `mode` is strict and the schedule has unfilled
    /// slots.
    pub fn run_trial(&self, problem: &RosterProblem, seed: u64, mode: RunMode) -> Option<TrialResult> {
        let schedule = self.assigner.assign(problem, seed);
        let unfilled_count = schedule.unfilled_count();

        if mode == RunMode::Strict && unfilled_count > 0 {
            debug!(seed, unfilled_count, "trial discarded");
            return None;
        }

        let violations = detect_all(&schedule, &problem.requests, self.max_consecutive);
        let scored_unfilled = match mode {
            RunMode::Strict => 0,
            RunMode::Relaxed => unfilled_count,
        };
        let penalty = self.scorer.score(&violations, scored_unfilled);
        debug!(seed, total = penalty.total(), violations = violations.total(), "trial scored");

        Some(TrialResult {
            seed,
            schedule,
            violations,
            penalty,
            unfilled_count,
        })
    }

    /// Runs every seed in `mode` and ranks the kept trials.
    pub fn run(&self, problem: &RosterProblem, mode: RunMode) -> RosterResult<RunOutcome> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.worker_threads.unwrap_or(0))
            .build()?;

        let started = Instant::now();
        let deadline = self.time_limit.map(|limit| started + limit);
        let stopped = AtomicBool::new(false);
        let attempted = AtomicU64::new(0);

        let outcomes: Vec<TrialOutcome> = pool.install(|| {
            (0..self.runs)
                .into_par_iter()
                .map(|seed| {
                    let out_of_time = deadline.is_some_and(|d| Instant::now() >= d);
                    if stopped.load(Ordering::Relaxed) || out_of_time || self.is_cancelled() {
                        stopped.store(true, Ordering::Relaxed);
                        return TrialOutcome::Skipped;
                    }
                    attempted.fetch_add(1, Ordering::Relaxed);
                    match self.run_trial(problem, seed, mode) {
                        Some(result) => TrialOutcome::Kept(Box::new(result)),
                        None => TrialOutcome::Discarded,
                    }
                })
                .collect()
        });

        let mut trials = Vec::new();
        let mut discarded = 0u64;
        for outcome in outcomes {
            match outcome {
                TrialOutcome::Kept(result) => trials.push(*result),
                TrialOutcome::Discarded => discarded += 1,
                TrialOutcome::Skipped => {}
            }
        }
        trials.sort_by_key(TrialResult::total_penalty);

        let outcome = RunOutcome {
            mode,
            trials,
            attempted: attempted.into_inner(),
            discarded,
            stopped_early: stopped.into_inner(),
        };

        info!(
            %mode,
            attempted = outcome.attempted,
            kept = outcome.trials.len(),
            discarded = outcome.discarded,
            stopped_early = outcome.stopped_early,
            best = outcome.best().map(TrialResult::total_penalty),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "orchestration finished"
        );

        Ok(outcome)
    }

    /// Runs strict mode, then relaxed mode if strict kept nothing.
    ///
    /// A cancelled strict run is returned as is.
    pub fn run_with_fallback(&self, problem: &RosterProblem) -> RosterResult<RunOutcome> {
        let strict = self.run(problem, RunMode::Strict)?;
        if !strict.is_empty() || self.is_cancelled() {
            return Ok(strict);
        }
        info!(runs = self.runs, "no fully staffed schedule, retrying relaxed");
        self.run(problem, RunMode::Relaxed)
    }
}
