//! Seeded greedy roster builder.
//!
//! # Algorithm
//!
//! 1. Walk dates chronologically, and within a date the shifts in
//!    [`ShiftCode::PROCESSING_ORDER`].
//! 2. For each required headcount unit, collect the nurses passing every
//!    eligibility rule.
//! 3. No candidate → emit an UNFILLED entry and move on.
//! 4. Otherwise pick the cheapest candidate via the rule engine, ties
//!    broken by the seeded generator, and record the assignment.
//!
//! The seed only drives tie-breaking; a fixed seed and fixed input give a
//! byte-identical schedule.
//!
//! # Complexity
//! O(u * n) where u = total required units, n = nurses.

use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, enabled, Level};

use super::eligibility::{check_eligibility, Ineligibility};
use crate::config::AssignmentCosts;
use crate::dispatching::{AssignmentContext, RuleEngine, Slot};
use crate::error::RosterResult;
use crate::models::{
    requirement_map, Calendar, Nurse, Request, Schedule, ScheduleEntry, ShiftCode,
    ShiftRequirement,
};
use crate::requests::RequestIndex;
use crate::validation::validate_input;

/// Input container for rostering.
///
/// Built once per run and shared read-only by every trial.
#[derive(Debug, Clone)]
pub struct RosterProblem {
    /// Nurses in input order, quotas already applied.
    pub nurses: Vec<Nurse>,
    /// Distinct calendar dates, ascending.
    pub dates: Vec<NaiveDate>,
    /// Headcount per (date, shift).
    pub requirements: HashMap<(NaiveDate, ShiftCode), u32>,
    /// Raw requests (kept for the off-request violation scan).
    pub requests: Vec<Request>,
    /// Lookups derived from `requests`.
    pub request_index: RequestIndex,
}

impl RosterProblem {
    /// Assembles a problem without validation.
    pub fn new(
        nurses: Vec<Nurse>,
        calendar: &Calendar,
        requirements: &[ShiftRequirement],
        requests: Vec<Request>,
    ) -> Self {
        let request_index = RequestIndex::build(&requests);
        Self {
            nurses,
            dates: calendar.dates(),
            requirements: requirement_map(requirements),
            requests,
            request_index,
        }
    }

    /// Validates the input and assembles a problem.
    ///
    /// Fails with every detected issue before any trial can run.
    pub fn validated(
        nurses: Vec<Nurse>,
        calendar: &Calendar,
        requirements: &[ShiftRequirement],
        requests: Vec<Request>,
    ) -> RosterResult<Self> {
        validate_input(&nurses, calendar, requirements, &requests)?;
        Ok(Self::new(nurses, calendar, requirements, requests))
    }

    /// Total required headcount units.
    pub fn total_units(&self) -> u64 {
        self.requirements.values().map(|&n| u64::from(n)).sum()
    }

    /// Whether `nurse_id` belongs to the roster.
    pub fn has_nurse(&self, nurse_id: &str) -> bool {
        self.nurses.iter().any(|n| n.id == nurse_id)
    }

    /// Required headcount for one (date, shift); 0 when absent.
    #[inline]
    pub fn required(&self, date: NaiveDate, shift: ShiftCode) -> u32 {
        self.requirements.get(&(date, shift)).copied().unwrap_or(0)
    }
}

/// Greedy roster builder.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use nurse_roster::models::{Calendar, Nurse, ShiftCode, ShiftRequirement};
/// use nurse_roster::scheduler::{GreedyAssigner, RosterProblem};
///
/// let day = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
/// let nurses = vec![Nurse::new("A").with_monthly_max(5)];
/// let calendar = Calendar::from_range(day, day);
/// let reqs = vec![ShiftRequirement::new(day, ShiftCode::Day, 1)];
/// let problem = RosterProblem::new(nurses, &calendar, &reqs, vec![]);
///
/// let schedule = GreedyAssigner::new().assign(&problem, 0);
/// assert_eq!(schedule.len(), 1);
/// assert!(schedule.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct GreedyAssigner {
    engine: RuleEngine,
}

impl GreedyAssigner {
    /// Creates an assigner with the standard cost weights.
    pub fn new() -> Self {
        Self::with_costs(&AssignmentCosts::default())
    }

    /// Creates an assigner with custom cost weights.
    pub fn with_costs(costs: &AssignmentCosts) -> Self {
        Self {
            engine: RuleEngine::standard(costs),
        }
    }

    /// Creates an assigner with a custom rule engine.
    pub fn with_rule_engine(engine: RuleEngine) -> Self {
        Self { engine }
    }

    /// Builds one complete schedule for `seed`.
    pub fn assign(&self, problem: &RosterProblem, seed: u64) -> Schedule {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut context = AssignmentContext::new(&problem.request_index);
        let mut schedule = Schedule::new();
        let mut candidates: Vec<&Nurse> = Vec::with_capacity(problem.nurses.len());

        for &date in &problem.dates {
            for shift in ShiftCode::PROCESSING_ORDER {
                let slot = Slot::new(date, shift);

                for _ in 0..problem.required(date, shift) {
                    candidates.clear();
                    candidates.extend(
                        problem
                            .nurses
                            .iter()
                            .filter(|n| check_eligibility(n, &slot, &context).is_ok()),
                    );

                    match self.engine.select(&candidates, &slot, &context, &mut rng) {
                        Some(i) => {
                            let chosen = candidates[i];
                            context.record(&chosen.id, slot);
                            schedule.push(ScheduleEntry::assigned(date, shift, chosen.id.as_str()));
                        }
                        None => {
                            if enabled!(Level::DEBUG) {
                                debug!(
                                    seed,
                                    %date,
                                    %shift,
                                    reasons = ?rejection_reasons(&problem.nurses, &slot, &context),
                                    "slot unfilled"
                                );
                            }
                            schedule.push(ScheduleEntry::unfilled(date, shift));
                        }
                    }
                }
            }
        }

        schedule
    }
}

impl Default for GreedyAssigner {
    fn default() -> Self {
        Self::new()
    }
}

/// Tally of why each nurse was rejected for a slot.
fn rejection_reasons(
    nurses: &[Nurse],
    slot: &Slot,
    context: &AssignmentContext<'_>,
) -> BTreeMap<Ineligibility, usize> {
    let mut reasons = BTreeMap::new();
    for nurse in nurses {
        if let Err(reason) = check_eligibility(nurse, slot, context) {
            *reasons.entry(reason).or_insert(0) += 1;
        }
    }
    reasons
}
