//! Greedy roster construction and multi-seed orchestration.
//!
//! # Algorithm
//!
//! `GreedyAssigner` fills every required headcount unit in date, then shift
//! order, choosing among eligible nurses by weighted cost with a seeded
//! random tie-break. It is not optimal; quality comes from running many
//! seeds and keeping the lowest-penalty schedules.
//!
//! `Orchestrator` runs those seeds in parallel and ranks the results.
//!
//! # Eligibility
//!
//! Hard rules (one shift a day, monthly quota, night capability, rest after
//! a night) live in [`eligibility`]; soft preferences are cost rules in
//! [`crate::dispatching`].

pub mod eligibility;
mod greedy;
mod orchestrator;

pub use eligibility::{can_assign, check_eligibility, Ineligibility};
pub use greedy::{GreedyAssigner, RosterProblem};
pub use orchestrator::{Orchestrator, RunMode, RunOutcome, TrialResult};
