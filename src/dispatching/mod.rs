//! Cost rules and rule engine for nurse selection.
//!
//! When a slot has several eligible nurses, each candidate is priced by a
//! weighted sum of cost rules and the cheapest wins. Ties are broken by a
//! seeded uniform draw, so equally good nurses are chosen evenly across
//! trials rather than by identifier order.
//!
//! # Usage
//!
//! ```
//! use nurse_roster::dispatching::{rules, RuleEngine};
//!
//! let engine = RuleEngine::new()
//!     .with_weighted_rule(rules::OffRequest, 1000)
//!     .with_weighted_rule(rules::ShiftAvoid, 50)
//!     .with_rule(rules::Load);
//! ```

mod context;
mod engine;
pub mod rules;

pub use context::{AssignmentContext, Slot};
pub use engine::RuleEngine;

use crate::models::Nurse;
use std::fmt::Debug;

/// Cost returned by a rule.
///
/// Lower cost = more preferred candidate.
pub type RuleCost = u64;

/// A rule that prices placing a nurse on a slot.
///
/// # Cost Convention
/// **Lower cost = higher preference.** Rules return a raw, unweighted
/// cost; the engine applies the weight.
pub trait CostRule: Send + Sync + Debug {
    /// Rule name (e.g., "OFF_REQUEST").
    fn name(&self) -> &'static str;

    /// Evaluates the raw cost of assigning `nurse` to `slot`.
    fn evaluate(&self, nurse: &Nurse, slot: &Slot, context: &AssignmentContext<'_>) -> RuleCost;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}
