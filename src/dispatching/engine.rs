//! Rule engine for candidate selection.
//!
//! Combines weighted cost rules into a single cost per candidate and picks
//! the cheapest one, breaking ties with a seeded random draw.

use rand::Rng;
use std::sync::Arc;

use super::{rules, AssignmentContext, CostRule, RuleCost, Slot};
use crate::config::AssignmentCosts;
use crate::models::Nurse;

#[derive(Clone)]
struct WeightedRule {
    rule: Arc<dyn CostRule>,
    weight: RuleCost,
}

/// A composable, weighted-sum cost engine.
///
/// # Example
/// ```
/// use nurse_roster::config::AssignmentCosts;
/// use nurse_roster::dispatching::{rules, RuleEngine};
///
/// let engine = RuleEngine::new()
///     .with_weighted_rule(rules::OffRequest, 1000)
///     .with_weighted_rule(rules::ShiftAvoid, 50)
///     .with_rule(rules::Load);
/// assert_eq!(engine.rule_names(), RuleEngine::standard(&AssignmentCosts::default()).rule_names());
/// ```
#[derive(Clone)]
pub struct RuleEngine {
    rules: Vec<WeightedRule>,
}

impl RuleEngine {
    /// Creates an empty rule engine (every candidate costs 0).
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The off-request / shift-avoid / load engine with the given weights.
    pub fn standard(costs: &AssignmentCosts) -> Self {
        Self::new()
            .with_weighted_rule(rules::OffRequest, costs.off_request)
            .with_weighted_rule(rules::ShiftAvoid, costs.shift_avoid)
            .with_weighted_rule(rules::Load, costs.load)
    }

    /// Adds a rule with weight 1.
    pub fn with_rule<R: CostRule + 'static>(self, rule: R) -> Self {
        self.with_weighted_rule(rule, 1)
    }

    /// Adds a weighted rule.
    pub fn with_weighted_rule<R: CostRule + 'static>(mut self, rule: R, weight: RuleCost) -> Self {
        self.rules.push(WeightedRule {
            rule: Arc::new(rule),
            weight,
        });
        self
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|wr| wr.rule.name()).collect()
    }

    /// Total weighted cost of placing `nurse` on `slot`.
    pub fn cost(&self, nurse: &Nurse, slot: &Slot, context: &AssignmentContext<'_>) -> RuleCost {
        self.rules
            .iter()
            .map(|wr| wr.rule.evaluate(nurse, slot, context).saturating_mul(wr.weight))
            .fold(0, RuleCost::saturating_add)
    }

    /// Weighted cost contribution of each rule.
    pub fn evaluate(
        &self,
        nurse: &Nurse,
        slot: &Slot,
        context: &AssignmentContext<'_>,
    ) -> Vec<(&'static str, RuleCost)> {
        self.rules
            .iter()
            .map(|wr| {
                (
                    wr.rule.name(),
                    wr.rule.evaluate(nurse, slot, context).saturating_mul(wr.weight),
                )
            })
            .collect()
    }

    /// Returns the index of the cheapest candidate.
    ///
    /// One uniform draw is taken from `rng` for every candidate, in slice
    /// order, and the pair `(cost, draw)` is minimized. Equal-cost
    /// candidates therefore win with equal probability, independent of
    /// their position or identifier.
    pub fn select<R: Rng>(
        &self,
        candidates: &[&Nurse],
        slot: &Slot,
        context: &AssignmentContext<'_>,
        rng: &mut R,
    ) -> Option<usize> {
        let mut best: Option<(usize, RuleCost, f64)> = None;

        for (i, nurse) in candidates.iter().enumerate() {
            let cost = self.cost(nurse, slot, context);
            let draw: f64 = rng.random();

            let better = match best {
                None => true,
                Some((_, best_cost, best_draw)) => {
                    cost < best_cost || (cost == best_cost && draw < best_draw)
                }
            };
            if better {
                best = Some((i, cost, draw));
            }
        }

        best.map(|(i, _, _)| i)
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field(
                "rules",
                &self
                    .rules
                    .iter()
                    .map(|r| format!("{}(w={})", r.rule.name(), r.weight))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
