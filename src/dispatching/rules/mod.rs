//! Built-in cost rules.
//!
//! Each rule returns a raw cost; the [`super::RuleEngine`] multiplies it
//! by the rule weight. Lower total cost = preferred candidate.

use super::{AssignmentContext, CostRule, RuleCost, Slot};
use crate::models::Nurse;

/// 1 when the nurse asked for the slot's date off, else 0.
#[derive(Debug, Clone, Copy)]
pub struct OffRequest;

impl CostRule for OffRequest {
    fn name(&self) -> &'static str {
        "OFF_REQUEST"
    }

    fn evaluate(&self, nurse: &Nurse, slot: &Slot, context: &AssignmentContext<'_>) -> RuleCost {
        RuleCost::from(context.requests.has_off_request(&nurse.id, slot.date))
    }

    fn description(&self) -> &'static str {
        "Nurse requested the day off"
    }
}

/// 1 when the nurse asked to avoid the slot's shift on its date, else 0.
#[derive(Debug, Clone, Copy)]
pub struct ShiftAvoid;

impl CostRule for ShiftAvoid {
    fn name(&self) -> &'static str {
        "SHIFT_AVOID"
    }

    fn evaluate(&self, nurse: &Nurse, slot: &Slot, context: &AssignmentContext<'_>) -> RuleCost {
        RuleCost::from(context.requests.avoids(&nurse.id, slot.date, slot.shift))
    }

    fn description(&self) -> &'static str {
        "Nurse requested to avoid this shift"
    }
}

/// Number of slots the nurse already holds in this trial.
///
/// Spreads assignments toward the least-loaded nurses.
#[derive(Debug, Clone, Copy)]
pub struct Load;

impl CostRule for Load {
    fn name(&self) -> &'static str {
        "LOAD"
    }

    fn evaluate(&self, nurse: &Nurse, _slot: &Slot, context: &AssignmentContext<'_>) -> RuleCost {
        RuleCost::from(context.assigned_count(&nurse.id))
    }

    fn description(&self) -> &'static str {
        "Running assignment count"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Request, ShiftCode};
    use crate::requests::RequestIndex;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn test_off_request_rule() {
        let idx = RequestIndex::build(&[Request::off("A", d(1))]);
        let ctx = AssignmentContext::new(&idx);
        let slot = Slot::new(d(1), ShiftCode::Day);
        assert_eq!(OffRequest.evaluate(&Nurse::new("A"), &slot, &ctx), 1);
        assert_eq!(OffRequest.evaluate(&Nurse::new("B"), &slot, &ctx), 0);
    }

    #[test]
    fn test_shift_avoid_rule() {
        let idx = RequestIndex::build(&[Request::avoid("A", d(1), "N")]);
        let ctx = AssignmentContext::new(&idx);
        let nurse = Nurse::new("A");
        assert_eq!(ShiftAvoid.evaluate(&nurse, &Slot::new(d(1), ShiftCode::Night), &ctx), 1);
        assert_eq!(ShiftAvoid.evaluate(&nurse, &Slot::new(d(1), ShiftCode::Day), &ctx), 0);
        assert_eq!(ShiftAvoid.evaluate(&nurse, &Slot::new(d(2), ShiftCode::Night), &ctx), 0);
    }

    #[test]
    fn test_load_rule() {
        let idx = RequestIndex::default();
        let mut ctx = AssignmentContext::new(&idx);
        ctx.record("A", Slot::new(d(1), ShiftCode::Day));
        ctx.record("A", Slot::new(d(2), ShiftCode::Day));
        let slot = Slot::new(d(3), ShiftCode::Day);
        assert_eq!(Load.evaluate(&Nurse::new("A"), &slot, &ctx), 2);
        assert_eq!(Load.evaluate(&Nurse::new("B"), &slot, &ctx), 0);
    }
}
