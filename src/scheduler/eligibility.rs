//! Hard eligibility rules.
//!
//! Checked in a fixed order; the first failing rule is reported.
//!
//! | # | Rule |
//! |---|------|
//! | 1 | At most one shift per nurse per date |
//! | 2 | Monthly quota not yet reached |
//! | 3 | Night shifts need a night-capable nurse |
//! | 4 | No Day shift on the date right after a Night shift |

use chrono::Duration;
use std::fmt;

use crate::dispatching::{AssignmentContext, Slot};
use crate::models::{Nurse, ShiftCode};

/// Why a nurse cannot take a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ineligibility {
    /// The nurse already works a shift on this date.
    AlreadyAssigned,
    /// The nurse reached `monthly_max_shifts`.
    MonthlyCapReached,
    /// Night slot, nurse is not night-capable.
    NotNightCapable,
    /// Day slot, nurse worked the night before.
    RestAfterNight,
}

impl fmt::Display for Ineligibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Ineligibility::AlreadyAssigned => "already assigned today",
            Ineligibility::MonthlyCapReached => "monthly cap reached",
            Ineligibility::NotNightCapable => "not night-capable",
            Ineligibility::RestAfterNight => "rest after night shift",
        };
        f.write_str(s)
    }
}

/// Checks every hard rule for placing `nurse` on `slot`.
pub fn check_eligibility(
    nurse: &Nurse,
    slot: &Slot,
    context: &AssignmentContext<'_>,
) -> Result<(), Ineligibility> {
    if context.is_assigned_on(&nurse.id, slot.date) {
        return Err(Ineligibility::AlreadyAssigned);
    }

    if context.assigned_count(&nurse.id) >= nurse.monthly_max_shifts {
        return Err(Ineligibility::MonthlyCapReached);
    }

    if slot.shift == ShiftCode::Night && !nurse.night_capable {
        return Err(Ineligibility::NotNightCapable);
    }

    if slot.shift == ShiftCode::Day {
        let previous = slot.date - Duration::days(1);
        if context.shift_on(&nurse.id, previous) == Some(ShiftCode::Night) {
            return Err(Ineligibility::RestAfterNight);
        }
    }

    Ok(())
}

/// Whether `nurse` may take `slot`.
#[inline]
pub fn can_assign(nurse: &Nurse, slot: &Slot, context: &AssignmentContext<'_>) -> bool {
    check_eligibility(nurse, slot, context).is_ok()
}
