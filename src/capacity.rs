//! Monthly shift quota derivation.
//!
//! The quota is the number of working days in the calendar: distinct
//! dates minus distinct dates flagged as weekend or holiday. Every nurse
//! receives the same quota unless an explicit per-nurse override exists.

use std::collections::HashMap;

use tracing::debug;

use crate::models::{Calendar, Nurse};

/// Derives and applies monthly shift quotas.
#[derive(Debug, Clone, Default)]
pub struct CapacityDeriver {
    overrides: HashMap<String, u32>,
}

impl CapacityDeriver {
    /// Creates a deriver with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the derived quota for one nurse.
    pub fn with_override(mut self, nurse_id: impl Into<String>, max_shifts: u32) -> Self {
        self.overrides.insert(nurse_id.into(), max_shifts);
        self
    }

    /// Replaces the derived quota for several nurses.
    pub fn with_overrides(mut self, overrides: &HashMap<String, u32>) -> Self {
        self.overrides
            .extend(overrides.iter().map(|(k, v)| (k.clone(), *v)));
        self
    }

    /// Working days in the calendar.
    pub fn working_days(calendar: &Calendar) -> u32 {
        let total = calendar.date_set().len();
        let off = calendar.off_dates().len();
        // off dates are a subset of all dates
        (total - off) as u32
    }

    /// Sets `monthly_max_shifts` on every nurse.
    pub fn apply(&self, calendar: &Calendar, nurses: &mut [Nurse]) -> u32 {
        let base = Self::working_days(calendar);
        for nurse in nurses.iter_mut() {
            nurse.monthly_max_shifts = self.overrides.get(&nurse.id).copied().unwrap_or(base);
        }
        debug!(base, overrides = self.overrides.len(), "derived monthly max shifts");
        base
    }
}
