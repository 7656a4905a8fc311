//! Nurse model.
//!
//! Nurses are the resources a roster assigns to shift slots. Each nurse
//! carries a night-shift capability flag and a monthly shift quota that
//! bounds how many slots they can fill within one trial.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A nurse that can be assigned to shift slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nurse {
    /// Unique nurse identifier.
    pub id: String,
    /// Whether the nurse may work night shifts.
    pub night_capable: bool,
    /// Maximum number of assigned slots per trial.
    ///
    /// Zero until set by [`crate::capacity::CapacityDeriver`].
    pub monthly_max_shifts: u32,
    /// Domain-specific metadata carried through from input.
    pub attributes: HashMap<String, String>,
}

impl Nurse {
    /// Creates a nurse who cannot work nights and has no quota yet.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            night_capable: false,
            monthly_max_shifts: 0,
            attributes: HashMap::new(),
        }
    }

    /// Sets the night-shift capability.
    pub fn with_night_capable(mut self, night_capable: bool) -> Self {
        self.night_capable = night_capable;
        self
    }

    /// Sets the monthly quota.
    pub fn with_monthly_max(mut self, monthly_max_shifts: u32) -> Self {
        self.monthly_max_shifts = monthly_max_shifts;
        self
    }

    /// Adds a domain-specific attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}
