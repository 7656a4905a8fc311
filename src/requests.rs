//! Request index.
//!
//! Converts request rows into O(1) lookups used by the greedy cost rules
//! and the off-request violation scan.

use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

use crate::models::{Request, RequestType, ShiftCode};

/// Fast lookups over nurse requests.
#[derive(Debug, Clone, Default)]
pub struct RequestIndex {
    off_requests: HashMap<String, HashSet<NaiveDate>>,
    avoided: HashMap<String, HashMap<NaiveDate, HashSet<ShiftCode>>>,
}

impl RequestIndex {
    /// Builds the index in one pass over the requests.
    ///
    /// Shift-avoid rows whose shift is missing or unrecognized contribute
    /// nothing.
    pub fn build(requests: &[Request]) -> Self {
        let mut index = Self::default();
        for r in requests {
            match r.request_type {
                RequestType::OffRequest => {
                    index
                        .off_requests
                        .entry(r.nurse_id.clone())
                        .or_default()
                        .insert(r.date);
                }
                RequestType::ShiftAvoid => {
                    if let Some(shift) = r.shift.as_deref().and_then(ShiftCode::parse_lenient) {
                        index
                            .avoided
                            .entry(r.nurse_id.clone())
                            .or_default()
                            .entry(r.date)
                            .or_default()
                            .insert(shift);
                    }
                }
            }
        }
        index
    }

    /// Whether the nurse asked for `date` off.
    pub fn has_off_request(&self, nurse_id: &str, date: NaiveDate) -> bool {
        self.off_requests
            .get(nurse_id)
            .is_some_and(|dates| dates.contains(&date))
    }

    /// Whether the nurse asked to avoid `shift` on `date`.
    pub fn avoids(&self, nurse_id: &str, date: NaiveDate, shift: ShiftCode) -> bool {
        self.avoided_shifts(nurse_id, date)
            .is_some_and(|set| set.contains(&shift))
    }

    /// Shifts the nurse asked to avoid on `date`.
    pub fn avoided_shifts(&self, nurse_id: &str, date: NaiveDate) -> Option<&HashSet<ShiftCode>> {
        self.avoided.get(nurse_id)?.get(&date)
    }

    /// Number of distinct day-off requests.
    pub fn off_request_count(&self) -> usize {
        self.off_requests.values().map(|dates| dates.len()).sum()
    }
}
