//! Soft-rule violation detection.
//!
//! Three independent, stateless passes over a finished schedule:
//!
//! | Pass | Input | Output |
//! |------|-------|--------|
//! | [`consecutive_work`] | ASSIGNED entries | one record per day past the streak threshold |
//! | [`night_imbalance`] | ASSIGNED Night entries | one record per nurse above the night mean |
//! | [`off_request_violations`] | ASSIGNED entries + OFF requests | one record per ignored request |
//!
//! Each pass can be run alone; [`detect_all`] bundles them into a
//! [`ViolationSet`].

mod consecutive;
mod night;
mod off_request;

pub use consecutive::{consecutive_work, DEFAULT_MAX_CONSECUTIVE_DAYS};
pub use night::night_imbalance;
pub use off_request::off_request_violations;

use crate::models::{Request, Schedule, ViolationSet};

/// Runs every detector over `schedule`.
pub fn detect_all(schedule: &Schedule, requests: &[Request], max_consecutive: u32) -> ViolationSet {
    ViolationSet {
        consecutive_work: consecutive_work(schedule, max_consecutive),
        night_imbalance: night_imbalance(schedule),
        off_request: off_request_violations(schedule, requests),
    }
}
