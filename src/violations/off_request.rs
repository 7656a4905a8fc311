//! Ignored day-off requests.

use chrono::NaiveDate;
use std::collections::HashMap;

use crate::models::{OffRequestViolation, Request, RequestType, Schedule, ShiftCode};

/// Pairs every OFF_REQUEST with an ASSIGNED entry on the same nurse/date.
///
/// Requests are scanned in input order; a request that appears twice is
/// reported twice.
pub fn off_request_violations(schedule: &Schedule, requests: &[Request]) -> Vec<OffRequestViolation> {
    let worked: HashMap<(&str, NaiveDate), ShiftCode> = schedule
        .assigned()
        .map(|(entry, nurse)| ((nurse, entry.date), entry.shift))
        .collect();

    requests
        .iter()
        .filter(|r| r.request_type == RequestType::OffRequest)
        .filter_map(|r| {
            worked
                .get(&(r.nurse_id.as_str(), r.date))
                .map(|&shift| OffRequestViolation {
                    nurse_id: r.nurse_id.clone(),
                    date: r.date,
                    shift,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ScheduleEntry;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn test_ignored_request_reported_with_shift() {
        let mut s = Schedule::new();
        s.push(ScheduleEntry::assigned(d(3), ShiftCode::Evening, "A"));
        s.push(ScheduleEntry::assigned(d(4), ShiftCode::Day, "B"));

        let requests = vec![
            Request::off("A", d(3)),
            Request::off("B", d(3)),
            Request::avoid("B", d(4), "D"),
        ];
        let v = off_request_violations(&s, &requests);
        assert_eq!(v.len(), 1);
        assert_eq!(v[0].nurse_id, "A");
        assert_eq!(v[0].shift, ShiftCode::Evening);
    }

    #[test]
    fn test_unfilled_entries_ignored() {
        let mut s = Schedule::new();
        s.push(ScheduleEntry::unfilled(d(3), ShiftCode::Day));
        assert!(off_request_violations(&s, &[Request::off("A", d(3))]).is_empty());
    }

    #[test]
    fn test_duplicate_requests_reported_twice() {
        let mut s = Schedule::new();
        s.push(ScheduleEntry::assigned(d(3), ShiftCode::Night, "A"));
        let requests = vec![Request::off("A", d(3)), Request::off("A", d(3))];
        assert_eq!(off_request_violations(&s, &requests).len(), 2);
    }
}
