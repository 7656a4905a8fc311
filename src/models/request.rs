//! Nurse requests: days off and shifts to avoid.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of nurse request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestType {
    /// The nurse asks not to work at all on the date.
    OffRequest,
    /// The nurse asks not to work a specific shift on the date.
    ShiftAvoid,
}

impl RequestType {
    /// Exchange key (`OFF_REQUEST` / `SHIFT_AVOID`).
    pub fn key(&self) -> &'static str {
        match self {
            RequestType::OffRequest => "OFF_REQUEST",
            RequestType::ShiftAvoid => "SHIFT_AVOID",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for RequestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OFF_REQUEST" => Ok(RequestType::OffRequest),
            "SHIFT_AVOID" => Ok(RequestType::ShiftAvoid),
            other => Err(format!("unknown request type '{other}'")),
        }
    }
}

/// A single request row.
///
/// `shift` keeps the raw text from input: it is only meaningful for
/// [`RequestType::ShiftAvoid`], and malformed values are ignored when the
/// request index is built rather than rejected at load time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Requesting nurse.
    pub nurse_id: String,
    /// Date the request applies to.
    pub date: NaiveDate,
    /// Request kind.
    pub request_type: RequestType,
    /// Raw shift code, if any.
    pub shift: Option<String>,
}

impl Request {
    /// Creates a day-off request.
    pub fn off(nurse_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            nurse_id: nurse_id.into(),
            date,
            request_type: RequestType::OffRequest,
            shift: None,
        }
    }

    /// Creates a shift-avoidance request.
    pub fn avoid(nurse_id: impl Into<String>, date: NaiveDate, shift: impl Into<String>) -> Self {
        Self {
            nurse_id: nurse_id.into(),
            date,
            request_type: RequestType::ShiftAvoid,
            shift: Some(shift.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_type_parse() {
        assert_eq!("off_request".parse::<RequestType>(), Ok(RequestType::OffRequest));
        assert_eq!(" SHIFT_AVOID".parse::<RequestType>(), Ok(RequestType::ShiftAvoid));
        assert!("VACATION".parse::<RequestType>().is_err());
    }

    #[test]
    fn test_request_constructors() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let off = Request::off("A", date);
        assert_eq!(off.request_type, RequestType::OffRequest);
        assert!(off.shift.is_none());

        let avoid = Request::avoid("A", date, "n");
        assert_eq!(avoid.request_type, RequestType::ShiftAvoid);
        assert_eq!(avoid.shift.as_deref(), Some("n"));
    }
}
