//! Shift codes.
//!
//! A day is split into a small, ordered set of shifts. The greedy assigner
//! processes them in [`ShiftCode::PROCESSING_ORDER`] within each date.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A shift within a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShiftCode {
    /// Day shift (`D`).
    #[serde(rename = "D")]
    Day,
    /// Evening shift (`E`).
    #[serde(rename = "E")]
    Evening,
    /// Night shift (`N`).
    #[serde(rename = "N")]
    Night,
}

impl ShiftCode {
    /// Fixed order in which shifts of one date are filled.
    pub const PROCESSING_ORDER: [ShiftCode; 3] = [ShiftCode::Day, ShiftCode::Evening, ShiftCode::Night];

    /// Single-letter exchange code.
    pub fn code(&self) -> &'static str {
        match self {
            ShiftCode::Day => "D",
            ShiftCode::Evening => "E",
            ShiftCode::Night => "N",
        }
    }

    /// Parses a code leniently: surrounding whitespace and case are ignored.
    ///
    /// Only the single-letter codes are accepted; `None` for anything else.
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "D" => Some(ShiftCode::Day),
            "E" => Some(ShiftCode::Evening),
            "N" => Some(ShiftCode::Night),
            _ => None,
        }
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error for an unrecognized shift code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownShiftCode(pub String);

impl fmt::Display for UnknownShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown shift code '{}'", self.0)
    }
}

impl std::error::Error for UnknownShiftCode {}

impl FromStr for ShiftCode {
    type Err = UnknownShiftCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_lenient(s).ok_or_else(|| UnknownShiftCode(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_processing_order() {
        assert_eq!(
            ShiftCode::PROCESSING_ORDER,
            [ShiftCode::Day, ShiftCode::Evening, ShiftCode::Night]
        );
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        assert_eq!(" n ".parse::<ShiftCode>(), Ok(ShiftCode::Night));
        assert_eq!("d".parse::<ShiftCode>(), Ok(ShiftCode::Day));
        assert_eq!("E".parse::<ShiftCode>(), Ok(ShiftCode::Evening));
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!("X".parse::<ShiftCode>().is_err());
        assert_eq!(ShiftCode::parse_lenient(""), None);
        for long in ["DAY", "Evening", "night"] {
            assert_eq!(ShiftCode::parse_lenient(long), None, "{long}");
        }
    }

    #[test]
    fn test_display_uses_code() {
        assert_eq!(ShiftCode::Night.to_string(), "N");
    }
}
