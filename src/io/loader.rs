//! Typed input loading.
//!
//! Turns the raw `nurses`, `calendar`, `requirements`, and `requests`
//! tables into domain models. Row numbers in errors are spreadsheet lines
//! (the header is line 1).
//!
//! Accepted cell formats:
//!
//! | Column | Accepted |
//! |--------|----------|
//! | `date` | `YYYY-MM-DD`, `YYYY/MM/DD`, `YYYY.MM.DD`, optionally followed by a time |
//! | `night_ok`, `is_weekend`, `is_holiday` | `Y`/`N`, `YES`/`NO`, `TRUE`/`FALSE`, `1`/`0` (blank = false, except `night_ok`) |
//! | `shift` | `D`/`E`/`N`, case-insensitive |
//! | `required` | non-negative integer (`2.0` is accepted) |

use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;
use tracing::info;

use super::parser::{open_source, RawRecord, TableSource};
use crate::error::{RosterError, RosterResult};
use crate::models::{Calendar, CalendarDay, Nurse, Request, RequestType, ShiftCode, ShiftRequirement};

/// Table names.
pub const NURSES: &str = "nurses";
pub const CALENDAR: &str = "calendar";
pub const REQUIREMENTS: &str = "requirements";
pub const REQUESTS: &str = "requests";

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S%.f"];

/// All input tables of one rostering problem.
#[derive(Debug, Clone, Default)]
pub struct RosterInput {
    /// Nurses in input order, quotas not yet derived.
    pub nurses: Vec<Nurse>,
    pub calendar: Calendar,
    pub requirements: Vec<ShiftRequirement>,
    pub requests: Vec<Request>,
}

/// Loads a workbook or a CSV directory.
pub fn load_input(path: &Path) -> RosterResult<RosterInput> {
    let mut source = open_source(path)?;
    let input = load_from_source(source.as_mut())?;
    info!(
        path = %path.display(),
        nurses = input.nurses.len(),
        days = input.calendar.days.len(),
        requirements = input.requirements.len(),
        requests = input.requests.len(),
        "input loaded"
    );
    Ok(input)
}

/// Loads every table from an open source.
///
/// A missing `requests` table is read as empty.
pub fn load_from_source(source: &mut dyn TableSource) -> RosterResult<RosterInput> {
    let nurses = parse_nurses(&source.read_table(NURSES)?)?;
    let calendar = parse_calendar(&source.read_table(CALENDAR)?)?;
    let requirements = parse_requirements(&source.read_table(REQUIREMENTS)?)?;
    let requests = if source.has_table(REQUESTS) {
        parse_requests(&source.read_table(REQUESTS)?)?
    } else {
        Vec::new()
    };

    Ok(RosterInput {
        nurses,
        calendar,
        requirements,
        requests,
    })
}

/// Cursor over one table, carrying the context for error messages.
struct Row<'a> {
    table: &'static str,
    line: usize,
    record: &'a RawRecord,
}

impl<'a> Row<'a> {
    fn invalid(&self, column: &str, value: &str, message: impl Into<String>) -> RosterError {
        RosterError::InvalidValue {
            table: self.table.to_string(),
            row: self.line,
            column: column.to_string(),
            value: value.to_string(),
            message: message.into(),
        }
    }

    fn optional(&self, column: &str) -> Option<&'a str> {
        self.record
            .get(column)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    fn required(&self, column: &str) -> RosterResult<&'a str> {
        self.optional(column)
            .ok_or_else(|| self.invalid(column, "", "value is required"))
    }

    fn date(&self, column: &str) -> RosterResult<NaiveDate> {
        let raw = self.required(column)?;
        parse_date(raw).ok_or_else(|| self.invalid(column, raw, "unrecognized date"))
    }

    fn flag(&self, column: &str, blank_default: Option<bool>) -> RosterResult<bool> {
        match (self.optional(column), blank_default) {
            (None, Some(default)) => Ok(default),
            (None, None) => Err(self.invalid(column, "", "value is required")),
            (Some(raw), _) => parse_flag(raw).ok_or_else(|| self.invalid(column, raw, "expected Y/N")),
        }
    }
}

fn rows<'a>(table: &'static str, records: &'a [RawRecord]) -> impl Iterator<Item = Row<'a>> {
    records.iter().enumerate().map(move |(i, record)| Row {
        table,
        line: i + 2,
        record,
    })
}

fn require_columns(table: &str, records: &[RawRecord], columns: &[&str]) -> RosterResult<()> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    for column in columns {
        if !first.contains_key(*column) {
            return Err(RosterError::MissingColumn {
                table: table.to_string(),
                column: column.to_string(),
            });
        }
    }
    Ok(())
}

fn parse_nurses(records: &[RawRecord]) -> RosterResult<Vec<Nurse>> {
    require_columns(NURSES, records, &["nurse_id", "night_ok"])?;
    rows(NURSES, records)
        .map(|row| -> RosterResult<Nurse> {
            let mut nurse = Nurse::new(row.required("nurse_id")?)
                .with_night_capable(row.flag("night_ok", None)?);
            for (key, value) in row.record {
                if key != "nurse_id" && key != "night_ok" && key != "monthly_max_shifts" {
                    nurse.attributes.insert(key.clone(), value.clone());
                }
            }
            Ok(nurse)
        })
        .collect()
}

fn parse_calendar(records: &[RawRecord]) -> RosterResult<Calendar> {
    require_columns(CALENDAR, records, &["date"])?;
    let days = rows(CALENDAR, records)
        .map(|row| -> RosterResult<CalendarDay> {
            let mut day = CalendarDay::new(row.date("date")?);
            day.is_weekend = row.flag("is_weekend", Some(false))?;
            day.is_holiday = row.flag("is_holiday", Some(false))?;
            Ok(day)
        })
        .collect::<RosterResult<Vec<_>>>()?;
    Ok(Calendar::new(days))
}

fn parse_requirements(records: &[RawRecord]) -> RosterResult<Vec<ShiftRequirement>> {
    require_columns(REQUIREMENTS, records, &["date", "shift", "required"])?;
    rows(REQUIREMENTS, records)
        .map(|row| -> RosterResult<ShiftRequirement> {
            let date = row.date("date")?;
            let raw_shift = row.required("shift")?;
            let shift: ShiftCode = raw_shift
                .parse()
                .map_err(|e: crate::models::UnknownShiftCode| row.invalid("shift", raw_shift, e.to_string()))?;
            let raw_required = row.required("required")?;
            let required = parse_headcount(raw_required)
                .map_err(|message| row.invalid("required", raw_required, message))?;
            Ok(ShiftRequirement::new(date, shift, required))
        })
        .collect()
}

fn parse_requests(records: &[RawRecord]) -> RosterResult<Vec<Request>> {
    require_columns(REQUESTS, records, &["nurse_id", "date", "request_type"])?;
    rows(REQUESTS, records)
        .map(|row| -> RosterResult<Request> {
            let raw_type = row.required("request_type")?;
            let request_type: RequestType = raw_type
                .parse()
                .map_err(|message: String| row.invalid("request_type", raw_type, message))?;
            Ok(Request {
                nurse_id: row.required("nurse_id")?.to_string(),
                date: row.date("date")?,
                request_type,
                shift: row.optional("shift").map(str::to_string),
            })
        })
        .collect()
}

/// Parses a date, ignoring any time-of-day part.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
}

/// Parses a Y/N style flag.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "Y" | "YES" | "TRUE" | "T" | "1" => Some(true),
        "N" | "NO" | "FALSE" | "F" | "0" => Some(false),
        _ => None,
    }
}

/// Parses a non-negative whole headcount.
fn parse_headcount(raw: &str) -> Result<u32, String> {
    if let Ok(n) = raw.parse::<i64>() {
        return u32::try_from(n).map_err(|_| "must be a non-negative integer".to_string());
    }
    let value: f64 = raw.parse().map_err(|_| "not a number".to_string())?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err("must be a whole number".to_string());
    }
    if value < 0.0 || value > f64::from(u32::MAX) {
        return Err("must be a non-negative integer".to_string());
    }
    Ok(value as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_dir(tables: &[(&str, &str)]) -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, body) in tables {
            fs::write(dir.path().join(format!("{name}.csv")), body).unwrap();
        }
        dir
    }

    fn base_tables() -> Vec<(&'static str, &'static str)> {
        vec![
            ("nurses", "nurse_id,night_ok,team\nA,Y,north\nB,n,south\n"),
            ("calendar", "date,is_weekend,is_holiday\n2025-01-04,TRUE,0\n2025-01-06,N,Y\n2025/01/07,,\n"),
            ("requirements", "date,shift,required\n2025-01-06, d ,2\n2025-01-07,N,1.0\n"),
            ("requests", "nurse_id,date,request_type,shift\nA,2025-01-06,OFF_REQUEST,\nB,2025-01-07,shift_avoid,N\n"),
        ]
    }

    #[test]
    fn test_load_csv_directory() {
        let dir = write_dir(&base_tables());
        let input = load_input(dir.path()).unwrap();

        assert_eq!(input.nurses.len(), 2);
        assert!(input.nurses[0].night_capable);
        assert!(!input.nurses[1].night_capable);
        assert_eq!(input.nurses[0].attributes.get("team"), Some(&"north".to_string()));

        assert_eq!(input.calendar.days.len(), 3);
        assert!(input.calendar.days[0].is_weekend);
        assert!(input.calendar.days[1].is_holiday);
        assert!(!input.calendar.days[2].is_off());

        assert_eq!(input.requirements[0].shift, ShiftCode::Day);
        assert_eq!(input.requirements[0].required, 2);
        assert_eq!(input.requirements[1].required, 1);

        assert_eq!(input.requests[0].request_type, RequestType::OffRequest);
        assert_eq!(input.requests[0].shift, None);
        assert_eq!(input.requests[1].request_type, RequestType::ShiftAvoid);
        assert_eq!(input.requests[1].shift.as_deref(), Some("N"));
    }

    #[test]
    fn test_missing_requests_table_is_empty() {
        let tables: Vec<_> = base_tables().into_iter().filter(|(n, _)| *n != "requests").collect();
        let input = load_input(write_dir(&tables).path()).unwrap();
        assert!(input.requests.is_empty());
    }

    #[test]
    fn test_missing_required_table() {
        let tables: Vec<_> = base_tables().into_iter().filter(|(n, _)| *n != "calendar").collect();
        let err = load_input(write_dir(&tables).path()).unwrap_err();
        assert!(matches!(err, RosterError::MissingTable(ref t) if t == "calendar"));
    }

    fn with_table(name: &'static str, body: &'static str) -> tempfile::TempDir {
        let tables: Vec<_> = base_tables()
            .into_iter()
            .map(|(n, b)| if n == name { (n, body) } else { (n, b) })
            .collect();
        write_dir(&tables)
    }

    #[test]
    fn test_unknown_shift_rejected() {
        let dir = with_table("requirements", "date,shift,required\n2025-01-06,X,1\n");
        match load_input(dir.path()).unwrap_err() {
            RosterError::InvalidValue { table, row, column, .. } => {
                assert_eq!(table, "requirements");
                assert_eq!(row, 2);
                assert_eq!(column, "shift");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_required_rejected() {
        let dir = with_table("requirements", "date,shift,required\n2025-01-06,D,-1\n");
        assert!(matches!(
            load_input(dir.path()),
            Err(RosterError::InvalidValue { ref column, .. }) if column == "required"
        ));
    }

    #[test]
    fn test_bad_night_ok_rejected() {
        let dir = with_table("nurses", "nurse_id,night_ok\nA,maybe\n");
        assert!(load_input(dir.path()).is_err());
    }

    #[test]
    fn test_unknown_request_type_rejected() {
        let dir = with_table("requests", "nurse_id,date,request_type\nA,2025-01-06,VACATION\n");
        assert!(load_input(dir.path()).is_err());
    }

    #[test]
    fn test_missing_column() {
        let dir = with_table("requirements", "date,shift\n2025-01-06,D\n");
        assert!(matches!(
            load_input(dir.path()),
            Err(RosterError::MissingColumn { ref column, .. }) if column == "required"
        ));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 1, 6);
        assert_eq!(parse_date("2025-01-06"), expected);
        assert_eq!(parse_date("2025/01/06"), expected);
        assert_eq!(parse_date("2025-01-06 00:00:00"), expected);
        assert_eq!(parse_date("06/01/2025"), None);
    }

    #[test]
    fn test_parse_headcount() {
        assert_eq!(parse_headcount("3"), Ok(3));
        assert_eq!(parse_headcount("0"), Ok(0));
        assert_eq!(parse_headcount("2.0"), Ok(2));
        assert!(parse_headcount("1.5").is_err());
        assert!(parse_headcount("-2").is_err());
        assert!(parse_headcount("-2.0").is_err());
        assert!(parse_headcount("lots").is_err());
    }
}
