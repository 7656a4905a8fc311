//! CSV export of a selected trial.
//!
//! Files written into the output directory:
//!
//! | File | Content | Written |
//! |------|---------|---------|
//! | `schedule_long.csv` | one row per slot entry | always |
//! | `schedule_by_shift.csv` | comma-joined nurses per (date, shift) | always |
//! | `violation_<kind>.csv` | records of one violation kind | when non-empty |
//! | `unfilled_summary.csv` | unfilled count per (date, shift) | when non-empty |
//! | `nurse_calendar_<id>.csv` | week rows of one nurse | on request |

use csv::Writer;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::RosterResult;
use crate::models::{ViolationKind, ViolationRecord, ViolationSet};
use crate::report::{schedule_by_shift, unfilled_summary, NurseCalendar, WEEKDAY_LABELS};
use crate::scheduler::TrialResult;

/// Writes every table of `trial` into `dir`, creating it if needed.
///
/// Returns the written paths in write order.
pub fn export_trial(trial: &TrialResult, dir: &Path) -> RosterResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::new();

    let path = dir.join("schedule_long.csv");
    write_rows(&path, &trial.schedule.entries)?;
    written.push(path);

    let path = dir.join("schedule_by_shift.csv");
    write_rows(&path, &schedule_by_shift(&trial.schedule))?;
    written.push(path);

    for kind in ViolationKind::ALL {
        if trial.violations.count(kind) == 0 {
            continue;
        }
        let path = dir.join(format!("violation_{}.csv", kind.key()));
        write_violations(&path, &trial.violations, kind)?;
        written.push(path);
    }

    let unfilled = unfilled_summary(&trial.schedule);
    if !unfilled.is_empty() {
        let path = dir.join("unfilled_summary.csv");
        write_rows(&path, &unfilled)?;
        written.push(path);
    }

    info!(seed = trial.seed, dir = %dir.display(), files = written.len(), "schedule exported");
    Ok(written)
}

/// Writes one nurse calendar as `nurse_calendar_<id>.csv`.
pub fn export_nurse_calendar(calendar: &NurseCalendar, dir: &Path) -> RosterResult<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("nurse_calendar_{}.csv", sanitize(&calendar.nurse_id)));

    let mut w = Writer::from_path(&path)?;
    let mut header = vec!["iso_year", "week"];
    header.extend(WEEKDAY_LABELS);
    w.write_record(&header)?;

    for week in &calendar.weeks {
        let mut record = vec![week.iso_year.to_string(), week.week.to_string()];
        record.extend((0..7).map(|i| week.cell(i).to_string()));
        w.write_record(&record)?;
    }
    w.flush()?;
    Ok(path)
}

fn write_rows<T: Serialize>(path: &Path, rows: &[T]) -> RosterResult<()> {
    let mut w = Writer::from_path(path)?;
    for row in rows {
        w.serialize(row)?;
    }
    w.flush()?;
    Ok(())
}

fn write_violations(path: &Path, set: &ViolationSet, kind: ViolationKind) -> RosterResult<()> {
    let mut w = Writer::from_path(path)?;
    match kind {
        ViolationKind::ConsecutiveWork => {
            w.write_record(["violation_type", "nurse_id", "date", "streak_length", "detail"])?;
            for v in &set.consecutive_work {
                let detail = ViolationRecord::ConsecutiveWork(v.clone()).detail();
                w.write_record([
                    kind.to_string(),
                    v.nurse_id.clone(),
                    v.date.to_string(),
                    v.streak_length.to_string(),
                    detail,
                ])?;
            }
        }
        ViolationKind::NightImbalance => {
            w.write_record(["violation_type", "nurse_id", "night_count", "avg_night", "excess"])?;
            for v in &set.night_imbalance {
                w.write_record([
                    kind.to_string(),
                    v.nurse_id.clone(),
                    v.night_count.to_string(),
                    format!("{:.2}", v.average),
                    format!("{:.4}", v.excess),
                ])?;
            }
        }
        ViolationKind::OffRequest => {
            w.write_record(["violation_type", "nurse_id", "date", "shift", "detail"])?;
            for v in &set.off_request {
                let detail = ViolationRecord::OffRequest(v.clone()).detail();
                w.write_record([
                    kind.to_string(),
                    v.nurse_id.clone(),
                    v.date.to_string(),
                    v.shift.to_string(),
                    detail,
                ])?;
            }
        }
    }
    w.flush()?;
    Ok(())
}

/// Keeps nurse ids usable as file names.
fn sanitize(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
