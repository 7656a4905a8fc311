//! Operator-facing views of orchestration results.
//!
//! Pure functions from results to row structs; rendering and file export
//! are left to the caller ([`crate::io::export`] writes them as CSV).

mod calendar_view;
mod summary;

pub use calendar_view::{NurseCalendar, WeekRow, OFF_LABEL, WEEKDAY_LABELS};
pub use summary::{
    schedule_by_shift, top_n_summary, unfilled_summary, violation_overview, ShiftRosterRow,
    TopNRow, UnfilledRow, ViolationOverviewRow,
};
