//! Rostering domain models.
//!
//! Provides the data types for describing a rostering problem (nurses,
//! calendar, requirements, requests) and its solution (schedule entries
//! and soft-rule violations).
//!
//! # Exchange Keys
//!
//! | Model | Input table | Columns |
//! |-------|-------------|---------|
//! | Nurse | `nurses` | `nurse_id`, `night_ok` |
//! | CalendarDay | `calendar` | `date`, `is_weekend`, `is_holiday` |
//! | ShiftRequirement | `requirements` | `date`, `shift`, `required` |
//! | Request | `requests` | `nurse_id`, `date`, `request_type`, `shift` |

mod calendar;
mod nurse;
mod request;
mod requirement;
mod schedule;
mod shift;
mod violation;

pub use calendar::{Calendar, CalendarDay};
pub use nurse::Nurse;
pub use request::{Request, RequestType};
pub use requirement::{requirement_map, ShiftRequirement};
pub use schedule::{Schedule, ScheduleEntry, SlotStatus};
pub use shift::{ShiftCode, UnknownShiftCode};
pub use violation::{
    ConsecutiveWork, NightImbalance, OffRequestViolation, ViolationKind, ViolationRecord,
    ViolationSet,
};
