//! Nurse shift rostering.
//!
//! Builds monthly nurse rosters with a seeded greedy heuristic, runs many
//! seeds in parallel, and ranks the resulting schedules by a weighted
//! penalty over soft-rule violations.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Nurse`, `Calendar`, `ShiftRequirement`,
//!   `Request`, `Schedule`, violation records
//! - **`capacity`**: Monthly quota derivation from the calendar
//! - **`requests`**: Off-request and shift-avoid lookups
//! - **`dispatching`**: Weighted cost rules for choosing among eligible nurses
//! - **`scheduler`**: Eligibility rules, greedy assigner, multi-seed orchestrator
//! - **`violations`**: Consecutive-work, night-imbalance and off-request detection
//! - **`penalty`**: Weighted penalty breakdown
//! - **`report`**: Ranking tables and per-nurse calendar view
//! - **`io`**: Workbook/CSV loading and CSV export
//! - **`validation`**: Input integrity checks (duplicate IDs, unknown nurses, stray requirements)
//!
//! # Pipeline
//!
//! ```text
//! load_input → CapacityDeriver → RosterProblem::validated
//!            → Orchestrator::run_with_fallback → report / export
//! ```
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use nurse_roster::capacity::CapacityDeriver;
//! use nurse_roster::config::RunConfig;
//! use nurse_roster::models::{Calendar, Nurse, ShiftCode, ShiftRequirement};
//! use nurse_roster::scheduler::{Orchestrator, RosterProblem};
//!
//! let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
//! let end = NaiveDate::from_ymd_opt(2025, 1, 12).unwrap();
//! let calendar = Calendar::from_range(start, end);
//!
//! let mut nurses: Vec<Nurse> = ["A", "B", "C", "D"]
//!     .iter()
//!     .map(|id| Nurse::new(*id).with_night_capable(true))
//!     .collect();
//! CapacityDeriver::new().apply(&calendar, &mut nurses);
//!
//! let requirements: Vec<ShiftRequirement> = calendar
//!     .dates()
//!     .into_iter()
//!     .map(|d| ShiftRequirement::new(d, ShiftCode::Day, 1))
//!     .collect();
//!
//! let problem = RosterProblem::validated(nurses, &calendar, &requirements, vec![]).unwrap();
//! let outcome = Orchestrator::new(&RunConfig::default().with_runs(20))
//!     .run_with_fallback(&problem)
//!     .unwrap();
//! assert!(outcome.best().is_some());
//! ```

pub mod capacity;
pub mod config;
pub mod dispatching;
pub mod error;
pub mod io;
pub mod logging;
pub mod models;
pub mod penalty;
pub mod report;
pub mod requests;
pub mod scheduler;
pub mod validation;
pub mod violations;

pub use error::{RosterError, RosterResult};
