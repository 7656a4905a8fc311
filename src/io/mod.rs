//! Input loading and result export.

pub mod export;
pub mod loader;
pub mod parser;

pub use export::{export_nurse_calendar, export_trial};
pub use loader::{load_input, RosterInput};
pub use parser::{open_source, RawRecord, TableSource};
