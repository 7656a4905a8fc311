//! Night-shift imbalance detection.

use std::collections::BTreeMap;

use crate::models::{NightImbalance, Schedule, ShiftCode};

/// Flags every nurse whose night count is above the night-worker mean.
///
/// The mean covers only nurses with at least one ASSIGNED Night entry;
/// nurses without nights are neither averaged nor flagged. The comparison
/// is done in integers (`count * workers > total`), so a nurse exactly at
/// the mean is never flagged. `average` is rounded to two decimals for
/// display, `excess` is exact.
///
/// Output is ordered by nurse id.
pub fn night_imbalance(schedule: &Schedule) -> Vec<NightImbalance> {
    let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
    for (entry, nurse) in schedule.assigned() {
        if entry.shift == ShiftCode::Night {
            *counts.entry(nurse).or_insert(0) += 1;
        }
    }
    if counts.is_empty() {
        return Vec::new();
    }

    let workers = counts.len() as u64;
    let total: u64 = counts.values().map(|&c| u64::from(c)).sum();
    let mean = total as f64 / workers as f64;
    let average = (mean * 100.0).round() / 100.0;

    counts
        .into_iter()
        .filter(|&(_, count)| u64::from(count) * workers > total)
        .map(|(nurse, count)| NightImbalance {
            nurse_id: nurse.to_string(),
            night_count: count,
            average,
            excess: f64::from(count) - mean,
        })
        .collect()
}
