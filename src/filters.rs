// Per-view subset selection. Every view filters by year first; the map view
// additionally filters by priority category.
use crate::types::{Priority, WasteRecord};
use std::collections::HashSet;

/// Rows whose year equals `year`. No match is not an error; the caller gets
/// an empty subset and renders accordingly.
pub fn filter_by_year(records: &[WasteRecord], year: i32) -> Vec<WasteRecord> {
    records.iter().filter(|r| r.year == year).cloned().collect()
}

/// Rows whose priority is in `allowed`. An empty set passes everything
/// through unchanged, mirroring the dashboard multi-select where clearing
/// every category shows all markers.
pub fn filter_by_priority(records: &[WasteRecord], allowed: &HashSet<Priority>) -> Vec<WasteRecord> {
    if allowed.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| allowed.contains(&r.priority))
        .cloned()
        .collect()
}

/// Distinct years present in the dataset, ascending.
pub fn years(records: &[WasteRecord]) -> Vec<i32> {
    let mut ys: Vec<i32> = records.iter().map(|r| r.year).collect();
    ys.sort_unstable();
    ys.dedup();
    ys
}
