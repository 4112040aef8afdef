//! Scheduling-conflict checks over camp date ranges.
//!
//! Ranges are inclusive at both ends, and two camps touching at a boundary
//! date count as overlapping: a leader cannot close one camp and open
//! another on the same day.

use chrono::NaiveDate;
use log::warn;

use crate::domain::models::camp::Camp;

/// An inclusive calendar date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Inclusive-range overlap test.
pub fn overlaps(a: DateRange, b: DateRange) -> bool {
    !(a.end < b.start || b.end < a.start)
}

/// Scan every unordered pair for an overlap and return the first offending
/// pair of camp names. Camps whose stored dates fail to parse have no range
/// and cannot conflict; they are skipped with a warning.
///
/// O(n^2), which is fine at this system's scale (tens of camps).
pub fn find_conflict(camps: &[&Camp]) -> Option<(String, String)> {
    let ranges: Vec<Option<DateRange>> = camps
        .iter()
        .map(|camp| {
            let range = camp.date_range();
            if range.is_none() {
                warn!(
                    "camp '{}' has unparseable dates ({} -> {}); skipping in conflict scan",
                    camp.name, camp.start_date, camp.end_date
                );
            }
            range
        })
        .collect();

    for i in 0..camps.len() {
        for j in (i + 1)..camps.len() {
            if let (Some(a), Some(b)) = (ranges[i], ranges[j]) {
                if overlaps(a, b) {
                    return Some((camps[i].name.clone(), camps[j].name.clone()));
                }
            }
        }
    }
    None
}

/// True when any pair in the given set double-books a leader.
pub fn any_conflict(camps: &[&Camp]) -> bool {
    find_conflict(camps).is_some()
}
