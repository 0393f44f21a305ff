//! Per-date listing of raw availability records.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::record::AvailabilityRecord;
use crate::time::TimeOfDay;

/// Group records by date, each group sorted by start time.
///
/// Dates iterate in ascending lexicographic order, which is chronological for
/// ISO 8601 dates. Within a date, records are ordered by parsed start time,
/// then end time, then participant name. Records whose start time does not
/// parse sort after the rest by raw string. Every record appears exactly once;
/// nothing is validated away here.
pub fn group_by_date(records: &[AvailabilityRecord]) -> BTreeMap<String, Vec<&AvailabilityRecord>> {
    let mut groups: BTreeMap<String, Vec<&AvailabilityRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.date.trim().to_string())
            .or_default()
            .push(record);
    }
    for group in groups.values_mut() {
        group.sort_by(|a, b| listing_order(a, b));
    }
    groups
}

fn listing_order(a: &AvailabilityRecord, b: &AvailabilityRecord) -> Ordering {
    let key = |r: &AvailabilityRecord| {
        (
            TimeOfDay::parse(&r.start_time).ok(),
            TimeOfDay::parse(&r.end_time).ok(),
        )
    };
    let (a_start, a_end) = key(a);
    let (b_start, b_end) = key(b);

    // `None` must sort last, so compare presence before value.
    match (a_start, b_start) {
        (Some(x), Some(y)) => x
            .cmp(&y)
            .then_with(|| a_end.is_none().cmp(&b_end.is_none()))
            .then_with(|| a_end.cmp(&b_end)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.start_time.cmp(&b.start_time),
    }
    .then_with(|| a.participant_name.cmp(&b.participant_name))
}

/// Distinct participant names across all records, sorted. Blank names are skipped.
pub fn distinct_participants(records: &[AvailabilityRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.participant_name.trim())
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
