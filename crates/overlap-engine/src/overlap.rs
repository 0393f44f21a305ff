//! Common availability across participants.
//!
//! Records are partitioned by date. Within each date every start and end time
//! is a breakpoint; between two consecutive breakpoints the set of available
//! participants cannot change, so each elementary interval gets an exact
//! participant set. Elementary intervals with enough participants are then
//! merged with their neighbour when they touch and carry the same set, which
//! yields maximal, non-overlapping slots.
//!
//! Reporting pairwise overlaps instead would produce redundant, overlapping
//! intervals as soon as three or more participants nest inside each other.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::{validate_records, AvailabilityRecord, ParsedRecord, RejectedRecord};
use crate::time::TimeOfDay;

/// Fewest distinct participants a slot must have to count as common.
pub const MIN_COMMON_PARTICIPANTS: usize = 2;

/// A maximal interval on one date during which the same participants are all
/// available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonAvailabilitySlot {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    /// Sorted, no duplicates, at least two names.
    pub participants: Vec<String>,
    pub duration_minutes: u32,
}

/// Tuning knobs for [`compute_common_availability_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlapOptions {
    /// Minimum distinct participants per slot. Values below 2 are treated as 2.
    pub min_participants: usize,
    /// Drop merged slots shorter than this many minutes.
    pub min_duration_minutes: u32,
}

impl Default for OverlapOptions {
    fn default() -> Self {
        Self {
            min_participants: MIN_COMMON_PARTICIPANTS,
            min_duration_minutes: 0,
        }
    }
}

impl OverlapOptions {
    fn effective_min_participants(&self) -> usize {
        self.min_participants.max(MIN_COMMON_PARTICIPANTS)
    }
}

/// Full result of an overlap computation, including diagnostics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OverlapReport {
    /// Sorted by date, then start time.
    pub slots: Vec<CommonAvailabilitySlot>,
    /// Records excluded as malformed, in input order.
    pub rejected: Vec<RejectedRecord>,
    /// Distinct names among the accepted records, sorted.
    pub participants: Vec<String>,
}

/// Compute the maximal common-availability slots for a set of records.
///
/// Input order does not matter. Duplicate records for the same participant
/// count once. Malformed records (blank name, bad date or time, start not
/// before end) are skipped; use [`compute_common_availability_with`] to see
/// which ones.
pub fn compute_common_availability(records: &[AvailabilityRecord]) -> Vec<CommonAvailabilitySlot> {
    compute_common_availability_with(records, &OverlapOptions::default()).slots
}

/// Compute common availability with explicit options and return diagnostics
/// alongside the slots.
pub fn compute_common_availability_with(
    records: &[AvailabilityRecord],
    options: &OverlapOptions,
) -> OverlapReport {
    let validated = validate_records(records);
    let min_participants = options.effective_min_participants();

    let participants: Vec<String> = validated
        .accepted
        .iter()
        .map(|r| r.participant)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let mut by_date: BTreeMap<NaiveDate, Vec<ParsedRecord<'_>>> = BTreeMap::new();
    for record in validated.accepted {
        by_date.entry(record.date).or_default().push(record);
    }

    let mut slots = Vec::new();
    for (date, group) in &by_date {
        if group.len() < MIN_COMMON_PARTICIPANTS {
            continue;
        }
        slots.extend(sweep_date(*date, group, min_participants));
    }

    slots.retain(|slot| slot.duration_minutes >= options.min_duration_minutes);
    slots.sort_by_key(|slot| (slot.date, slot.start_time));

    OverlapReport {
        slots,
        rejected: validated.rejected,
        participants,
    }
}

/// A run of touching elementary intervals sharing one participant set.
struct Run<'a> {
    start: TimeOfDay,
    end: TimeOfDay,
    participants: BTreeSet<&'a str>,
}

/// Sweep one date group and return its merged slots in time order.
fn sweep_date(
    date: NaiveDate,
    group: &[ParsedRecord<'_>],
    min_participants: usize,
) -> Vec<CommonAvailabilitySlot> {
    let mut breakpoints: Vec<TimeOfDay> = group
        .iter()
        .flat_map(|r| [r.span.start(), r.span.end()])
        .collect();
    breakpoints.sort_unstable();
    breakpoints.dedup();

    let mut elementary = 0usize;
    let mut runs: Vec<Run<'_>> = Vec::new();

    for pair in breakpoints.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if a >= b {
            continue;
        }

        let present: BTreeSet<&str> = group
            .iter()
            .filter(|r| r.span.start() <= a && r.span.end() >= b)
            .map(|r| r.participant)
            .collect();
        if present.len() < min_participants {
            continue;
        }
        elementary += 1;

        if let Some(last) = runs.last_mut() {
            if last.end == a && last.participants == present {
                last.end = b;
                continue;
            }
        }
        runs.push(Run {
            start: a,
            end: b,
            participants: present,
        });
    }

    debug!(
        %date,
        records = group.len(),
        breakpoints = breakpoints.len(),
        elementary,
        merged = runs.len(),
        "swept date group"
    );

    runs.into_iter()
        .map(|run| CommonAvailabilitySlot {
            date,
            start_time: run.start,
            end_time: run.end,
            duration_minutes: u32::from(run.end.minutes() - run.start.minutes()),
            participants: run.participants.into_iter().map(str::to_string).collect(),
        })
        .collect()
}

/// Pick the strongest candidate slots.
///
/// Ranks by participant count (most first), then duration (longest first),
/// then chronologically. Returns at most `limit` slots.
pub fn best_slots(slots: &[CommonAvailabilitySlot], limit: usize) -> Vec<CommonAvailabilitySlot> {
    let mut ranked = slots.to_vec();
    ranked.sort_by_key(|slot| {
        (
            Reverse(slot.participants.len()),
            Reverse(slot.duration_minutes),
            slot.date,
            slot.start_time,
        )
    });
    ranked.truncate(limit);
    ranked
}
