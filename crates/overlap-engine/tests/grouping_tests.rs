//! Tests for the per-date listing view.

use overlap_engine::grouping::{distinct_participants, group_by_date};
use overlap_engine::AvailabilityRecord;

fn rec(id: &str, name: &str, date: &str, start: &str, end: &str) -> AvailabilityRecord {
    AvailabilityRecord::new(id, name, date, start, end)
}

fn ids(group: &[&AvailabilityRecord]) -> Vec<String> {
    group.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn dates_iterate_ascending() {
    let records = vec![
        rec("1", "Alice", "2025-06-03", "09:00", "10:00"),
        rec("2", "Bob", "2025-06-01", "09:00", "10:00"),
        rec("3", "Carol", "2025-06-02", "09:00", "10:00"),
    ];

    let groups = group_by_date(&records);

    let dates: Vec<&str> = groups.keys().map(String::as_str).collect();
    assert_eq!(dates, vec!["2025-06-01", "2025-06-02", "2025-06-03"]);
}

#[test]
fn records_sorted_by_start_within_date() {
    let records = vec![
        rec("late", "Alice", "2025-06-01", "14:00", "15:00"),
        rec("early", "Bob", "2025-06-01", "08:00", "09:00"),
        rec("mid", "Carol", "2025-06-01", "10:30", "11:00"),
    ];

    let groups = group_by_date(&records);

    assert_eq!(ids(&groups["2025-06-01"]), vec!["early", "mid", "late"]);
}

#[test]
fn unpadded_hours_sort_numerically() {
    let records = vec![
        rec("ten", "Alice", "2025-06-01", "10:00", "11:00"),
        rec("nine", "Bob", "2025-06-01", "9:00", "10:00"),
    ];

    let groups = group_by_date(&records);

    assert_eq!(ids(&groups["2025-06-01"]), vec!["nine", "ten"]);
}

#[test]
fn ties_break_on_end_then_name() {
    let records = vec![
        rec("bob-long", "Bob", "2025-06-01", "09:00", "11:00"),
        rec("bob-short", "Bob", "2025-06-01", "09:00", "10:00"),
        rec("alice-long", "Alice", "2025-06-01", "09:00", "11:00"),
    ];

    let groups = group_by_date(&records);

    assert_eq!(
        ids(&groups["2025-06-01"]),
        vec!["bob-short", "alice-long", "bob-long"]
    );
}

#[test]
fn unparseable_start_sorts_last_but_is_kept() {
    let records = vec![
        rec("bad", "Alice", "2025-06-01", "noon", "13:00"),
        rec("good", "Bob", "2025-06-01", "15:00", "16:00"),
    ];

    let groups = group_by_date(&records);

    assert_eq!(ids(&groups["2025-06-01"]), vec!["good", "bad"]);
}

#[test]
fn every_record_appears_once() {
    let records = vec![
        rec("1", "Alice", "2025-06-01", "09:00", "10:00"),
        rec("2", "Alice", "2025-06-01", "09:00", "10:00"),
        rec("3", "Bob", "2025-06-02", "10:00", "09:00"),
    ];

    let groups = group_by_date(&records);

    let total: usize = groups.values().map(Vec::len).sum();
    assert_eq!(total, 3);
}

#[test]
fn empty_input_gives_empty_map() {
    assert!(group_by_date(&[]).is_empty());
}

#[test]
fn roster_is_sorted_distinct_and_trimmed() {
    let records = vec![
        rec("1", "Carol", "2025-06-01", "09:00", "10:00"),
        rec("2", " Alice", "2025-06-01", "09:00", "10:00"),
        rec("3", "Alice", "2025-06-02", "09:00", "10:00"),
        rec("4", "  ", "2025-06-02", "09:00", "10:00"),
        rec("5", "Bob", "2025-06-02", "09:00", "10:00"),
    ];

    assert_eq!(distinct_participants(&records), vec!["Alice", "Bob", "Carol"]);
}
