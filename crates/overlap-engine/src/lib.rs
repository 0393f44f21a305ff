//! # overlap-engine
//!
//! Finds the time ranges where several meeting participants are available at
//! once.
//!
//! Participants submit availability windows (a date plus a local start and end
//! time). The engine computes, per date, the maximal intervals during which two
//! or more distinct participants are all available, along with exactly who is
//! available in each. It is a pure, synchronous transform: no I/O, no shared
//! state, safe to call from any thread.
//!
//! ## Quick start
//!
//! ```rust
//! use overlap_engine::{compute_common_availability, AvailabilityRecord};
//!
//! let records = vec![
//!     AvailabilityRecord::new("1", "Alice", "2025-06-01", "09:00", "10:00"),
//!     AvailabilityRecord::new("2", "Bob", "2025-06-01", "09:30", "10:30"),
//! ];
//! let slots = compute_common_availability(&records);
//! assert_eq!(slots.len(), 1);
//! assert_eq!(slots[0].start_time.to_string(), "09:30");
//! assert_eq!(slots[0].end_time.to_string(), "10:00");
//! assert_eq!(slots[0].participants, vec!["Alice", "Bob"]);
//! ```
//!
//! ## Modules
//!
//! - [`overlap`] - sweep-line common availability, options, ranking
//! - [`grouping`] - per-date listing and participant roster
//! - [`record`] - input records, validation, JSON loading
//! - [`time`] - minute-resolution time of day and half-open spans
//! - [`error`] - Error types

pub mod error;
pub mod grouping;
pub mod overlap;
pub mod record;
pub mod time;

pub use error::OverlapError;
pub use grouping::{distinct_participants, group_by_date};
pub use overlap::{
    best_slots, compute_common_availability, compute_common_availability_with,
    CommonAvailabilitySlot, OverlapOptions, OverlapReport,
};
pub use record::{records_from_json, validate_records, AvailabilityRecord, RejectedRecord};
pub use time::{TimeOfDay, TimeSpan};
