//! Availability records as handed over by the storage layer, and their
//! validation into typed form.
//!
//! Records arrive as raw strings. [`validate_records`] splits them into parsed
//! records the engine can use and rejected records with a reason, so that one
//! malformed row never aborts a whole computation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{OverlapError, Result};
use crate::time::TimeSpan;

/// One participant's declared open window on one date.
///
/// Field names follow the storage rows (`participant_name`, `available_date`,
/// ...) and also accept the camelCase form used by browser clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    #[serde(default)]
    pub id: String,
    #[serde(alias = "participantName")]
    pub participant_name: String,
    #[serde(alias = "available_date", alias = "availableDate")]
    pub date: String,
    #[serde(alias = "startTime")]
    pub start_time: String,
    #[serde(alias = "endTime")]
    pub end_time: String,
}

impl AvailabilityRecord {
    pub fn new(
        id: impl Into<String>,
        participant_name: impl Into<String>,
        date: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            participant_name: participant_name.into(),
            date: date.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }

    /// Validate this record.
    ///
    /// # Errors
    /// - `EmptyParticipant` if the name is blank
    /// - `InvalidDate` if the date is not `YYYY-MM-DD`
    /// - `InvalidTime` if either time is not `HH:MM`
    /// - `EmptyRange` if the start is not before the end
    pub fn parse(&self, index: usize) -> Result<ParsedRecord<'_>> {
        let participant = self.participant_name.trim();
        if participant.is_empty() {
            return Err(OverlapError::EmptyParticipant);
        }
        let date = parse_date(&self.date)?;
        let span = TimeSpan::parse(&self.start_time, &self.end_time)?;
        Ok(ParsedRecord {
            index,
            participant,
            date,
            span,
        })
    }
}

/// A record that passed validation. Borrows the participant name from its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRecord<'a> {
    /// Position of the source record in the input slice.
    pub index: usize,
    /// Trimmed participant name. Equal names are the same participant.
    pub participant: &'a str,
    pub date: NaiveDate,
    pub span: TimeSpan,
}

/// A record excluded from computation, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RejectedRecord {
    pub index: usize,
    pub id: String,
    #[serde(serialize_with = "serialize_error")]
    pub reason: OverlapError,
}

fn serialize_error<S: serde::Serializer>(
    err: &OverlapError,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(err)
}

/// Outcome of validating a batch of records.
#[derive(Debug, Clone, Default)]
pub struct Validated<'a> {
    pub accepted: Vec<ParsedRecord<'a>>,
    pub rejected: Vec<RejectedRecord>,
}

/// Validate every record, keeping the good ones and reporting the bad ones.
///
/// Input order is preserved in both halves of the result.
pub fn validate_records(records: &[AvailabilityRecord]) -> Validated<'_> {
    let mut validated = Validated::default();
    for (index, record) in records.iter().enumerate() {
        match record.parse(index) {
            Ok(parsed) => validated.accepted.push(parsed),
            Err(reason) => {
                warn!(index, id = %record.id, %reason, "skipping malformed availability record");
                validated.rejected.push(RejectedRecord {
                    index,
                    id: record.id.clone(),
                    reason,
                });
            }
        }
    }
    validated
}

/// Parse a calendar date in `YYYY-MM-DD` form.
///
/// # Errors
/// Returns `OverlapError::InvalidDate` if the string is not a real ISO 8601
/// calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    // chrono accepts unpadded fields; the grouping key must stay canonical.
    if trimmed.len() != 10 {
        return Err(OverlapError::InvalidDate(s.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| OverlapError::InvalidDate(s.to_string()))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsPayload {
    List(Vec<AvailabilityRecord>),
    Wrapped { availability: Vec<AvailabilityRecord> },
}

/// Deserialize records from JSON.
///
/// Accepts either a bare array of records or an object carrying them under an
/// `availability` key (the shape a meeting lookup returns).
///
/// # Errors
/// Returns `OverlapError::Json` if the payload is neither shape.
pub fn records_from_json(json: &str) -> Result<Vec<AvailabilityRecord>> {
    let payload: RecordsPayload = serde_json::from_str(json)?;
    Ok(match payload {
        RecordsPayload::List(records) => records,
        RecordsPayload::Wrapped { availability } => availability,
    })
}
