//! WASM bindings for overlap-engine.
//!
//! Exposes common-availability computation, per-date grouping and slot ranking
//! to the browser via `wasm-bindgen`. All complex types cross the boundary as
//! JSON strings. Records may use either the storage-row field names
//! (`participant_name`, `available_date`, ...) or camelCase.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p overlap-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/overlap_engine_wasm.wasm
//! ```

use overlap_engine::{OverlapOptions, OverlapReport};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON-in, JSON-out core (native-testable; `JsValue` only exists on wasm)
// ---------------------------------------------------------------------------

fn parse_options(options_json: Option<&str>) -> Result<OverlapOptions, String> {
    match options_json.map(str::trim) {
        None | Some("") => Ok(OverlapOptions::default()),
        Some(json) => {
            serde_json::from_str(json).map_err(|e| format!("Invalid options JSON: {}", e))
        }
    }
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

fn compute_report(records_json: &str, options_json: Option<&str>) -> Result<OverlapReport, String> {
    let records = overlap_engine::records_from_json(records_json).map_err(|e| e.to_string())?;
    let options = parse_options(options_json)?;
    Ok(overlap_engine::compute_common_availability_with(
        &records, &options,
    ))
}

/// Compute common availability. Returns the report (`slots`, `rejected`,
/// `participants`) as JSON.
pub fn common_availability_json(
    records_json: &str,
    options_json: Option<&str>,
) -> Result<String, String> {
    to_json(&compute_report(records_json, options_json)?)
}

/// Group records by date. Returns a JSON object mapping each date to its
/// records sorted by start time.
pub fn group_by_date_json(records_json: &str) -> Result<String, String> {
    let records = overlap_engine::records_from_json(records_json).map_err(|e| e.to_string())?;
    to_json(&overlap_engine::group_by_date(&records))
}

/// Return the `limit` strongest common slots as a JSON array.
pub fn best_slots_json(records_json: &str, limit: usize) -> Result<String, String> {
    let report = compute_report(records_json, None)?;
    to_json(&overlap_engine::best_slots(&report.slots, limit))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Compute maximal common-availability slots.
///
/// # Arguments
/// - `records_json` -- JSON array of availability records (or `{availability: [...]}`)
/// - `options_json` -- Optional `{min_participants, min_duration_minutes}` object
#[wasm_bindgen(js_name = "computeCommonAvailability")]
pub fn compute_common_availability(
    records_json: &str,
    options_json: Option<String>,
) -> Result<String, JsValue> {
    common_availability_json(records_json, options_json.as_deref())
        .map_err(|e| JsValue::from_str(&e))
}

/// Group records by date for the plain listing view.
#[wasm_bindgen(js_name = "groupByDate")]
pub fn group_by_date(records_json: &str) -> Result<String, JsValue> {
    group_by_date_json(records_json).map_err(|e| JsValue::from_str(&e))
}

/// Rank common slots (most participants, then longest) and keep `limit`.
#[wasm_bindgen(js_name = "bestSlots")]
pub fn best_slots(records_json: &str, limit: u32) -> Result<String, JsValue> {
    best_slots_json(records_json, limit as usize).map_err(|e| JsValue::from_str(&e))
}
