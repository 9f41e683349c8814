//! WASM bindings for slot-engine.
//!
//! Exposes the availability index and the slot selection engine to a JavaScript
//! booking UI via `wasm-bindgen`. All complex types are passed as JSON strings.
//! Navigation stays on the JavaScript side: `selectSlot` returns the engine's
//! next action and the caller pushes a view or dispatches a store action with it.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p slot-engine-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir pkg/ \
//!   target/wasm32-unknown-unknown/release/slot_engine_wasm.wasm
//! ```

use chrono::NaiveDate;
use serde::Serialize;
use slot_engine::engine::{self, SelectionState};
use slot_engine::{availability, clock, AvailabilityMap, TimeSlot};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// Helpers: JSON and date parsing at the boundary
// ---------------------------------------------------------------------------

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Parse a `YYYY-MM-DD` date string.
fn parse_date(s: &str) -> Result<NaiveDate, JsValue> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| JsValue::from_str(&format!("Invalid date '{}': {}", s, e)))
}

fn parse_availability(json: &str) -> Result<AvailabilityMap, JsValue> {
    AvailabilityMap::from_json(json).map_err(js_error)
}

fn parse_state(json: &str) -> Result<SelectionState, JsValue> {
    serde_json::from_str(json)
        .map_err(|e| JsValue::from_str(&format!("Invalid selection state JSON: {}", e)))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Dates in `[range_start, range_end]` with no slots.
///
/// `availability_json` is an object of `YYYY-MM-DD` keys to slot arrays. Returns
/// a JSON array of `YYYY-MM-DD` strings in ascending order.
#[wasm_bindgen(js_name = "disabledDates")]
pub fn disabled_dates(
    availability_json: &str,
    range_start: &str,
    range_end: &str,
) -> Result<String, JsValue> {
    let map = parse_availability(availability_json)?;
    let start = parse_date(range_start)?;
    let end = parse_date(range_end)?;

    to_json(&availability::disabled_dates(&map, start, end))
}

/// The slots offered on `date` as a JSON array (empty if none).
#[wasm_bindgen(js_name = "slotsForDate")]
pub fn slots_for_date(availability_json: &str, date: &str) -> Result<String, JsValue> {
    let map = parse_availability(availability_json)?;
    let date = parse_date(date)?;

    to_json(&map.slots_for_date(date))
}

/// The initial start-phase selection state for `date`, as JSON.
#[wasm_bindgen(js_name = "startSelection")]
pub fn start_selection(availability_json: &str, date: &str) -> Result<String, JsValue> {
    let map = parse_availability(availability_json)?;
    let date = parse_date(date)?;

    to_json(&SelectionState::start(date, map.slots_for_date(date)))
}

/// What to render for a selection state.
///
/// Returns `{"kind":"no_slots",...}` or `{"kind":"choose","label":...,"entries":[...]}`.
#[wasm_bindgen(js_name = "displaySlots")]
pub fn display_slots(state_json: &str) -> Result<String, JsValue> {
    let state = parse_state(state_json)?;
    to_json(&engine::display(&state))
}

/// Handle a click on the slot at `index`.
///
/// Returns `{"action":"transition",...state}` or
/// `{"action":"terminate","date":...,"startTime":...,"endTime":...}`.
#[wasm_bindgen(js_name = "selectSlot")]
pub fn select_slot(
    state_json: &str,
    index: usize,
    duration_minutes: u32,
) -> Result<String, JsValue> {
    let state = parse_state(state_json)?;
    let clicked = state.slots.get(index).cloned().ok_or_else(|| {
        js_error(slot_engine::SlotError::IndexOutOfRange {
            index,
            len: state.slots.len(),
        })
    })?;

    let next =
        engine::on_slot_click(&state, &clicked, index, duration_minutes).map_err(js_error)?;
    to_json(&next)
}

/// The slot label `duration_minutes` after `slot` on `date`.
#[wasm_bindgen(js_name = "endTimeFor")]
pub fn end_time_for(date: &str, slot: &str, duration_minutes: u32) -> Result<String, JsValue> {
    let date = parse_date(date)?;
    clock::end_time(date, &TimeSlot::from(slot), duration_minutes)
        .map(|end| end.as_str().to_string())
        .map_err(js_error)
}
