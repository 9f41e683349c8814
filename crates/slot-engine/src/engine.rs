//! Slot selection engine: the start → end time state machine.
//!
//! Everything here is a pure function of a [`SelectionState`]. The engine decides
//! what to display and how a click moves the flow forward, and it knows nothing
//! about how the next state is shown. The drivers in [`crate::driver`] carry its
//! decisions to a concrete navigation mechanism.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::clock::{self, TimeSlot};
use crate::error::{Result, SlotError};

/// Message shown in place of the slot list when nothing can be chosen.
pub const NO_SLOTS_MESSAGE: &str = "No slots available!";

/// Which end of the appointment the displayed slots choose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionPhase {
    /// No start time yet; the slots are candidate start times.
    #[default]
    Start,
    /// A start time is chosen; the slots are candidate end times.
    End,
}

impl SelectionPhase {
    /// Prompt shown above the slot list.
    pub fn label(self) -> &'static str {
        match self {
            SelectionPhase::Start => "Choose your start time",
            SelectionPhase::End => "Choose your end time",
        }
    }
}

/// Everything the engine needs to render a slot list and answer a click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    pub date: NaiveDate,
    pub phase: SelectionPhase,
    pub slots: Vec<TimeSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<TimeSlot>,
}

impl SelectionState {
    /// A fresh flow instance collecting a start time on `date`.
    pub fn start(date: NaiveDate, slots: Vec<TimeSlot>) -> Self {
        Self {
            date,
            phase: SelectionPhase::Start,
            slots,
            start_time: None,
        }
    }
}

/// A completed booking interval, handed to the booking submission step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub date: NaiveDate,
    pub start_time: TimeSlot,
    pub end_time: TimeSlot,
}

/// The outcome of a slot click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NextAction {
    /// Move to the end-time phase with this state.
    Transition(SelectionState),
    /// Both times are chosen.
    Terminate(BookingRequest),
}

/// One clickable entry in the slot list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotEntry {
    pub index: usize,
    pub slot: TimeSlot,
}

/// What the slot picker shows for a given state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotDisplay {
    NoSlots {
        heading: String,
        message: String,
    },
    Choose {
        heading: String,
        label: String,
        entries: Vec<SlotEntry>,
    },
}

impl SlotDisplay {
    pub fn is_empty(&self) -> bool {
        matches!(self, SlotDisplay::NoSlots { .. })
    }
}

/// Decide what to render for `state`.
///
/// An empty slot list always yields [`SlotDisplay::NoSlots`], in either phase.
pub fn display(state: &SelectionState) -> SlotDisplay {
    let heading = clock::format_heading(state.date);
    if state.slots.is_empty() {
        return SlotDisplay::NoSlots {
            heading,
            message: NO_SLOTS_MESSAGE.to_string(),
        };
    }

    SlotDisplay::Choose {
        heading,
        label: state.phase.label().to_string(),
        entries: state
            .slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotEntry {
                index,
                slot: slot.clone(),
            })
            .collect(),
    }
}

/// The slots from which end times are derived after clicking `clicked_index`.
///
/// Lists longer than one slot are sliced from the clicked position (inclusive),
/// since an appointment cannot end before it starts. A single-slot list is used
/// as-is.
///
/// # Errors
/// Returns `SlotError::IndexOutOfRange` if `clicked_index` is not a position in
/// `slots`.
pub fn derivation_window(slots: &[TimeSlot], clicked_index: usize) -> Result<&[TimeSlot]> {
    check_index(slots, clicked_index)?;
    if slots.len() > 1 {
        Ok(&slots[clicked_index..])
    } else {
        Ok(slots)
    }
}

/// Offset every slot in `window` by `duration_minutes`, preserving order.
///
/// # Errors
/// Fails on the first slot that cannot be combined with `date`; no partial
/// result is returned.
pub fn derive_end_times(
    date: NaiveDate,
    window: &[TimeSlot],
    duration_minutes: u32,
) -> Result<Vec<TimeSlot>> {
    if duration_minutes == 0 {
        warn!(%date, "deriving end times with a zero-minute duration");
    }
    window
        .iter()
        .map(|slot| clock::end_time(date, slot, duration_minutes))
        .collect()
}

/// Respond to a click on `clicked_slot` at `clicked_index`.
///
/// In the start phase the flow transitions to the end phase, with end times
/// derived from the [`derivation_window`]. In the end phase the booking is
/// complete and a [`NextAction::Terminate`] carries it out.
///
/// # Errors
/// - `SlotError::IndexOutOfRange` if `clicked_index` is outside `state.slots`.
/// - `SlotError::InvalidTimeSlot` if an end time cannot be derived.
/// - `SlotError::MissingStartTime` for an end-phase state with no start time.
pub fn on_slot_click(
    state: &SelectionState,
    clicked_slot: &TimeSlot,
    clicked_index: usize,
    duration_minutes: u32,
) -> Result<NextAction> {
    match state.phase {
        SelectionPhase::Start => {
            let window = derivation_window(&state.slots, clicked_index)?;
            let slots = derive_end_times(state.date, window, duration_minutes)?;
            Ok(NextAction::Transition(SelectionState {
                date: state.date,
                phase: SelectionPhase::End,
                slots,
                start_time: Some(clicked_slot.clone()),
            }))
        }
        SelectionPhase::End => {
            check_index(&state.slots, clicked_index)?;
            let start_time = state
                .start_time
                .clone()
                .ok_or(SlotError::MissingStartTime)?;
            Ok(NextAction::Terminate(BookingRequest {
                date: state.date,
                start_time,
                end_time: clicked_slot.clone(),
            }))
        }
    }
}

fn check_index(slots: &[TimeSlot], index: usize) -> Result<()> {
    if index < slots.len() {
        Ok(())
    } else {
        Err(SlotError::IndexOutOfRange {
            index,
            len: slots.len(),
        })
    }
}
