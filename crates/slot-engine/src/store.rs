//! A Redux-style store for the route-driven booking flow.
//!
//! State changes only through [`Store::dispatch`], which runs the pure
//! [`reduce`] function. The vocabulary is restricted to the two actions the
//! slot picker emits: `DATE_SELECTED` and `TIME_SLOT_SELECTED`. The store's
//! `slot_form` plays the role of the engine's phase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::availability::AvailabilityMap;
use crate::clock::TimeSlot;
use crate::engine::{BookingRequest, SelectionPhase, SelectionState};

/// Which end of the appointment a `TIME_SLOT_SELECTED` action sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotType {
    /// The start time, with the end-time candidates derived from it.
    #[serde(rename_all = "camelCase")]
    StartTime { end_slots: Vec<TimeSlot> },
    EndTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
    #[serde(rename = "DATE_SELECTED")]
    DateSelected { date: NaiveDate },
    #[serde(rename = "TIME_SLOT_SELECTED", rename_all = "camelCase")]
    TimeSlotSelected {
        slot_time: TimeSlot,
        slot_type: SlotType,
    },
}

/// The staff booking slice of the global state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffState {
    /// The selected staff member's `availableSlots`.
    pub availability: AvailabilityMap,
    pub duration_minutes: u32,
    pub selected_date: Option<NaiveDate>,
    pub slots_for_date: Vec<TimeSlot>,
    pub slot_form: SelectionPhase,
    pub start_time: Option<TimeSlot>,
    pub end_time: Option<TimeSlot>,
}

impl StaffState {
    pub fn new(availability: AvailabilityMap, duration_minutes: u32) -> Self {
        Self {
            availability,
            duration_minutes,
            ..Self::default()
        }
    }

    /// The engine's view of this state. `None` until a date is selected.
    pub fn selection_state(&self) -> Option<SelectionState> {
        let date = self.selected_date?;
        let start_time = match self.slot_form {
            SelectionPhase::Start => None,
            SelectionPhase::End => self.start_time.clone(),
        };
        Some(SelectionState {
            date,
            phase: self.slot_form,
            slots: self.slots_for_date.clone(),
            start_time,
        })
    }

    /// The completed booking, once date, start and end are all set.
    pub fn booking(&self) -> Option<BookingRequest> {
        Some(BookingRequest {
            date: self.selected_date?,
            start_time: self.start_time.clone()?,
            end_time: self.end_time.clone()?,
        })
    }
}

/// Apply `action` to `state`.
pub fn reduce(state: StaffState, action: &Action) -> StaffState {
    match action {
        Action::DateSelected { date } => StaffState {
            selected_date: Some(*date),
            slots_for_date: state.availability.slots_for_date(*date),
            slot_form: SelectionPhase::Start,
            start_time: None,
            end_time: None,
            ..state
        },
        Action::TimeSlotSelected {
            slot_time,
            slot_type: SlotType::StartTime { end_slots },
        } => StaffState {
            start_time: Some(slot_time.clone()),
            slots_for_date: end_slots.clone(),
            slot_form: SelectionPhase::End,
            end_time: None,
            ..state
        },
        Action::TimeSlotSelected {
            slot_time,
            slot_type: SlotType::EndTime,
        } => StaffState {
            end_time: Some(slot_time.clone()),
            ..state
        },
    }
}

type Listener = Box<dyn FnMut(&StaffState)>;

/// Holds the current [`StaffState`] and notifies subscribers after each dispatch.
pub struct Store {
    state: StaffState,
    listeners: Vec<Listener>,
}

impl Store {
    pub fn new(state: StaffState) -> Self {
        Self {
            state,
            listeners: Vec::new(),
        }
    }

    pub fn state(&self) -> &StaffState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) {
        debug!(?action, "dispatch");
        let current = std::mem::take(&mut self.state);
        self.state = reduce(current, &action);
        for listener in &mut self.listeners {
            listener(&self.state);
        }
    }

    /// Register `listener` to run with the new state after every dispatch.
    pub fn subscribe(&mut self, listener: impl FnMut(&StaffState) + 'static) {
        self.listeners.push(Box::new(listener));
    }
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
