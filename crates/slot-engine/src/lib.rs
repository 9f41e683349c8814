//! # slot-engine
//!
//! Start/end time-slot selection for staff booking calendars.
//!
//! A booking flow picks a date from the calendar, then a start time from the
//! staff member's available slots, then an end time derived from the remaining
//! slots plus the appointment duration. The selection logic is a pure engine;
//! two thin drivers connect it to either a stack-based view navigator or a
//! route dispatcher backed by a Redux-style store.
//!
//! ## Modules
//!
//! - [`clock`] — `TimeSlot` labels and the UTC "combine and offset" arithmetic
//! - [`availability`] — date → slots lookup and disabled calendar dates
//! - [`engine`] — display decision and start → end click handling
//! - [`navigation`] — stack navigator and router collaborators
//! - [`store`] — `DATE_SELECTED` / `TIME_SLOT_SELECTED` reducer and store
//! - [`driver`] — stack and store drivers over the shared engine
//! - [`error`] — Error types

pub mod availability;
pub mod clock;
pub mod driver;
pub mod engine;
pub mod error;
pub mod navigation;
pub mod store;

pub use availability::{disabled_dates, slots_for_date, AvailabilityMap};
pub use clock::{combine, end_time, TimeSlot};
pub use driver::{SelectionDriver, StackDriver, StoreDriver};
pub use engine::{
    display, on_slot_click, BookingRequest, NextAction, SelectionPhase, SelectionState,
    SlotDisplay,
};
pub use error::SlotError;
pub use store::{reduce, Action, SlotType, StaffState, Store};
